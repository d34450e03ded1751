//! User model

use chrono::{DateTime, Utc};
use jurybox_rules::{Role, RoleSet};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub photo_url: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Roles as a typed set. Unknown names in the column are ignored.
    pub fn role_set(&self) -> RoleSet {
        RoleSet::parse_lossy(&self.roles)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role_set().contains(role)
    }
}

/// Insertable user fields
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: RoleSet,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub photo_url: Option<String>,
}

/// Partial profile update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UserProfileChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub photo_url: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user_with_roles(roles: &[&str]) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Alice".to_string(),
            last_name: String::new(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            phone_number: None,
            address: None,
            city: None,
            state: None,
            photo_url: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixtures::user_with_roles;

    #[test]
    fn test_role_set_from_column() {
        let user = user_with_roles(&["jury", "committee", "legacy"]);
        assert!(user.has_role(Role::Jury));
        assert!(user.has_role(Role::Committee));
        assert!(!user.has_role(Role::Staff));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(user_with_roles(&[])).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }
}
