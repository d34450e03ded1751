//! Roles and role sets.
//!
//! A user holds any combination of the three roles. The set is stored as a
//! text array in the database and as a string list in access tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single role a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrators: create events and manage committee rosters.
    Staff,
    /// Committee members: manage juries, participants and their event.
    Committee,
    /// Juries: score the participants assigned to them.
    Jury,
}

impl Role {
    /// Every role, in a stable order.
    pub const ALL: [Role; 3] = [Role::Staff, Role::Committee, Role::Jury];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Committee => "committee",
            Role::Jury => "jury",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Role::Staff => 0b001,
            Role::Committee => 0b010,
            Role::Jury => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staff" => Ok(Role::Staff),
            "committee" => Ok(Role::Committee),
            "jury" => Ok(Role::Jury),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A set of roles held by one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        RoleSet(0)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns a copy of the set with `role` added.
    pub fn with(self, role: Role) -> Self {
        RoleSet(self.0 | role.bit())
    }

    /// Returns a copy of the set with `role` removed.
    pub fn without(self, role: Role) -> Self {
        RoleSet(self.0 & !role.bit())
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }

    /// Role names in their canonical order, as stored in the database.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|role| role.as_str().to_string()).collect()
    }

    /// Parse a list of role names, failing on the first unknown name.
    pub fn parse<I, S>(names: I) -> Result<Self, UnknownRole>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().parse::<Role>())
            .collect()
    }

    /// Parse a list of role names, skipping anything unrecognised.
    pub fn parse_lossy<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| name.as_ref().parse::<Role>().ok())
            .collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        iter.into_iter().fold(RoleSet::empty(), RoleSet::with)
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet::empty().with(role)
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(set: RoleSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_set_membership() {
        let set = RoleSet::from(Role::Committee).with(Role::Jury);
        assert!(set.contains(Role::Committee));
        assert!(set.contains(Role::Jury));
        assert!(!set.contains(Role::Staff));

        let set = set.without(Role::Jury);
        assert!(!set.contains(Role::Jury));
        assert!(!set.is_empty());
    }

    #[test]
    fn test_parse_strict_and_lossy() {
        let set = RoleSet::parse(["jury", "Staff"]).unwrap();
        assert_eq!(set.to_strings(), vec!["staff", "jury"]);

        assert!(RoleSet::parse(["jury", "judge"]).is_err());
        assert_eq!(RoleSet::parse_lossy(["jury", "judge"]), RoleSet::from(Role::Jury));
    }

    #[test]
    fn test_serde_as_list() {
        let set = RoleSet::from(Role::Staff).with(Role::Committee);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["staff","committee"]"#);

        let back: RoleSet = serde_json::from_str(r#"["committee","staff"]"#).unwrap();
        assert_eq!(back, set);
    }
}
