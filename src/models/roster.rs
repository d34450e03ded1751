//! Committee and jury roster models
//!
//! Committees and juries share one shape: a role record linked one-to-one
//! with a user, attached to events through a join table.

use chrono::{DateTime, Utc};
use jurybox_rules::Role;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::{RosterSlot, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKind {
    Committee,
    Jury,
}

impl RosterKind {
    /// Table holding the role records
    pub fn table(self) -> &'static str {
        match self {
            RosterKind::Committee => "committees",
            RosterKind::Jury => "juries",
        }
    }

    /// Join table linking role records to events
    pub fn link_table(self) -> &'static str {
        match self {
            RosterKind::Committee => "event_committees",
            RosterKind::Jury => "event_juries",
        }
    }

    /// Column of the join table referencing the role record
    pub fn link_column(self) -> &'static str {
        match self {
            RosterKind::Committee => "committee_id",
            RosterKind::Jury => "jury_id",
        }
    }

    /// URL segment under `event/{eid}/`
    pub fn path_segment(self) -> &'static str {
        match self {
            RosterKind::Committee => "committee",
            RosterKind::Jury => "jury",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RosterKind::Committee => "Committee",
            RosterKind::Jury => "Jury",
        }
    }

    /// Role granted to members of this roster
    pub fn role(self) -> Role {
        match self {
            RosterKind::Committee => Role::Committee,
            RosterKind::Jury => Role::Jury,
        }
    }

    pub fn slot(self) -> RosterSlot {
        match self {
            RosterKind::Committee => RosterSlot::Committee,
            RosterKind::Jury => RosterSlot::Jury,
        }
    }

    /// Relative URL that repeats a roster add with confirmation
    pub fn confirm_hint(self, event_id: Uuid) -> String {
        format!("event/{}/{}/?confirm=1", event_id, self.path_segment())
    }
}

/// Role record without the user details
#[derive(Debug, Clone, FromRow)]
pub struct RosterRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role record joined with its user
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RosterMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RosterMember {
    pub fn from_parts(user: &User, record: &RosterRecord) -> Self {
        RosterMember {
            id: record.id,
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            address: user.address.clone(),
            city: user.city.clone(),
            state: user.state.clone(),
            photo_url: user.photo_url.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_hint_names_the_roster() {
        let id = Uuid::nil();
        assert_eq!(
            RosterKind::Jury.confirm_hint(id),
            "event/00000000-0000-0000-0000-000000000000/jury/?confirm=1"
        );
        assert_eq!(
            RosterKind::Committee.confirm_hint(id),
            "event/00000000-0000-0000-0000-000000000000/committee/?confirm=1"
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(RosterKind::Jury.role(), Role::Jury);
        assert_eq!(RosterKind::Committee.slot(), RosterSlot::Committee);
        assert_eq!(RosterKind::Jury.link_column(), "jury_id");
    }
}
