//! Evaluation context for access rules.

use uuid::Uuid;

use crate::roles::{Role, RoleSet};

/// Whether the request only reads or also mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// GET / HEAD / OPTIONS
    Read,
    /// POST / PUT / PATCH / DELETE
    Write,
}

/// Facts about the caller and the target resource.
#[derive(Debug, Clone)]
pub struct AccessContext {
    /// `None` for anonymous callers.
    pub user_id: Option<Uuid>,
    pub roles: RoleSet,
    pub kind: AccessKind,
    /// The caller's jury record is assigned to the target participant.
    pub assigned_jury: bool,
}

impl AccessContext {
    pub fn anonymous(kind: AccessKind) -> Self {
        Self {
            user_id: None,
            roles: RoleSet::empty(),
            kind,
            assigned_jury: false,
        }
    }

    pub fn for_user(user_id: Uuid, roles: RoleSet, kind: AccessKind) -> Self {
        Self {
            user_id: Some(user_id),
            roles,
            kind,
            assigned_jury: false,
        }
    }

    pub fn with_assigned_jury(mut self, assigned: bool) -> Self {
        self.assigned_jury = assigned;
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }
}
