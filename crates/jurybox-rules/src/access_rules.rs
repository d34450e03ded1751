//! Primitive access rules.

use crate::context::{AccessContext, AccessKind};
use crate::roles::Role;
use crate::specification::Specification;

/// The caller presented a valid token.
#[derive(Debug, Clone, Copy)]
pub struct IsAuthenticated;

impl Specification<AccessContext> for IsAuthenticated {
    fn is_satisfied_by(&self, ctx: &AccessContext) -> bool {
        ctx.user_id.is_some()
    }
}

/// The caller holds the given role.
#[derive(Debug, Clone, Copy)]
pub struct HasRole(pub Role);

impl Specification<AccessContext> for HasRole {
    fn is_satisfied_by(&self, ctx: &AccessContext) -> bool {
        ctx.has_role(self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IsStaff;

impl Specification<AccessContext> for IsStaff {
    fn is_satisfied_by(&self, ctx: &AccessContext) -> bool {
        ctx.has_role(Role::Staff)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IsCommittee;

impl Specification<AccessContext> for IsCommittee {
    fn is_satisfied_by(&self, ctx: &AccessContext) -> bool {
        ctx.has_role(Role::Committee)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IsJury;

impl Specification<AccessContext> for IsJury {
    fn is_satisfied_by(&self, ctx: &AccessContext) -> bool {
        ctx.has_role(Role::Jury)
    }
}

/// The request does not mutate anything.
#[derive(Debug, Clone, Copy)]
pub struct IsReadOnly;

impl Specification<AccessContext> for IsReadOnly {
    fn is_satisfied_by(&self, ctx: &AccessContext) -> bool {
        ctx.kind == AccessKind::Read
    }
}

/// The caller's jury record is assigned to the target participant.
#[derive(Debug, Clone, Copy)]
pub struct IsAssignedJury;

impl Specification<AccessContext> for IsAssignedJury {
    fn is_satisfied_by(&self, ctx: &AccessContext) -> bool {
        ctx.has_role(Role::Jury) && ctx.assigned_jury
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::RoleSet;
    use uuid::Uuid;

    fn ctx(roles: RoleSet, kind: AccessKind) -> AccessContext {
        AccessContext::for_user(Uuid::new_v4(), roles, kind)
    }

    #[test]
    fn test_authentication() {
        assert!(!IsAuthenticated.is_satisfied_by(&AccessContext::anonymous(AccessKind::Read)));
        assert!(IsAuthenticated.is_satisfied_by(&ctx(RoleSet::empty(), AccessKind::Read)));
    }

    #[test]
    fn test_role_rules() {
        let committee = ctx(Role::Committee.into(), AccessKind::Write);
        assert!(IsCommittee.is_satisfied_by(&committee));
        assert!(HasRole(Role::Committee).is_satisfied_by(&committee));
        assert!(!IsStaff.is_satisfied_by(&committee));
        assert!(!IsJury.is_satisfied_by(&committee));
    }

    #[test]
    fn test_assigned_jury_requires_jury_role() {
        let staff = ctx(Role::Staff.into(), AccessKind::Write).with_assigned_jury(true);
        assert!(!IsAssignedJury.is_satisfied_by(&staff));

        let jury = ctx(Role::Jury.into(), AccessKind::Write);
        assert!(!IsAssignedJury.is_satisfied_by(&jury));
        assert!(IsAssignedJury.is_satisfied_by(&jury.with_assigned_jury(true)));
    }
}
