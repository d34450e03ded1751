//! Authorization helpers using jurybox-rules policies.
//!
//! Handlers build an [`AccessContext`] for the caller and check it against a
//! named policy before doing any work. Failing a check is always a 403.

use axum::http::Method;
use jurybox_rules::{
    AccessContext, AccessKind,
    policies,
    specification::Specification,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;

/// Classify an HTTP method as a read or a write.
pub fn access_kind(method: &Method) -> AccessKind {
    if matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS) {
        AccessKind::Read
    } else {
        AccessKind::Write
    }
}

/// Build an AccessContext for the current caller.
pub fn build_access_context(user: &AuthenticatedUser, kind: AccessKind) -> AccessContext {
    AccessContext::for_user(user.id, user.roles, kind)
}

/// Evaluate `rule` and turn a failure into a Forbidden error.
pub fn authorize<S>(rule: S, ctx: &AccessContext, action: &str) -> AppResult<()>
where
    S: Specification<AccessContext>,
{
    if rule.is_satisfied_by(ctx) {
        Ok(())
    } else {
        tracing::debug!(user_id = ?ctx.user_id, action, "Permission denied");
        Err(AppError::Forbidden(format!(
            "You do not have permission to {}",
            action
        )))
    }
}

// =============================================================================
// Authorization check functions
// =============================================================================

/// Staff only.
pub fn require_staff(user: &AuthenticatedUser, action: &str) -> AppResult<()> {
    let ctx = build_access_context(user, AccessKind::Write);
    authorize(policies::staff_only(), &ctx, action)
}

/// Staff or committee.
pub fn require_staff_or_committee(user: &AuthenticatedUser, action: &str) -> AppResult<()> {
    let ctx = build_access_context(user, AccessKind::Write);
    authorize(policies::staff_or_committee(), &ctx, action)
}

/// Reads for any signed-in user; writes for staff or committee.
pub fn require_staff_or_committee_or_read_only(
    user: &AuthenticatedUser,
    method: &Method,
    action: &str,
) -> AppResult<()> {
    let ctx = build_access_context(user, access_kind(method));
    authorize(policies::staff_or_committee_or_read_only(), &ctx, action)
}

pub fn require_committee_view(user: &AuthenticatedUser) -> AppResult<()> {
    let ctx = build_access_context(user, AccessKind::Read);
    authorize(policies::committee_view(), &ctx, "view committee events")
}

pub fn require_jury_view(user: &AuthenticatedUser) -> AppResult<()> {
    let ctx = build_access_context(user, AccessKind::Read);
    authorize(policies::jury_view(), &ctx, "view jury events")
}

/// Score fields may only be written by the jury assigned to the participant.
pub fn require_score_editor(user: &AuthenticatedUser, assigned_jury: bool) -> AppResult<()> {
    let ctx = build_access_context(user, AccessKind::Write).with_assigned_jury(assigned_jury);
    authorize(policies::score_editor(), &ctx, "edit this participant's scores")
}

pub fn require_participant_profile_editor(
    user: &AuthenticatedUser,
    assigned_jury: bool,
) -> AppResult<()> {
    let ctx = build_access_context(user, AccessKind::Write).with_assigned_jury(assigned_jury);
    authorize(
        policies::participant_profile_editor(),
        &ctx,
        "edit this participant",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurybox_rules::{Role, RoleSet};
    use uuid::Uuid;

    fn user(roles: RoleSet) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            roles,
        }
    }

    #[test]
    fn test_access_kind() {
        assert_eq!(access_kind(&Method::GET), AccessKind::Read);
        assert_eq!(access_kind(&Method::PUT), AccessKind::Write);
        assert_eq!(access_kind(&Method::DELETE), AccessKind::Write);
    }

    #[test]
    fn test_require_staff() {
        assert!(require_staff(&user(Role::Staff.into()), "create events").is_ok());
        let err = require_staff(&user(Role::Committee.into()), "create events").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_read_only_depends_on_method() {
        let jury = user(Role::Jury.into());
        assert!(require_staff_or_committee_or_read_only(&jury, &Method::GET, "x").is_ok());
        assert!(require_staff_or_committee_or_read_only(&jury, &Method::PUT, "x").is_err());
    }

    #[test]
    fn test_score_editor_needs_assignment() {
        let jury = user(Role::Jury.into());
        assert!(require_score_editor(&jury, false).is_err());
        assert!(require_score_editor(&jury, true).is_ok());
        assert!(require_score_editor(&user(Role::Staff.into()), true).is_err());
    }

    #[test]
    fn test_profile_editor() {
        assert!(require_participant_profile_editor(&user(Role::Committee.into()), false).is_ok());
        assert!(require_participant_profile_editor(&user(Role::Jury.into()), false).is_err());
        assert!(require_participant_profile_editor(&user(RoleSet::empty()), false).is_err());
    }

    #[test]
    fn test_views() {
        assert!(require_committee_view(&user(Role::Committee.into())).is_ok());
        assert!(require_committee_view(&user(Role::Jury.into())).is_err());
        assert!(require_jury_view(&user(Role::Jury.into())).is_ok());
        assert!(require_jury_view(&user(Role::Staff.into())).is_ok());
    }
}
