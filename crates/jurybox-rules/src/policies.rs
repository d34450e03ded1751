//! Named endpoint policies built from the primitive rules.

use crate::access_rules::{IsAssignedJury, IsAuthenticated, IsCommittee, IsJury, IsReadOnly, IsStaff};
use crate::context::AccessContext;
use crate::operators::Spec;
use crate::specification::Specification;

/// Any authenticated caller.
pub fn authenticated() -> impl Specification<AccessContext> {
    Spec(IsAuthenticated)
}

/// Event creation/listing, committee roster management, user administration.
pub fn staff_only() -> impl Specification<AccessContext> {
    Spec(IsAuthenticated) & Spec(IsStaff)
}

/// Jury roster changes, participant registration and deletion.
pub fn staff_or_committee() -> impl Specification<AccessContext> {
    Spec(IsAuthenticated) & (Spec(IsStaff) | Spec(IsCommittee))
}

/// Reads for everyone signed in, writes for staff and committee.
pub fn staff_or_committee_or_read_only() -> impl Specification<AccessContext> {
    Spec(IsAuthenticated) & (Spec(IsReadOnly) | Spec(IsStaff) | Spec(IsCommittee))
}

/// Event lookup by committee.
pub fn committee_view() -> impl Specification<AccessContext> {
    Spec(IsAuthenticated) & (Spec(IsCommittee) | Spec(IsStaff))
}

/// Event lookup by jury.
pub fn jury_view() -> impl Specification<AccessContext> {
    Spec(IsAuthenticated) & (Spec(IsJury) | Spec(IsStaff))
}

/// Writing `score_field` / `total_score`: only the jury assigned to the participant.
pub fn score_editor() -> impl Specification<AccessContext> {
    Spec(IsAuthenticated) & Spec(IsAssignedJury)
}

/// Editing a participant's profile fields.
pub fn participant_profile_editor() -> impl Specification<AccessContext> {
    Spec(IsAuthenticated) & (Spec(IsStaff) | Spec(IsCommittee) | Spec(IsAssignedJury))
}
