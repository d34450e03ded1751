//! Access rules for JuryBox.
//!
//! Every endpoint of the event service is gated by a predicate over the
//! caller's [`RoleSet`] and a few facts about the target resource. This crate
//! expresses those predicates as small composable specifications so that the
//! gates read like the policy they implement:
//!
//! ```ignore
//! use jurybox_rules::prelude::*;
//!
//! let can_edit_event = Spec(IsAuthenticated) & (Spec(IsReadOnly) | Spec(IsStaff) | Spec(IsCommittee));
//!
//! if can_edit_event.is_satisfied_by(&ctx) {
//!     // proceed
//! }
//! ```
//!
//! Rules are synchronous: anything that needs a database lookup (for example
//! whether a jury is assigned to a participant) is resolved by the caller and
//! placed on the [`AccessContext`] before evaluation.

pub mod access_rules;
pub mod context;
pub mod operators;
pub mod policies;
pub mod roles;
pub mod specification;

pub use context::{AccessContext, AccessKind};
pub use roles::{Role, RoleSet, UnknownRole};

/// Prelude module - import everything you need with `use jurybox_rules::prelude::*`
pub mod prelude {
    pub use crate::access_rules::*;
    pub use crate::context::{AccessContext, AccessKind};
    pub use crate::operators::Spec;
    pub use crate::policies;
    pub use crate::roles::{Role, RoleSet};
    pub use crate::specification::{
        AllOf, AlwaysFalse, AlwaysTrue, And, AnyOf, BoxedSpec, Not, Or, Specification,
    };
}
