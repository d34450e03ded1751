//! Operator syntax for composing specifications.
//!
//! `&`, `|` and `!` are available on the [`Spec`] wrapper:
//!
//! ```ignore
//! let rule = Spec(IsAuthenticated) & (Spec(IsStaff) | Spec(IsCommittee));
//! ```

use std::ops::{BitAnd, BitOr, Not as StdNot};

use crate::specification::{And, Not, Or, Specification};

/// Wrapper enabling operator composition.
#[derive(Debug, Clone, Copy)]
pub struct Spec<S>(pub S);

impl<A, B> BitAnd<Spec<B>> for Spec<A> {
    type Output = Spec<And<A, B>>;

    fn bitand(self, rhs: Spec<B>) -> Self::Output {
        Spec(And(self.0, rhs.0))
    }
}

impl<A, B> BitOr<Spec<B>> for Spec<A> {
    type Output = Spec<Or<A, B>>;

    fn bitor(self, rhs: Spec<B>) -> Self::Output {
        Spec(Or(self.0, rhs.0))
    }
}

impl<A> StdNot for Spec<A> {
    type Output = Spec<Not<A>>;

    fn not(self) -> Self::Output {
        Spec(Not(self.0))
    }
}

impl<Ctx: ?Sized, S> Specification<Ctx> for Spec<S>
where
    S: Specification<Ctx>,
{
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.0.is_satisfied_by(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{AlwaysFalse, AlwaysTrue};

    #[test]
    fn test_operators() {
        assert!((Spec(AlwaysTrue) & Spec(AlwaysTrue)).is_satisfied_by(&()));
        assert!(!(Spec(AlwaysTrue) & Spec(AlwaysFalse)).is_satisfied_by(&()));
        assert!((Spec(AlwaysFalse) | Spec(AlwaysTrue)).is_satisfied_by(&()));
        assert!(!(!Spec(AlwaysTrue)).is_satisfied_by(&()));
    }

    #[test]
    fn test_precedence_with_parentheses() {
        // false & (true | true) = false
        let rule = Spec(AlwaysFalse) & (Spec(AlwaysTrue) | Spec(AlwaysTrue));
        assert!(!rule.is_satisfied_by(&()));

        // (false & true) | true = true
        let rule = (Spec(AlwaysFalse) & Spec(AlwaysTrue)) | Spec(AlwaysTrue);
        assert!(rule.is_satisfied_by(&()));
    }
}
