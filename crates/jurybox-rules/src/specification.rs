//! Core specification trait and combinators.

use std::sync::Arc;

/// A predicate over an evaluation context.
///
/// Specifications are cheap value types; composing them builds a tree that
/// is evaluated left to right with short-circuiting.
pub trait Specification<Ctx: ?Sized> {
    /// Check if the specification holds for `ctx`.
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool;

    fn and<S: Specification<Ctx>>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
    {
        And(self, other)
    }

    fn or<S: Specification<Ctx>>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(pub A, pub B);

impl<Ctx: ?Sized, A, B> Specification<Ctx> for And<A, B>
where
    A: Specification<Ctx>,
    B: Specification<Ctx>,
{
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.0.is_satisfied_by(ctx) && self.1.is_satisfied_by(ctx)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(pub A, pub B);

impl<Ctx: ?Sized, A, B> Specification<Ctx> for Or<A, B>
where
    A: Specification<Ctx>,
    B: Specification<Ctx>,
{
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.0.is_satisfied_by(ctx) || self.1.is_satisfied_by(ctx)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Not<A>(pub A);

impl<Ctx: ?Sized, A> Specification<Ctx> for Not<A>
where
    A: Specification<Ctx>,
{
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        !self.0.is_satisfied_by(ctx)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AlwaysTrue;

impl<Ctx: ?Sized> Specification<Ctx> for AlwaysTrue {
    fn is_satisfied_by(&self, _ctx: &Ctx) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AlwaysFalse;

impl<Ctx: ?Sized> Specification<Ctx> for AlwaysFalse {
    fn is_satisfied_by(&self, _ctx: &Ctx) -> bool {
        false
    }
}

/// Type-erased specification, for rule lists built at runtime.
pub type BoxedSpec<Ctx> = Arc<dyn Specification<Ctx> + Send + Sync>;

impl<Ctx: ?Sized> Specification<Ctx> for BoxedSpec<Ctx> {
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.as_ref().is_satisfied_by(ctx)
    }
}

/// Satisfied when every member is satisfied (vacuously true when empty).
pub struct AllOf<Ctx: ?Sized>(pub Vec<BoxedSpec<Ctx>>);

impl<Ctx: ?Sized> Specification<Ctx> for AllOf<Ctx> {
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.0.iter().all(|spec| spec.is_satisfied_by(ctx))
    }
}

/// Satisfied when at least one member is satisfied (false when empty).
pub struct AnyOf<Ctx: ?Sized>(pub Vec<BoxedSpec<Ctx>>);

impl<Ctx: ?Sized> Specification<Ctx> for AnyOf<Ctx> {
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.0.iter().any(|spec| spec.is_satisfied_by(ctx))
    }
}
