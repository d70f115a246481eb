//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions over the machine's context and the
//! incoming event. A transition whose guard fails simply does not fire.

use std::fmt;

type Predicate<C, E> = Box<dyn Fn(&C, &E) -> bool + Send + Sync>;

/// Named, pure predicate that decides whether a transition can fire.
///
/// # Example
///
/// ```rust
/// use memory_match::core::Guard;
///
/// struct Counter {
///     value: u32,
/// }
///
/// let below = Guard::new("below_limit", |ctx: &Counter, limit: &u32| ctx.value < *limit);
/// let even = Guard::new("even", |ctx: &Counter, _: &u32| ctx.value % 2 == 0);
/// let both = below.and(even);
///
/// assert_eq!(both.name(), "below_limit && even");
/// assert!(both.check(&Counter { value: 4 }, &10));
/// assert!(!both.check(&Counter { value: 5 }, &10));
/// assert!(!both.check(&Counter { value: 12 }, &10));
/// ```
pub struct Guard<C, E> {
    name: String,
    predicate: Predicate<C, E>,
}

impl<C: 'static, E: 'static> Guard<C, E> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C, &E) -> bool + Send + Sync + 'static,
    {
        Guard {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Conjoin two guards. The right-hand guard is only evaluated when the
    /// left-hand one passes.
    pub fn and(self, other: Guard<C, E>) -> Self {
        let Guard {
            name: left_name,
            predicate: left,
        } = self;
        let Guard {
            name: right_name,
            predicate: right,
        } = other;

        Guard {
            name: format!("{left_name} && {right_name}"),
            predicate: Box::new(move |ctx, event| left(ctx, event) && right(ctx, event)),
        }
    }

    /// Evaluate the guard.
    pub fn check(&self, ctx: &C, event: &E) -> bool {
        (self.predicate)(ctx, event)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<C, E> fmt::Debug for Guard<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}
