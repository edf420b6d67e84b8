//! Transition targets: where a transition leads.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Computation that resolves the next state from the machine's context and
/// the arguments of the transition call.
pub type TargetFn<C> = Arc<dyn Fn(&mut C, &[Value]) -> String + Send + Sync>;

/// The next-state descriptor for one transition of one state.
///
/// A target is either a literal state name or a computation evaluated each
/// time the transition fires. Computations receive the context explicitly
/// and return anything with a string form.
///
/// # Example
///
/// ```rust
/// use switchyard::core::TransitionTarget;
///
/// let literal: TransitionTarget<()> = TransitionTarget::literal("three");
/// let computed: TransitionTarget<u32> =
///     TransitionTarget::computed(|count: &mut u32, _args| if *count > 2 { "four" } else { "one" });
///
/// assert!(!literal.is_computed());
/// assert!(computed.is_computed());
/// ```
pub enum TransitionTarget<C> {
    /// A fixed next-state name
    Literal(String),
    /// A next-state name computed on every call
    Computed(TargetFn<C>),
}

impl<C> TransitionTarget<C> {
    pub fn literal(state: impl Into<String>) -> Self {
        Self::Literal(state.into())
    }

    /// Wrap a computation. Its result is converted with `to_string`.
    pub fn computed<F, T>(compute: F) -> Self
    where
        F: Fn(&mut C, &[Value]) -> T + Send + Sync + 'static,
        T: ToString,
    {
        Self::Computed(Arc::new(move |context: &mut C, args: &[Value]| {
            compute(context, args).to_string()
        }))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// The literal state name, if this target is not computed.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(state) => Some(state),
            Self::Computed(_) => None,
        }
    }

    /// Resolve the next-state name for a call with `args`.
    pub fn resolve(&self, context: &mut C, args: &[Value]) -> String {
        match self {
            Self::Literal(state) => state.clone(),
            Self::Computed(compute) => compute(context, args),
        }
    }
}

impl<C> Clone for TransitionTarget<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(state) => Self::Literal(state.clone()),
            Self::Computed(compute) => Self::Computed(Arc::clone(compute)),
        }
    }
}

impl<C> fmt::Debug for TransitionTarget<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(state) => f.debug_tuple("Literal").field(state).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<C> From<&str> for TransitionTarget<C> {
    fn from(state: &str) -> Self {
        Self::Literal(state.to_string())
    }
}

impl<C> From<String> for TransitionTarget<C> {
    fn from(state: String) -> Self {
        Self::Literal(state)
    }
}
