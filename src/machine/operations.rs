//! Per-state operation synthesis.
//!
//! For the state being entered, every transition name known to the table is
//! mapped to an operation: the state's own transitions resolve to their
//! targets, every other known name resolves to a rejection. Firing a known
//! name therefore always produces either a switch or a reported invalid
//! attempt.

use crate::core::{TransitionTable, TransitionTarget};
use std::collections::BTreeMap;

/// What firing a transition name does in the synthesized state.
pub(crate) enum Operation<C> {
    /// Resolve this target and switch to it
    Switch(TransitionTarget<C>),
    /// Report an invalid transition and stay put
    Reject,
}

/// Dispatch table of operations, synthesized for one state.
pub(crate) struct Operations<C> {
    state: String,
    operations: BTreeMap<String, Operation<C>>,
}

impl<C> Operations<C> {
    /// Synthesize the operations legal in `state`.
    pub(crate) fn synthesize(table: &TransitionTable<C>, state: &str) -> Self {
        let mut operations: BTreeMap<String, Operation<C>> = table
            .transition_names()
            .into_iter()
            .map(|name| (name.to_string(), Operation::Reject))
            .collect();

        if let Some(definition) = table.state(state) {
            for (name, target) in definition.transitions() {
                operations.insert(name.to_string(), Operation::Switch(target.clone()));
            }
        }

        tracing::trace!(
            "Synthesized {} operations for state {}",
            operations.len(),
            state
        );

        Self {
            state: state.to_string(),
            operations,
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Operation<C>> {
        self.operations.get(name)
    }

    /// The state these operations were synthesized for.
    pub(crate) fn state(&self) -> &str {
        &self.state
    }

    /// Names that switch when fired, in name order.
    pub(crate) fn available(&self) -> impl Iterator<Item = &str> {
        self.operations
            .iter()
            .filter(|(_, op)| matches!(op, Operation::Switch(_)))
            .map(|(name, _)| name.as_str())
    }

    /// Every name with an installed operation.
    pub(crate) fn known(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}
