//! Transition callback registration and lookup.

use crate::core::{Selector, Selectors};
use crate::machine::error::MachineError;
use crate::machine::Machine;
use std::collections::HashMap;
use std::sync::Arc;

/// Callback run after a switch, with the machine, the old state and the new
/// state.
pub type Callback<C> =
    Arc<dyn Fn(&mut Machine<C>, &str, &str) -> Result<(), MachineError> + Send + Sync>;

/// Wrap a closure as a [`Callback`].
pub fn callback<C, F>(f: F) -> Callback<C>
where
    F: Fn(&mut Machine<C>, &str, &str) -> Result<(), MachineError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Callbacks keyed by (from, to) selector pairs.
///
/// The index only grows: registrations append in order and nothing is ever
/// removed or deduplicated.
pub struct CallbackIndex<C> {
    entries: HashMap<Selector, HashMap<Selector, Vec<Callback<C>>>>,
}

impl<C> CallbackIndex<C> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `callback` for every pair in `from × to`.
    pub fn register(&mut self, from: Selectors, to: Selectors, callback: Callback<C>) {
        for from in from {
            let targets = self.entries.entry(from).or_default();
            for to in to.iter() {
                targets
                    .entry(to.clone())
                    .or_default()
                    .push(Arc::clone(&callback));
            }
        }
    }

    /// Callbacks registered for exactly this pair, in registration order.
    ///
    /// The returned list is a snapshot; registrations made while it is
    /// being run are not part of it.
    pub fn lookup(&self, from: &Selector, to: &Selector) -> Vec<Callback<C>> {
        self.entries
            .get(from)
            .and_then(|targets| targets.get(to))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of callbacks registered for this pair.
    pub fn count(&self, from: &Selector, to: &Selector) -> usize {
        self.entries
            .get(from)
            .and_then(|targets| targets.get(to))
            .map_or(0, Vec::len)
    }

    /// Total number of registrations across all pairs.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C> Default for CallbackIndex<C> {
    fn default() -> Self {
        Self::new()
    }
}
