//! Builder for constructing transition tables.

use crate::core::{ConfigurationError, StateDefinition, TransitionTable, TransitionTarget};
use serde_json::Value;
use std::collections::BTreeMap;

/// Builder for the transitions of a single state.
pub struct StateBuilder<C> {
    state: String,
    transitions: BTreeMap<String, TransitionTarget<C>>,
    error: Option<ConfigurationError>,
}

impl<C> StateBuilder<C> {
    fn new(state: String) -> Self {
        Self {
            state,
            transitions: BTreeMap::new(),
            error: None,
        }
    }

    /// Declare a transition with a literal or prebuilt target.
    pub fn on(mut self, transition: impl Into<String>, target: impl Into<TransitionTarget<C>>) -> Self {
        let transition = transition.into();
        if self.transitions.contains_key(&transition) {
            self.error.get_or_insert(ConfigurationError::DuplicateTransition {
                name: transition,
                state: self.state.clone(),
            });
            return self;
        }
        self.transitions.insert(transition, target.into());
        self
    }

    /// Declare a transition whose next state is computed from the context
    /// and the call arguments each time it fires.
    pub fn computed<F, T>(self, transition: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&mut C, &[Value]) -> T + Send + Sync + 'static,
        T: ToString,
    {
        self.on(transition, TransitionTarget::computed(compute))
    }

    fn finish(self) -> Result<StateDefinition<C>, ConfigurationError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(StateDefinition::new(self.transitions)),
        }
    }
}

/// Builder for transition tables with a fluent API.
///
/// Errors (duplicate states or transitions, reserved names, an empty table)
/// are reported by [`TableBuilder::build`].
///
/// # Example
///
/// ```rust
/// use switchyard::builder::TableBuilder;
///
/// let table = TableBuilder::<()>::new()
///     .state("one", |s| s.on("increment", "two"))
///     .state("two", |s| s.on("increment", "three").computed("decrement", |_, _| "one"))
///     .state("three", |s| s.on("decrement", "two"))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 3);
/// ```
pub struct TableBuilder<C> {
    states: BTreeMap<String, StateDefinition<C>>,
    error: Option<ConfigurationError>,
}

impl<C> TableBuilder<C> {
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
            error: None,
        }
    }

    /// Add a state, declaring its transitions through a [`StateBuilder`].
    pub fn state<F>(mut self, name: impl Into<String>, define: F) -> Self
    where
        F: FnOnce(StateBuilder<C>) -> StateBuilder<C>,
    {
        let name = name.into();
        if self.states.contains_key(&name) {
            self.error
                .get_or_insert(ConfigurationError::DuplicateState { state: name });
            return self;
        }

        match define(StateBuilder::new(name.clone())).finish() {
            Ok(definition) => {
                self.states.insert(name, definition);
            }
            Err(error) => {
                self.error.get_or_insert(error);
            }
        }
        self
    }

    /// Add a state that declares no transitions.
    pub fn terminal(self, name: impl Into<String>) -> Self {
        self.state(name, |s| s)
    }

    /// Build and validate the table.
    pub fn build(self) -> Result<TransitionTable<C>, ConfigurationError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        TransitionTable::from_states(self.states)
    }
}

impl<C> Default for TableBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TransitionTable<C> {
    /// Start building a table.
    pub fn builder() -> TableBuilder<C> {
        TableBuilder::new()
    }
}
