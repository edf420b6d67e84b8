//! Transition tables: the declarative description of a machine.

use super::error::ConfigurationError;
use super::target::TransitionTarget;
use std::collections::{BTreeMap, BTreeSet};

/// Operation names owned by the engine. A transition may not use any of
/// them.
///
/// The set is every method callable on a running machine, in both the
/// camelCase form of the original library (including its internal dispatch
/// helpers) and the snake_case form of [`Machine`](crate::Machine).
/// Associated constructors such as `new` and `create` are not reserved.
pub const RESERVED_NAMES: &[&str] = &[
    "switchState",
    "setState",
    "onTransition",
    "_onTransition",
    "onTransitionFrom",
    "onTransitionTo",
    "onTransitionFromTo",
    "bind",
    "runTransitionCallbacks",
    "createStateMethods",
    "setupInvalidTransitions",
    "states",
    "context",
    "currentState",
    "transitionCallbacks",
    "switch_state",
    "set_state",
    "on_transition",
    "on_transition_from",
    "on_transition_to",
    "on_transition_from_to",
    "on_invalid_transition",
    "current_state",
    "is_in",
    "table",
    "context_mut",
    "into_context",
    "history",
    "with_history_limit",
    "clear_history",
    "take_history",
    "available_transitions",
    "known_transitions",
    "can_fire",
    "callback_count",
    "fire",
    "fire_with",
    "attempt",
];

/// Check whether `name` collides with an engine operation.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// The transitions declared by one state.
pub struct StateDefinition<C> {
    transitions: BTreeMap<String, TransitionTarget<C>>,
}

impl<C> StateDefinition<C> {
    pub(crate) fn new(transitions: BTreeMap<String, TransitionTarget<C>>) -> Self {
        Self { transitions }
    }

    /// Target of `transition`, if this state declares it.
    pub fn target(&self, transition: &str) -> Option<&TransitionTarget<C>> {
        self.transitions.get(transition)
    }

    pub fn declares(&self, transition: &str) -> bool {
        self.transitions.contains_key(transition)
    }

    /// Declared transitions in name order.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &TransitionTarget<C>)> {
        self.transitions
            .iter()
            .map(|(name, target)| (name.as_str(), target))
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// A state without transitions is a dead end; firing anything there is
    /// rejected.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<C> Clone for StateDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            transitions: self.transitions.clone(),
        }
    }
}

impl<C> std::fmt::Debug for StateDefinition<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.transitions.iter()).finish()
    }
}

/// Mapping from state name to the transitions that state declares.
///
/// A table is validated when it is built: it is non-empty and no transition
/// uses a reserved name. It is never mutated afterwards, and machines hold it
/// behind an `Arc`, so one table can drive any number of machines.
///
/// Targets that name an undeclared state are accepted here; firing such a
/// transition fails with an invalid-state error at that point.
///
/// # Example
///
/// ```rust
/// use switchyard::core::TransitionTable;
///
/// let table: TransitionTable = TransitionTable::builder()
///     .state("locked", |s| s.on("coin", "unlocked"))
///     .state("unlocked", |s| s.on("push", "locked"))
///     .build()
///     .unwrap();
///
/// assert!(table.contains_state("locked"));
/// assert_eq!(table.transition_names().len(), 2);
/// ```
pub struct TransitionTable<C = ()> {
    states: BTreeMap<String, StateDefinition<C>>,
}

impl<C> TransitionTable<C> {
    /// Validate and wrap a raw state map.
    pub fn from_states(
        states: BTreeMap<String, StateDefinition<C>>,
    ) -> Result<Self, ConfigurationError> {
        let table = Self { states };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.states.is_empty() {
            return Err(ConfigurationError::EmptyTable);
        }

        for (state, definition) in &self.states {
            for (name, _) in definition.transitions() {
                if name.is_empty() {
                    return Err(ConfigurationError::EmptyTransitionName {
                        state: state.clone(),
                    });
                }
                if is_reserved(name) {
                    return Err(ConfigurationError::ReservedName {
                        name: name.to_string(),
                        state: state.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn state(&self, name: &str) -> Option<&StateDefinition<C>> {
        self.states.get(name)
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// State names in order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    pub fn states(&self) -> impl Iterator<Item = (&str, &StateDefinition<C>)> {
        self.states.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Every transition name declared by at least one state.
    pub fn transition_names(&self) -> BTreeSet<&str> {
        self.states
            .values()
            .flat_map(|definition| definition.transitions().map(|(name, _)| name))
            .collect()
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<C> Clone for TransitionTable<C> {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
        }
    }
}

impl<C> std::fmt::Debug for TransitionTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.states.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(pairs: &[(&str, &str)]) -> StateDefinition<()> {
        StateDefinition::new(
            pairs
                .iter()
                .map(|(name, target)| (name.to_string(), TransitionTarget::literal(*target)))
                .collect(),
        )
    }

    #[test]
    fn empty_table_is_rejected() {
        let result = TransitionTable::<()>::from_states(BTreeMap::new());
        assert!(matches!(result, Err(ConfigurationError::EmptyTable)));
    }

    #[test]
    fn reserved_names_are_rejected() {
        for reserved in ["switchState", "bind", "set_state", "fire"] {
            let mut states = BTreeMap::new();
            states.insert("one".to_string(), definition(&[(reserved, "one")]));

            match TransitionTable::from_states(states) {
                Err(ConfigurationError::ReservedName { name, state }) => {
                    assert_eq!(name, reserved);
                    assert_eq!(state, "one");
                }
                other => panic!("Expected ReservedName, got {:?}", other),
            }
        }
    }

    #[test]
    fn every_machine_operation_is_reserved() {
        for name in [
            "fire_with",
            "can_fire",
            "is_in",
            "history",
            "available_transitions",
            "known_transitions",
            "on_invalid_transition",
            "callback_count",
            "context_mut",
            "into_context",
            "_onTransition",
        ] {
            assert!(is_reserved(name), "{} should be reserved", name);
        }
        assert!(!is_reserved("new"));
        assert!(!is_reserved("increment"));
    }

    #[test]
    fn reserved_name_in_any_state_fails() {
        let mut states = BTreeMap::new();
        states.insert("one".to_string(), definition(&[("increment", "two")]));
        states.insert("two".to_string(), definition(&[("onTransitionTo", "one")]));

        let result = TransitionTable::from_states(states);
        assert!(matches!(result, Err(ConfigurationError::ReservedName { .. })));
    }

    #[test]
    fn empty_transition_name_is_rejected() {
        let mut states = BTreeMap::new();
        states.insert("one".to_string(), definition(&[("", "one")]));

        let result = TransitionTable::from_states(states);
        assert!(matches!(
            result,
            Err(ConfigurationError::EmptyTransitionName { .. })
        ));
    }

    #[test]
    fn transition_names_are_collected_across_states() {
        let mut states = BTreeMap::new();
        states.insert("one".to_string(), definition(&[("increment", "two")]));
        states.insert(
            "two".to_string(),
            definition(&[("increment", "one"), ("reset", "one")]),
        );

        let table = TransitionTable::from_states(states).unwrap();
        let names: Vec<&str> = table.transition_names().into_iter().collect();
        assert_eq!(names, vec!["increment", "reset"]);
    }

    #[test]
    fn undeclared_targets_are_allowed() {
        let mut states = BTreeMap::new();
        states.insert("one".to_string(), definition(&[("jump", "nowhere")]));

        let table = TransitionTable::from_states(states).unwrap();
        assert!(!table.contains_state("nowhere"));
    }

    #[test]
    fn state_without_transitions_is_kept() {
        let mut states = BTreeMap::new();
        states.insert("one".to_string(), definition(&[("finish", "done")]));
        states.insert("done".to_string(), definition(&[]));

        let table = TransitionTable::from_states(states).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.state("done").is_some_and(StateDefinition::is_empty));
    }
}
