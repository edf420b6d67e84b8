//! Errors and outcomes of driving a machine.

use crate::core::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while driving a machine.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("No such state (\"{state}\")")]
    InvalidState { state: String },

    #[error("No state declares a transition named \"{name}\"")]
    UnknownTransition { name: String },

    #[error("Transition callback failed: {0}")]
    Callback(String),
}

impl MachineError {
    /// Error for a callback to return when it cannot complete.
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }
}

/// A transition was requested that the current state does not declare.
///
/// This is an anticipated outcome, not an error: the machine stays where it
/// is and the attempt is reported through the diagnostic channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidTransition {
    /// The transition that was requested
    pub transition: String,
    /// The state the machine was in
    pub state: String,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No such transition (\"{}\") for this state (\"{}\").",
            self.transition, self.state
        )
    }
}

/// Outcome of a transition attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attempt {
    /// The machine switched states
    Switched { from: String, to: String },

    /// The current state does not declare the transition; nothing changed
    Rejected(InvalidTransition),
}

impl Attempt {
    pub fn is_switched(&self) -> bool {
        matches!(self, Self::Switched { .. })
    }

    pub fn rejection(&self) -> Option<&InvalidTransition> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Switched { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message_names_transition_and_state() {
        let rejection = InvalidTransition {
            transition: "decrement".to_string(),
            state: "one".to_string(),
        };

        assert_eq!(
            rejection.to_string(),
            "No such transition (\"decrement\") for this state (\"one\")."
        );
    }

    #[test]
    fn invalid_state_message_names_state() {
        let error = MachineError::InvalidState {
            state: "five".to_string(),
        };
        assert_eq!(error.to_string(), "No such state (\"five\")");
    }

    #[test]
    fn configuration_errors_convert() {
        let error: MachineError = ConfigurationError::EmptyTable.into();
        assert!(matches!(
            error,
            MachineError::Configuration(ConfigurationError::EmptyTable)
        ));
        assert_eq!(error.to_string(), "No states defined");
    }

    #[test]
    fn attempt_accessors() {
        let switched = Attempt::Switched {
            from: "one".to_string(),
            to: "two".to_string(),
        };
        assert!(switched.is_switched());
        assert!(switched.rejection().is_none());

        let rejected = Attempt::Rejected(InvalidTransition {
            transition: "decrement".to_string(),
            state: "one".to_string(),
        });
        assert!(!rejected.is_switched());
        assert_eq!(rejected.rejection().map(|r| r.state.as_str()), Some("one"));
    }
}
