//! Configuration errors for transition tables.

use thiserror::Error;

/// Errors raised while building, loading or instantiating a transition table.
///
/// These always point at a programming error in the table or in the call
/// that created the machine, so they are never recovered automatically.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("No states defined")]
    EmptyTable,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No such initial state (\"{state}\")")]
    UnknownInitialState { state: String },

    #[error("Reserved name. Cannot use \"{name}\" for a transition name (declared in state \"{state}\")")]
    ReservedName { name: String, state: String },

    #[error("State \"{state}\" is defined more than once")]
    DuplicateState { state: String },

    #[error("Transition \"{name}\" is defined more than once in state \"{state}\"")]
    DuplicateTransition { name: String, state: String },

    #[error("Transition names must not be empty (state \"{state}\")")]
    EmptyTransitionName { state: String },

    #[error("Failed to parse transition table: {0}")]
    Parse(String),
}
