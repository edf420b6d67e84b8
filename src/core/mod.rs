//! Core table and selector types.
//!
//! This module contains the declarative half of the engine:
//! - Transition tables and their per-state definitions
//! - Transition targets, literal or computed
//! - Selectors used to key transition callbacks
//! - Switch history records
//!
//! Nothing in here mutates a running machine.

mod error;
mod history;
mod selector;
mod table;
mod target;

pub use error::ConfigurationError;
pub use history::{StateHistory, StateTransition};
pub use selector::{Selector, Selectors};
pub use table::{is_reserved, StateDefinition, TransitionTable, RESERVED_NAMES};
pub use target::{TargetFn, TransitionTarget};
