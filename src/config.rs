//! Loading transition tables from configuration.
//!
//! Only literal targets can be expressed as data. The expected shape is a
//! flat object of states, each an object of transition name to next state:
//!
//! ```json
//! {
//!     "locked":   { "coin": "unlocked" },
//!     "unlocked": { "push": "locked", "coin": "unlocked" }
//! }
//! ```

use crate::core::{ConfigurationError, StateDefinition, TransitionTable, TransitionTarget};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serializable form of a literal-only transition table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableConfig {
    pub states: BTreeMap<String, BTreeMap<String, String>>,
}

impl TableConfig {
    /// Convert into a validated table.
    pub fn into_table<C>(self) -> Result<TransitionTable<C>, ConfigurationError> {
        let states = self
            .states
            .into_iter()
            .map(|(state, transitions)| {
                let transitions = transitions
                    .into_iter()
                    .map(|(name, target)| (name, TransitionTarget::Literal(target)))
                    .collect();
                (state, StateDefinition::new(transitions))
            })
            .collect();

        TransitionTable::from_states(states)
    }
}

impl<C> TransitionTable<C> {
    /// Parse a table from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: TableConfig = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.into_table()
    }

    /// Build a table from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigurationError> {
        let config: TableConfig = serde_json::from_value(value)
            .map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.into_table()
    }

    /// Read and parse a JSON table file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Parse(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loading transition table from {}", path.display());
        Self::from_json(&json)
    }

    /// Export the literal part of the table.
    ///
    /// Computed targets have no data form and are left out; states whose
    /// transitions are all computed are kept with no transitions.
    pub fn to_config(&self) -> TableConfig {
        let states = self
            .states()
            .map(|(state, definition)| {
                let transitions = definition
                    .transitions()
                    .filter_map(|(name, target)| {
                        target
                            .as_literal()
                            .map(|next| (name.to_string(), next.to_string()))
                    })
                    .collect();
                (state.to_string(), transitions)
            })
            .collect();

        TableConfig { states }
    }
}
