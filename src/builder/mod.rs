//! Builder API for ergonomic table and machine construction.
//!
//! This module provides fluent builders and a macro for creating transition
//! tables and machines with minimal boilerplate.

pub mod machine;
pub mod macros;
pub mod table;

pub use machine::MachineBuilder;
pub use table::{StateBuilder, TableBuilder};

use crate::core::{ConfigurationError, TransitionTable};

/// Build a table where one transition walks the given states in a ring.
///
/// # Example
///
/// ```
/// use switchyard::builder::cycle;
/// use switchyard::TransitionTable;
///
/// let table: TransitionTable = cycle("next", ["red", "green", "yellow"]).unwrap();
///
/// let yellow = table.state("yellow").unwrap();
/// assert_eq!(yellow.target("next").unwrap().as_literal(), Some("red"));
/// ```
pub fn cycle<C, I, S>(transition: &str, states: I) -> Result<TransitionTable<C>, ConfigurationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let states: Vec<String> = states.into_iter().map(Into::into).collect();
    let mut builder = TableBuilder::new();

    for (index, state) in states.iter().enumerate() {
        let next = states[(index + 1) % states.len()].clone();
        builder = builder.state(state.clone(), |s| s.on(transition, next));
    }

    builder.build()
}
