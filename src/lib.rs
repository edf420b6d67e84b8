//! Switchyard: a declarative, table-driven state machine
//!
//! A machine is configured with a transition table (for every state, the
//! transitions it accepts and where each one leads) and embedded in a host
//! context whose behavior varies by state. Firing a transition resolves its
//! target, switches state, re-binds the transitions legal in the new state
//! and runs the registered callbacks.
//!
//! # Core Concepts
//!
//! - **Table**: flat per-state mapping of transition name to next state,
//!   validated once and shared immutably
//! - **Targets**: literal state names, or computations over the context and
//!   the call arguments (`fire(name)` passes none, `fire_with(name, args)`
//!   forwards JSON values)
//! - **Rejections**: firing a transition the current state does not declare
//!   is reported, not raised, and leaves the machine unchanged
//! - **Callbacks**: keyed by (from, to) selectors with a wildcard, dispatched
//!   in four fixed tiers after every switch
//!
//! # Example
//!
//! ```rust
//! use switchyard::{Machine, TransitionTable};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let table: TransitionTable = TransitionTable::builder()
//!     .state("one", |s| s.on("increment", "two"))
//!     .state("two", |s| s.on("increment", "three").computed("decrement", |_, _| "one"))
//!     .state("three", |s| s.on("increment", "four").on("decrement", "two"))
//!     .state("four", |s| s.on("increment", "one").on("decrement", "three"))
//!     .build()
//!     .unwrap();
//!
//! let mut machine: Machine = Machine::new(table, "two").unwrap();
//!
//! let switches = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&switches);
//! machine.bind(move |_, _, _| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     Ok(())
//! });
//!
//! machine.fire("increment").unwrap().fire("increment").unwrap();
//! assert_eq!(machine.current_state(), "four");
//! assert_eq!(switches.load(Ordering::SeqCst), 2);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{ConfigurationError, Selector, Selectors, TransitionTable, TransitionTarget};
pub use crate::machine::{Attempt, InvalidTransition, Machine, MachineError};
