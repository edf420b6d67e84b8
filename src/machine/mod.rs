//! Running machines: operation synthesis, guarded switching and callback
//! dispatch.
//!
//! # Key Concepts
//!
//! - **Operations**: on entering a state, every transition name known to the
//!   table is bound either to a switch or to a rejection
//! - **Switching**: `switch_state` validates the target, installs its
//!   operations and runs callbacks; `set_state` only overrides the state
//! - **Callbacks**: four tiers run after every switch, in this order:
//!   any → any, old → new, old → any, any → new
//!
//! Everything is synchronous. Callbacks receive the machine itself and may
//! switch it again; such re-entrant switches complete before the outer
//! dispatch continues.

mod callbacks;
mod engine;
mod error;
mod operations;

pub use callbacks::{callback, Callback, CallbackIndex};
pub use engine::{Machine, RejectionHook};
pub use error::{Attempt, InvalidTransition, MachineError};
