//! Builder for constructing machines.

use crate::core::{ConfigurationError, TransitionTable};
use crate::machine::Machine;
use std::sync::Arc;

/// Builder for machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use switchyard::builder::MachineBuilder;
/// use switchyard::TransitionTable;
///
/// let table: TransitionTable<u32> = TransitionTable::builder()
///     .state("idle", |s| s.on("start", "running"))
///     .state("running", |s| s.on("stop", "idle"))
///     .build()
///     .unwrap();
///
/// let machine = MachineBuilder::new(table)
///     .initial("idle")
///     .context(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), "idle");
/// assert_eq!(*machine.context(), 7);
/// ```
pub struct MachineBuilder<C> {
    table: Arc<TransitionTable<C>>,
    initial: Option<String>,
    context: Option<C>,
    history_limit: Option<usize>,
}

impl<C> MachineBuilder<C> {
    pub fn new(table: impl Into<Arc<TransitionTable<C>>>) -> Self {
        Self {
            table: table.into(),
            initial: None,
            context: None,
            history_limit: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Set the context. Defaults to `C::default()`.
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Keep only the most recent `limit` switches in the machine's history.
    /// Unbounded by default.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build the machine.
    pub fn build(mut self) -> Result<Machine<C>, ConfigurationError>
    where
        C: Default,
    {
        let context = self.context.take().unwrap_or_default();
        self.finish(context)
    }

    /// Build the machine with an explicit context, for context types
    /// without a default.
    pub fn build_with(self, context: C) -> Result<Machine<C>, ConfigurationError> {
        self.finish(context)
    }

    fn finish(self, context: C) -> Result<Machine<C>, ConfigurationError> {
        let initial = self.initial.ok_or(ConfigurationError::MissingInitialState)?;
        let machine = Machine::create(self.table, initial, context)?;
        Ok(match self.history_limit {
            Some(limit) => machine.with_history_limit(limit),
            None => machine,
        })
    }
}
