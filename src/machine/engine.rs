//! State machine driven by a declarative transition table.

use crate::core::{
    ConfigurationError, Selector, Selectors, StateHistory, StateTransition, TransitionTable,
};
use crate::machine::callbacks::{Callback, CallbackIndex};
use crate::machine::error::{Attempt, InvalidTransition, MachineError};
use crate::machine::operations::{Operation, Operations};
use chrono::Utc;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Hook run when a transition is requested that the current state does not
/// declare.
pub type RejectionHook<C> =
    Arc<dyn Fn(&mut Machine<C>, &InvalidTransition) -> Result<(), MachineError> + Send + Sync>;

/// A state machine embedded in a context of type `C`.
///
/// The machine owns its context and threads it explicitly through target
/// computations (`&mut C`) and callbacks (via `&mut Machine<C>`). Use `()`
/// when the machine itself is the only context needed.
///
/// # Example
///
/// ```rust
/// use switchyard::{Machine, TransitionTable};
///
/// let table: TransitionTable = TransitionTable::builder()
///     .state("one", |s| s.on("increment", "two"))
///     .state("two", |s| s.on("increment", "three").computed("decrement", |_, _| "one"))
///     .state("three", |s| s.on("increment", "four").on("decrement", "two"))
///     .state("four", |s| s.on("increment", "one").on("decrement", "three"))
///     .build()
///     .unwrap();
///
/// let mut machine: Machine = Machine::new(table, "two").unwrap();
/// assert_eq!(machine.fire("increment").unwrap().current_state(), "three");
/// assert_eq!(machine.fire("decrement").unwrap().current_state(), "two");
/// ```
pub struct Machine<C = ()> {
    table: Arc<TransitionTable<C>>,
    context: C,
    current: String,
    operations: Operations<C>,
    callbacks: CallbackIndex<C>,
    rejection_hooks: Vec<RejectionHook<C>>,
    history: StateHistory,
}

impl<C: Default> Machine<C> {
    /// Create a machine with a default context.
    pub fn new(
        table: impl Into<Arc<TransitionTable<C>>>,
        initial: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        Self::create(table, initial, C::default())
    }
}

impl<C> Machine<C> {
    /// Create a machine in `initial`, running against `context`.
    ///
    /// Fails if the table is empty or does not declare `initial`.
    pub fn create(
        table: impl Into<Arc<TransitionTable<C>>>,
        initial: impl Into<String>,
        context: C,
    ) -> Result<Self, ConfigurationError> {
        let table = table.into();
        let initial = initial.into();

        if table.is_empty() {
            return Err(ConfigurationError::EmptyTable);
        }
        if !table.contains_state(&initial) {
            return Err(ConfigurationError::UnknownInitialState { state: initial });
        }

        let operations = Operations::synthesize(&table, &initial);
        tracing::debug!(
            "Created state machine with {} states in state {}",
            table.len(),
            initial
        );

        Ok(Self {
            table,
            context,
            current: initial,
            operations,
            callbacks: CallbackIndex::new(),
            rejection_hooks: Vec::new(),
            history: StateHistory::new(),
        })
    }

    pub fn current_state(&self) -> &str {
        &self.current
    }

    /// Check whether the machine is currently in `state`.
    pub fn is_in(&self, state: &str) -> bool {
        self.current == state
    }

    /// The transition table driving this machine.
    pub fn states(&self) -> &TransitionTable<C> {
        &self.table
    }

    /// Shared handle to the table, for building sibling machines.
    pub fn table(&self) -> Arc<TransitionTable<C>> {
        Arc::clone(&self.table)
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Switches performed through `switch_state` or fired transitions.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Keep only the most recent `limit` switches in the history.
    ///
    /// Records beyond the new limit are evicted immediately.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        let mut bounded = StateHistory::with_limit(limit);
        for transition in std::mem::take(&mut self.history).transitions().cloned() {
            bounded.record(transition);
        }
        self.history = bounded;
        self
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Take the recorded switches, leaving an empty history with the same
    /// limit behind.
    pub fn take_history(&mut self) -> StateHistory {
        let empty = match self.history.limit() {
            Some(limit) => StateHistory::with_limit(limit),
            None => StateHistory::new(),
        };
        std::mem::replace(&mut self.history, empty)
    }

    /// Transition names that switch states right now, in name order.
    ///
    /// This reflects the operations installed by the last guarded switch,
    /// which `set_state` deliberately leaves in place.
    pub fn available_transitions(&self) -> Vec<&str> {
        self.operations.available().collect()
    }

    /// Every transition name declared anywhere in the table.
    pub fn known_transitions(&self) -> Vec<&str> {
        self.operations.known().collect()
    }

    /// Check whether firing `transition` now would switch states.
    pub fn can_fire(&self, transition: &str) -> bool {
        matches!(self.operations.get(transition), Some(Operation::Switch(_)))
    }

    /// Fire a transition without arguments. Returns the machine for chaining.
    pub fn fire(&mut self, transition: &str) -> Result<&mut Self, MachineError> {
        self.fire_with(transition, &[])
    }

    /// Fire a transition, passing `args` to a computed target.
    ///
    /// A transition the current state does not declare is reported through
    /// the diagnostic channel and leaves the machine unchanged; use
    /// [`Machine::attempt`] to observe that outcome.
    pub fn fire_with(&mut self, transition: &str, args: &[Value]) -> Result<&mut Self, MachineError> {
        self.attempt(transition, args)?;
        Ok(self)
    }

    /// Fire a transition and report whether it switched or was rejected.
    ///
    /// Errors only for names no state declares, targets naming an
    /// undeclared state, and failing callbacks.
    pub fn attempt(&mut self, transition: &str, args: &[Value]) -> Result<Attempt, MachineError> {
        let target = match self.operations.get(transition) {
            None => {
                return Err(MachineError::UnknownTransition {
                    name: transition.to_string(),
                })
            }
            Some(Operation::Reject) => {
                let rejection = InvalidTransition {
                    transition: transition.to_string(),
                    state: self.current.clone(),
                };
                tracing::warn!("{}", rejection);
                self.run_rejection_hooks(&rejection)?;
                return Ok(Attempt::Rejected(rejection));
            }
            Some(Operation::Switch(target)) => target.clone(),
        };

        let next = target.resolve(&mut self.context, args);
        let from = self.current.clone();
        self.switch_to(next.clone(), Some(transition))?;

        Ok(Attempt::Switched { from, to: next })
    }

    /// Switch to `next`, installing its operations and running callbacks.
    ///
    /// Fails without changing anything if the table has no such state.
    pub fn switch_state(&mut self, next: &str) -> Result<&mut Self, MachineError> {
        self.switch_to(next.to_string(), None)?;
        Ok(self)
    }

    /// Override the current state directly.
    ///
    /// Unlike [`Machine::switch_state`] this runs no callbacks, records no
    /// history and keeps the operations of the previous state installed. It
    /// only checks that `state` exists.
    pub fn set_state(&mut self, state: &str) -> Result<&mut Self, MachineError> {
        if !self.table.contains_state(state) {
            return Err(MachineError::InvalidState {
                state: state.to_string(),
            });
        }
        self.current = state.to_string();
        Ok(self)
    }

    fn switch_to(&mut self, next: String, trigger: Option<&str>) -> Result<(), MachineError> {
        if !self.table.contains_state(&next) {
            return Err(MachineError::InvalidState { state: next });
        }

        self.operations = Operations::synthesize(&self.table, &next);
        let old = std::mem::replace(&mut self.current, next.clone());

        self.history.record(StateTransition {
            from: old.clone(),
            to: next.clone(),
            trigger: trigger.map(str::to_string),
            timestamp: Utc::now(),
        });
        tracing::debug!("Switched state from {} to {}", old, next);

        self.run_callbacks(&old, &next)
    }

    fn run_callbacks(&mut self, old: &str, new: &str) -> Result<(), MachineError> {
        let from = Selector::state(old);
        let to = Selector::state(new);
        let tiers = [
            (Selector::Any, Selector::Any),
            (from.clone(), to.clone()),
            (from, Selector::Any),
            (Selector::Any, to),
        ];

        for (from, to) in &tiers {
            let callbacks = self.callbacks.lookup(from, to);
            if callbacks.is_empty() {
                continue;
            }
            tracing::trace!("Running {} callbacks for {} -> {}", callbacks.len(), from, to);
            for callback in callbacks {
                callback(self, old, new)?;
            }
        }

        Ok(())
    }

    fn run_rejection_hooks(&mut self, rejection: &InvalidTransition) -> Result<(), MachineError> {
        let hooks = self.rejection_hooks.clone();
        for hook in hooks {
            hook(self, rejection)?;
        }
        Ok(())
    }

    /// Register a callback for switches from any of `from` to any of `to`.
    ///
    /// Either side accepts a state name, [`Selector::Any`] or a collection of
    /// names; collections fan out to one registration per pair. The callback
    /// receives the old and the new state.
    pub fn on_transition_from_to<F>(
        &mut self,
        from: impl Into<Selectors>,
        to: impl Into<Selectors>,
        callback: F,
    ) where
        F: Fn(&mut Machine<C>, &str, &str) -> Result<(), MachineError> + Send + Sync + 'static,
    {
        self.register(from.into(), to.into(), Arc::new(callback));
    }

    /// Register a callback for switches leaving any of `from`. The callback
    /// receives the new state.
    pub fn on_transition_from<F>(&mut self, from: impl Into<Selectors>, callback: F)
    where
        F: Fn(&mut Machine<C>, &str) -> Result<(), MachineError> + Send + Sync + 'static,
    {
        self.register(
            from.into(),
            Selectors::any(),
            Arc::new(move |machine: &mut Machine<C>, _old: &str, new: &str| {
                callback(machine, new)
            }),
        );
    }

    /// Register a callback for switches entering any of `to`. The callback
    /// receives the old state.
    pub fn on_transition_to<F>(&mut self, to: impl Into<Selectors>, callback: F)
    where
        F: Fn(&mut Machine<C>, &str) -> Result<(), MachineError> + Send + Sync + 'static,
    {
        self.register(
            Selectors::any(),
            to.into(),
            Arc::new(move |machine: &mut Machine<C>, old: &str, _new: &str| {
                callback(machine, old)
            }),
        );
    }

    /// Register a callback for every switch.
    pub fn bind<F>(&mut self, callback: F)
    where
        F: Fn(&mut Machine<C>, &str, &str) -> Result<(), MachineError> + Send + Sync + 'static,
    {
        self.register(Selectors::any(), Selectors::any(), Arc::new(callback));
    }

    /// Same as [`Machine::bind`].
    pub fn on_transition<F>(&mut self, callback: F)
    where
        F: Fn(&mut Machine<C>, &str, &str) -> Result<(), MachineError> + Send + Sync + 'static,
    {
        self.bind(callback);
    }

    /// Register a hook for rejected transition attempts.
    pub fn on_invalid_transition<F>(&mut self, hook: F)
    where
        F: Fn(&mut Machine<C>, &InvalidTransition) -> Result<(), MachineError>
            + Send
            + Sync
            + 'static,
    {
        self.rejection_hooks.push(Arc::new(hook));
    }

    /// Number of callbacks registered for exactly this selector pair.
    pub fn callback_count(&self, from: &Selector, to: &Selector) -> usize {
        self.callbacks.count(from, to)
    }

    fn register(&mut self, from: Selectors, to: Selectors, callback: Callback<C>) {
        tracing::trace!(
            "Registering callback for {} source and {} target selectors",
            from.len(),
            to.len()
        );
        self.callbacks.register(from, to, callback);
    }
}

impl<C: fmt::Debug> fmt::Debug for Machine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("operations_for", &self.operations.state())
            .field("states", &self.table.state_names().collect::<Vec<_>>())
            .field("callbacks", &self.callbacks.len())
            .field("context", &self.context)
            .finish()
    }
}
