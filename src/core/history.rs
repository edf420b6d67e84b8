//! Switch history tracking.
//!
//! Every guarded switch is recorded in order with its timestamp and the
//! transition that caused it. Direct `set_state` overrides are not switches
//! and never show up here. A history may be bounded, in which case the oldest
//! records are evicted first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single switch.
///
/// # Example
///
/// ```rust
/// use switchyard::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "two".to_string(),
///     to: "three".to_string(),
///     trigger: Some("increment".to_string()),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.trigger.as_deref(), Some("increment"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being switched from
    pub from: String,
    /// The state being switched to
    pub to: String,
    /// Transition name that requested the switch, `None` for a direct
    /// `switch_state` call
    pub trigger: Option<String>,
    /// When the switch occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of switches, optionally capped to the most recent
/// `limit` records.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: "one".to_string(),
///     to: "two".to_string(),
///     trigger: None,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: "two".to_string(),
///     to: "three".to_string(),
///     trigger: None,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["one", "two", "three"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    #[serde(default)]
    limit: Option<usize>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// A history that keeps at most `limit` switches. A limit of zero
    /// records nothing.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a switch, evicting the oldest records beyond the limit.
    pub fn record(&mut self, transition: StateTransition) {
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Drop every record, keeping the limit.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// States traversed: the first origin, then the destination of each
    /// switch.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Time between the first and the last recorded switch.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    /// Retained switches, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition> + '_ {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch(from: &str, to: &str) -> StateTransition {
        StateTransition {
            from: from.to_string(),
            to: to.to_string(),
            trigger: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = StateHistory::new();
        history.record(switch("one", "two"));
        history.record(switch("two", "three"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|t| t.to.as_str()), Some("three"));
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(switch("two", "three"));
        history.record(switch("three", "two"));
        history.record(switch("two", "one"));

        assert_eq!(history.get_path(), vec!["two", "three", "two", "one"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.record(switch("one", "two"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(switch("two", "three"));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_switch_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(switch("one", "two"));

        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::new();
        history.record(StateTransition {
            trigger: Some("increment".to_string()),
            ..switch("one", "two")
        });

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert!(history.transitions().eq(deserialized.transitions()));
        assert_eq!(deserialized.limit(), None);
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = StateHistory::with_limit(2);
        history.record(switch("one", "two"));
        history.record(switch("two", "three"));
        history.record(switch("three", "four"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec!["two", "three", "four"]);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.record(switch("one", "two"));

        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(0));
    }

    #[test]
    fn clear_keeps_limit() {
        let mut history = StateHistory::with_limit(3);
        history.record(switch("one", "two"));
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(3));
    }
}
