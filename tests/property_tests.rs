//! Property-based tests for tables and machines.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated tables and call sequences.

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use switchyard::builder::TableBuilder;
use switchyard::{Machine, MachineError, TransitionTable};

const TRANSITIONS: [&str; 4] = ["advance", "retreat", "reset", "jump"];

/// Raw shape of a table: for each state, an optional target index per
/// transition name.
type Shape = Vec<Vec<Option<usize>>>;

prop_compose! {
    fn arbitrary_shape()(states in 1..6usize)(
        shape in prop::collection::vec(
            prop::collection::vec(prop::option::of(0..states), TRANSITIONS.len()),
            states,
        )
    ) -> Shape {
        shape
    }
}

fn state_name(index: usize) -> String {
    format!("s{}", index)
}

fn build_table(shape: &Shape) -> TransitionTable {
    let mut builder = TableBuilder::new();
    for (index, targets) in shape.iter().enumerate() {
        let targets = targets.clone();
        builder = builder.state(state_name(index), move |mut s| {
            for (name, target) in TRANSITIONS.iter().zip(targets) {
                if let Some(target) = target {
                    s = s.on(*name, state_name(target));
                }
            }
            s
        });
    }
    builder.build().unwrap()
}

fn expected_target(shape: &Shape, state: &str, transition: &str) -> Option<String> {
    let index: usize = state.trim_start_matches('s').parse().ok()?;
    let slot = TRANSITIONS.iter().position(|t| *t == transition)?;
    shape[index][slot].map(state_name)
}

proptest! {
    #[test]
    fn construction_starts_in_initial_state(shape in arbitrary_shape(), pick in any::<prop::sample::Index>()) {
        let initial = state_name(pick.index(shape.len()));
        let machine: Machine = Machine::new(build_table(&shape), initial.clone()).unwrap();
        prop_assert_eq!(machine.current_state(), initial.as_str());
    }

    #[test]
    fn unknown_initial_state_is_rejected(shape in arbitrary_shape()) {
        let result = Machine::<()>::new(build_table(&shape), "missing");
        prop_assert!(result.is_err());
    }

    #[test]
    fn fired_transitions_follow_the_table(
        shape in arbitrary_shape(),
        calls in prop::collection::vec(prop::sample::select(TRANSITIONS.to_vec()), 0..20)
    ) {
        let table = build_table(&shape);
        let known: Vec<String> = table.transition_names().into_iter().map(str::to_string).collect();
        let mut machine: Machine = Machine::new(table, "s0").unwrap();

        for call in calls {
            let before = machine.current_state().to_string();
            let result = machine.fire(call);

            if !known.iter().any(|k| k == call) {
                prop_assert!(matches!(result, Err(MachineError::UnknownTransition { .. })), "expected unknown transition");
                continue;
            }
            prop_assert!(result.is_ok());

            match expected_target(&shape, &before, call) {
                Some(target) => prop_assert_eq!(machine.current_state(), target.as_str()),
                None => prop_assert_eq!(machine.current_state(), before.as_str()),
            }
            prop_assert!(machine.states().contains_state(machine.current_state()));
        }
    }

    #[test]
    fn global_callbacks_fire_once_per_switch(
        shape in arbitrary_shape(),
        calls in prop::collection::vec(prop::sample::select(TRANSITIONS.to_vec()), 0..20)
    ) {
        let mut machine: Machine = Machine::new(build_table(&shape), "s0").unwrap();
        let switches = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&switches);
        machine.bind(move |_, _, _| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        for call in calls {
            let _ = machine.fire(call);
        }

        prop_assert_eq!(switches.load(Ordering::SeqCst), machine.history().len());
    }

    #[test]
    fn set_state_never_runs_callbacks(shape in arbitrary_shape(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..10)) {
        let mut machine: Machine = Machine::new(build_table(&shape), "s0").unwrap();
        let switches = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&switches);
        machine.bind(move |_, _, _| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        for pick in picks {
            let state = state_name(pick.index(shape.len()));
            machine.set_state(&state).unwrap();
            prop_assert_eq!(machine.current_state(), state.as_str());
        }

        prop_assert_eq!(switches.load(Ordering::SeqCst), 0);
        prop_assert!(machine.history().is_empty());
    }

    #[test]
    fn switching_to_unknown_state_changes_nothing(shape in arbitrary_shape(), name in "[a-z]{1,8}") {
        let mut machine: Machine = Machine::new(build_table(&shape), "s0").unwrap();
        let result = machine.switch_state(&name);

        prop_assert!(matches!(result, Err(MachineError::InvalidState { .. })), "expected invalid state");
        prop_assert_eq!(machine.current_state(), "s0");
    }

    #[test]
    fn config_export_round_trips(shape in arbitrary_shape()) {
        let table = build_table(&shape);
        let json = serde_json::to_string(&table.to_config()).unwrap();
        let reloaded: TransitionTable = TransitionTable::from_json(&json).unwrap();

        prop_assert_eq!(table.to_config(), reloaded.to_config());
    }
}
