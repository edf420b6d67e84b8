//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic transition tables built with `cycle`, extended through the builder
//! - Global callbacks observing every switch
//! - Rejected transitions leaving the state untouched
//! - A bounded history for a machine that never stops
//!
//! Run with: cargo run --example traffic_light

use switchyard::builder::{cycle, MachineBuilder};
use switchyard::{Attempt, MachineError, TransitionTable};

fn main() -> Result<(), MachineError> {
    tracing_subscriber::fmt()
        .with_env_filter("switchyard=debug")
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let timed: TransitionTable = cycle("timer", ["red", "green", "yellow"])?;
    println!("Timed cycle covers {} states", timed.len());

    // Pedestrians may cut a green phase short; every other phase ignores them.
    let table: TransitionTable = TransitionTable::builder()
        .state("red", |s| s.on("timer", "green"))
        .state("green", |s| s.on("timer", "yellow").on("walk", "yellow"))
        .state("yellow", |s| s.on("timer", "red"))
        .build()?;

    let mut light = MachineBuilder::new(table)
        .initial("red")
        .history_limit(8)
        .build()?;

    light.bind(|_, from, to| {
        println!("  {} -> {}", from, to);
        Ok(())
    });

    println!("Initial state: {}\n", light.current_state());
    println!("Transition sequence:");
    for _ in 0..3 {
        light.fire("timer")?;
    }

    println!("\nPedestrian presses the button while {}:", light.current_state());
    match light.attempt("walk", &[])? {
        Attempt::Switched { from, to } => println!("  cut short: {} -> {}", from, to),
        Attempt::Rejected(rejection) => println!("  ignored: {}", rejection),
    }
    println!("Still {}", light.current_state());

    for _ in 0..20 {
        light.fire("timer")?;
    }

    println!("\nThis is a cyclic state machine - the sequence repeats:");
    println!("  red -> green -> yellow -> red -> green -> ...");
    println!("Current state: {}", light.current_state());
    println!(
        "History keeps the last {} of 23 switches",
        light.history().len()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
