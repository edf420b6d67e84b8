//! Turnstile
//!
//! A coin-operated turnstile embedded in a host context that counts coins
//! and passages. The table is loaded from JSON; callbacks update the context.
//!
//! Key concepts:
//! - Loading a literal table from configuration
//! - Context threaded through callbacks
//! - Reporting invalid transitions instead of failing
//!
//! Run with: cargo run --example turnstile

use switchyard::{Machine, MachineError, TransitionTable};

#[derive(Debug, Default)]
struct Turnstile {
    coins: u32,
    passages: u32,
    refused: u32,
}

const TABLE: &str = r#"{
    "locked":   { "coin": "unlocked" },
    "unlocked": { "push": "locked", "coin": "unlocked" }
}"#;

fn main() -> Result<(), MachineError> {
    tracing_subscriber::fmt()
        .with_env_filter("switchyard=debug")
        .init();

    println!("=== Turnstile Example ===\n");

    let table: TransitionTable<Turnstile> = TransitionTable::from_json(TABLE)?;
    let mut turnstile: Machine<Turnstile> = Machine::new(table, "locked")?;

    turnstile.on_transition_from_to(["locked", "unlocked"], "unlocked", |m, _, _| {
        m.context_mut().coins += 1;
        Ok(())
    });
    turnstile.on_transition_from_to("unlocked", "locked", |m, _, _| {
        m.context_mut().passages += 1;
        Ok(())
    });
    turnstile.on_invalid_transition(|m, rejection| {
        println!("  refused: {}", rejection);
        m.context_mut().refused += 1;
        Ok(())
    });

    turnstile
        .fire("push")?
        .fire("coin")?
        .fire("coin")?
        .fire("push")?
        .fire("push")?;

    println!("\nFinal state: {}", turnstile.current_state());
    println!("Context: {:?}", turnstile.context());
    println!("Path: {}", turnstile.history().get_path().join(" -> "));

    println!("\n=== Example Complete ===");
    Ok(())
}
