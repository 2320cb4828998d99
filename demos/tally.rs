//! Tally Store
//!
//! This example demonstrates a counter driven by named reducers.
//!
//! Key concepts:
//! - Reducers as an action enum implementing `Reducer`
//! - A subscriber printing every `(next, prev)` pair
//! - Structured logging through `tracing`
//!
//! Run with: RUST_LOG=hindsight=debug cargo run --example tally

use hindsight::core::{Reducer, State};
use hindsight::create_store;
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug)]
struct Tally {
    count: i64,
}

impl State for Tally {
    fn name(&self) -> &str {
        "Tally"
    }
}

#[derive(Clone, Copy, Debug)]
enum TallyAction {
    Add,
    Subtract,
    Reset,
}

impl Reducer<Tally> for TallyAction {
    fn reduce(&self, state: &Tally) -> Tally {
        match self {
            Self::Add => Tally {
                count: state.count + 1,
            },
            Self::Subtract => Tally {
                count: state.count - 1,
            },
            Self::Reset => Tally { count: 0 },
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Reset => "reset",
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Tally Store Example ===\n");

    let mut store = create_store(Tally { count: 0 });
    store.subscribe(|next: &Tally, prev: &Tally| {
        println!("  old value: {:?}, new value: {:?}", prev, next);
    });

    println!("Scenario 1: {:?}", store.get_state());

    store.dispatch_action(TallyAction::Add);
    store.dispatch_action(TallyAction::Add);
    println!("Scenario 2: {:?}", store.get_state());

    store.dispatch_action(TallyAction::Subtract);
    println!("Scenario 3: {:?}", store.get_state());

    store.dispatch_action(TallyAction::Reset);
    println!("Scenario 4: {:?}", store.get_state());

    println!("\nHistory: {:?}", store.log().get_path());
    println!("\n=== Example Complete ===");
}
