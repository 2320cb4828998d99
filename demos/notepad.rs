//! Notepad With History
//!
//! This example demonstrates time travel over a line-based notepad.
//!
//! Key concepts:
//! - Saving input through a reducer closure
//! - Stepping through history with `rewind` and `forward`
//! - A subscriber standing in for a display
//!
//! Commands: `:back`, `:forward`, `:history`, `:quit`. Any other line is saved.
//!
//! Run with: cargo run --example notepad

use hindsight::core::State;
use hindsight::create_store;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug)]
struct Notepad {
    words: String,
}

impl State for Notepad {
    fn name(&self) -> &str {
        "Notepad"
    }
}

fn update(input: String) -> impl FnOnce(&Notepad) -> Notepad {
    move |_: &Notepad| Notepad { words: input }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut store = create_store(Notepad {
        words: "begin".to_string(),
    });
    store.subscribe(|next: &Notepad, _: &Notepad| {
        println!("[display] {}", next.words);
    });

    println!("[display] {}", store.get_state().words);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        match input {
            ":quit" => break,
            ":back" => {
                if store.rewind().is_none() {
                    println!("(already at the oldest note)");
                }
            }
            ":forward" => {
                if store.forward().is_none() {
                    println!("(already at the newest note)");
                }
            }
            ":history" => {
                for (index, pad) in store.log().get_path().into_iter().enumerate() {
                    let marker = if index == store.cursor() { '>' } else { ' ' };
                    println!("{} {}: {}", marker, index, pad.words);
                }
            }
            "" => {}
            _ => {
                store.dispatch(update(input.to_string()));
            }
        }
        stdout.flush()?;
    }

    Ok(())
}
