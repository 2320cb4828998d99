//! Hindsight: a history-aware observable state store
//!
//! Hindsight keeps every state an application passes through as an immutable
//! snapshot in an ordered log. New states are produced by pure reducer
//! functions, observers are notified synchronously on every transition, and
//! a cursor lets callers step back and forth through recorded history.
//!
//! # Core Concepts
//!
//! - **State**: Any `Debug + 'static` value implementing the `State` trait
//! - **Reducers**: Pure functions `&S -> S` that compute the next snapshot
//! - **Log**: Append-only snapshots plus a cursor marking the live one
//! - **Subscribers**: Callbacks receiving `(next, prev)` on each transition
//!
//! Dispatching after a rewind discards the rewound future: history is linear.
//!
//! # Example
//!
//! ```rust
//! use hindsight::core::State;
//! use hindsight::create_store;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Tally {
//!     count: i64,
//! }
//!
//! impl State for Tally {
//!     fn name(&self) -> &str {
//!         "Tally"
//!     }
//! }
//!
//! fn add(tally: &Tally) -> Tally {
//!     Tally { count: tally.count + 1 }
//! }
//!
//! let mut store = create_store(Tally { count: 0 });
//! store.subscribe(|next: &Tally, prev: &Tally| {
//!     println!("{} -> {}", prev.count, next.count);
//! });
//!
//! store.dispatch(add);
//! store.dispatch(add);
//! assert_eq!(store.get_state().count, 2);
//!
//! store.rewind();
//! assert_eq!(store.get_state().count, 1);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod store;

// Re-export commonly used types
pub use builder::{BuildError, HistoryStoreBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{Reducer, Snapshot, State, StateLog, StateTransition, TransitionKind};
pub use store::{create_store, HistoryStore, SubscriberError, SubscriptionId};
