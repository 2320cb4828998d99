//! The observable store around the pure core.
//!
//! This module provides the stateful shell: the [`HistoryStore`] that owns
//! the snapshot log, applies reducers, moves the cursor, and notifies the
//! [`SubscriberRegistry`] on every effective transition.
//!
//! # Key Concepts
//!
//! - **Dispatch**: truncate any rewound future, reduce, notify, commit
//! - **Time travel**: `rewind`/`forward` move the cursor one step, no-op at the edges
//! - **Fault isolation**: subscriber errors and panics are logged, never propagated

mod error;
mod history_store;
mod subscribers;

pub use error::SubscriberError;
pub use history_store::HistoryStore;
pub use subscribers::{SubscriberRegistry, SubscriptionId};

use crate::core::State;

/// Create an unbounded store holding `initial` as its only snapshot.
///
/// # Example
///
/// ```rust
/// use hindsight::create_store;
///
/// let store = create_store(String::from("begin"));
/// assert_eq!(store.get_state(), "begin");
/// assert_eq!(store.cursor(), 0);
/// ```
pub fn create_store<S: State>(initial: S) -> HistoryStore<S> {
    HistoryStore::new(initial)
}
