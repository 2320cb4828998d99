//! Core store types.
//!
//! This module contains the pure data side of the store:
//! - State definitions via the `State` trait
//! - Named reducers via the `Reducer` trait
//! - The snapshot log and its cursor
//!
//! Nothing here notifies observers; that happens in [`crate::store`].

mod history;
mod reducer;
mod state;

pub use history::{Snapshot, StateLog, StateTransition, TransitionKind};
pub use reducer::Reducer;
pub use state::State;
