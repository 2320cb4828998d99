//! Builder for constructing stores.

use crate::builder::error::BuildError;
use crate::core::{State, StateLog};
use crate::store::HistoryStore;
use std::num::NonZeroUsize;

/// Builder for constructing a [`HistoryStore`] with a fluent API.
pub struct HistoryStoreBuilder<S: State> {
    initial: Option<S>,
    history_limit: Option<usize>,
}

impl<S: State> HistoryStoreBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            history_limit: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Retain at most `limit` snapshots, evicting the oldest first.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Keep every snapshot (the default).
    pub fn unbounded(mut self) -> Self {
        self.history_limit = None;
        self
    }

    /// Build the store.
    /// Returns an error if required fields are missing or invalid.
    pub fn build(self) -> Result<HistoryStore<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let limit = match self.history_limit {
            Some(limit) => Some(NonZeroUsize::new(limit).ok_or(BuildError::ZeroHistoryLimit)?),
            None => None,
        };

        Ok(HistoryStore::from_log(StateLog::with_limit(initial, limit)))
    }
}

impl<S: State> Default for HistoryStoreBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
