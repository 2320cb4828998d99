//! Checkpoint and resume for stores.
//!
//! A checkpoint captures the retained snapshot log and cursor so a store can
//! be rebuilt later, for example in another process. Subscribers are not
//! captured. This module only converts to and from bytes; where those bytes
//! go is up to the caller.

use crate::core::{Snapshot, State, StateLog};
use crate::store::HistoryStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a store's history.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "S: Serialize", deserialize = "S: Deserialize<'de>"))]
pub struct Checkpoint<S> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Index of the live snapshot
    pub cursor: usize,

    /// Maximum number of retained snapshots, if bounded
    pub history_limit: Option<usize>,

    /// Retained snapshots, oldest first
    pub snapshots: Vec<Snapshot<S>>,
}

impl<S> Checkpoint<S> {
    /// Check structural invariants before a resume.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if self.snapshots.is_empty() {
            return Err(CheckpointError::ValidationFailed(
                "checkpoint holds no snapshots".to_string(),
            ));
        }

        if self.cursor >= self.snapshots.len() {
            return Err(CheckpointError::ValidationFailed(format!(
                "cursor {} out of bounds for {} snapshots",
                self.cursor,
                self.snapshots.len()
            )));
        }

        match self.history_limit {
            Some(0) => Err(CheckpointError::ValidationFailed(
                "history limit must be at least 1".to_string(),
            )),
            Some(limit) if self.snapshots.len() > limit => {
                Err(CheckpointError::ValidationFailed(format!(
                    "{} snapshots exceed history limit {}",
                    self.snapshots.len(),
                    limit
                )))
            }
            _ => Ok(()),
        }
    }
}

impl<S: Serialize> Checkpoint<S> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }
}

impl<S: DeserializeOwned> Checkpoint<S> {
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl<S: State> HistoryStore<S> {
    /// Capture the retained history and cursor.
    ///
    /// Snapshots are shared with the store, not copied.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        let log = self.log();
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            cursor: log.cursor(),
            history_limit: log.limit().map(NonZeroUsize::get),
            snapshots: log.snapshots().to_vec(),
        }
    }

    /// Rebuild a store from a checkpoint.
    ///
    /// The resumed store starts with no subscribers.
    pub fn resume(checkpoint: Checkpoint<S>) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        debug!(
            id = %checkpoint.id,
            cursor = checkpoint.cursor,
            len = checkpoint.snapshots.len(),
            "resuming store from checkpoint"
        );

        let limit = checkpoint.history_limit.and_then(NonZeroUsize::new);
        let log = StateLog::from_parts(checkpoint.snapshots, checkpoint.cursor, limit);
        Ok(Self::from_log(log))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Notepad {
        words: String,
    }

    impl State for Notepad {
        fn name(&self) -> &str {
            "Notepad"
        }
    }

    fn pad(words: &str) -> Notepad {
        Notepad {
            words: words.to_string(),
        }
    }

    fn rewound_store() -> HistoryStore<Notepad> {
        let mut store = HistoryStore::new(pad("begin"));
        store.dispatch(|_: &Notepad| pad("one"));
        store.dispatch(|_: &Notepad| pad("two"));
        store.rewind();
        store
    }

    #[test]
    fn checkpoint_captures_log_and_cursor() {
        let checkpoint = rewound_store().checkpoint();

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.cursor, 1);
        assert_eq!(checkpoint.snapshots.len(), 3);
        assert!(checkpoint.history_limit.is_none());
        assert!(Uuid::parse_str(&checkpoint.id).is_ok());
    }

    #[test]
    fn json_resume_restores_time_travel() {
        let json = rewound_store().checkpoint().to_json().unwrap();
        let checkpoint = Checkpoint::<Notepad>::from_json(&json).unwrap();
        let mut store = HistoryStore::resume(checkpoint).unwrap();

        assert_eq!(store.get_state(), &pad("one"));
        assert_eq!(store.forward().unwrap().to.words, "two");
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn binary_resume_keeps_limit() {
        let mut store = HistoryStore::builder()
            .initial(pad("begin"))
            .history_limit(2)
            .build()
            .unwrap();
        store.dispatch(|_: &Notepad| pad("one"));

        let bytes = store.checkpoint().to_binary().unwrap();
        let restored = HistoryStore::resume(Checkpoint::<Notepad>::from_binary(&bytes).unwrap())
            .unwrap();

        assert_eq!(restored.log().limit(), NonZeroUsize::new(2));
        assert_eq!(restored.get_state(), &pad("one"));
    }

    #[test]
    fn resume_rejects_unknown_version() {
        let mut checkpoint = rewound_store().checkpoint();
        checkpoint.version = 99;

        let result = HistoryStore::resume(checkpoint);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: CHECKPOINT_VERSION
            })
        ));
    }

    #[test]
    fn resume_rejects_out_of_bounds_cursor() {
        let mut checkpoint = rewound_store().checkpoint();
        checkpoint.cursor = 3;

        let result = HistoryStore::resume(checkpoint);
        assert!(matches!(result, Err(CheckpointError::ValidationFailed(_))));
    }

    #[test]
    fn resume_rejects_empty_log() {
        let mut checkpoint = rewound_store().checkpoint();
        checkpoint.snapshots.clear();
        checkpoint.cursor = 0;

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }

    #[test]
    fn resume_rejects_log_over_limit() {
        let mut checkpoint = rewound_store().checkpoint();
        checkpoint.history_limit = Some(2);

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }

    #[test]
    fn malformed_json_fails_to_deserialize() {
        let result = Checkpoint::<Notepad>::from_json("{not json");
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}
