//! Snapshot log with a movable cursor.
//!
//! The log is the authoritative, ordered record of every reachable state.
//! It is never empty, entries are never mutated once committed, and the
//! cursor always points inside the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

/// An immutable state value captured at one point in time.
///
/// The state is shared behind an `Arc`, so cloning a snapshot never clones
/// the state itself.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "S: Serialize", deserialize = "S: Deserialize<'de>"))]
pub struct Snapshot<S> {
    state: Arc<S>,
    recorded_at: DateTime<Utc>,
}

impl<S> Snapshot<S> {
    /// Capture a new snapshot stamped with the current time.
    pub fn new(state: S) -> Self {
        Self::from_shared(Arc::new(state))
    }

    pub(crate) fn from_shared(state: Arc<S>) -> Self {
        Self {
            state,
            recorded_at: Utc::now(),
        }
    }

    /// Borrow the captured state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a shared handle to the captured state.
    pub fn shared(&self) -> Arc<S> {
        Arc::clone(&self.state)
    }

    /// When the snapshot was committed to the log.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

impl<S> Clone for Snapshot<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            recorded_at: self.recorded_at,
        }
    }
}

/// What caused a transition between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// A reducer produced a new snapshot
    Dispatch,
    /// The cursor moved one step back
    Rewind,
    /// The cursor moved one step forward
    Forward,
}

/// Record of a single effective state transition.
///
/// Transitions are immutable values. `from` is the state that was current
/// before the call, `to` is the state that is current after it.
///
/// # Example
///
/// ```rust
/// use hindsight::create_store;
///
/// let mut store = create_store(1_i32);
/// let transition = store.dispatch(|n: &i32| n + 1);
///
/// assert_eq!(*transition.from, 1);
/// assert_eq!(*transition.to, 2);
/// assert_eq!(transition.cursor, 1);
/// ```
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "S: Serialize", deserialize = "S: Deserialize<'de>"))]
pub struct StateTransition<S> {
    /// The state being transitioned from
    pub from: Arc<S>,
    /// The state being transitioned to
    pub to: Arc<S>,
    /// What triggered the transition
    pub kind: TransitionKind,
    /// Cursor position once the transition completed
    pub cursor: usize,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl<S> StateTransition<S> {
    pub(crate) fn new(from: Arc<S>, to: Arc<S>, kind: TransitionKind, cursor: usize) -> Self {
        Self {
            from,
            to,
            kind,
            cursor,
            timestamp: Utc::now(),
        }
    }

    /// Split into the `(next, prev)` pair.
    pub fn into_pair(self) -> (Arc<S>, Arc<S>) {
        (self.to, self.from)
    }
}

impl<S> Clone for StateTransition<S> {
    fn clone(&self) -> Self {
        Self {
            from: Arc::clone(&self.from),
            to: Arc::clone(&self.to),
            kind: self.kind,
            cursor: self.cursor,
            timestamp: self.timestamp,
        }
    }
}

/// Ordered log of snapshots plus the cursor marking the live one.
///
/// Invariants:
/// - the log always holds at least one snapshot
/// - `cursor < len()`
/// - with a limit set, `len() <= limit`
#[derive(Debug)]
pub struct StateLog<S> {
    snapshots: Vec<Snapshot<S>>,
    cursor: usize,
    limit: Option<NonZeroUsize>,
}

impl<S> Clone for StateLog<S> {
    fn clone(&self) -> Self {
        Self {
            snapshots: self.snapshots.clone(),
            cursor: self.cursor,
            limit: self.limit,
        }
    }
}

impl<S> StateLog<S> {
    /// Create an unbounded log holding only `initial`.
    pub fn new(initial: S) -> Self {
        Self::with_limit(initial, None)
    }

    /// Create a log that retains at most `limit` snapshots.
    pub fn with_limit(initial: S, limit: Option<NonZeroUsize>) -> Self {
        Self {
            snapshots: vec![Snapshot::new(initial)],
            cursor: 0,
            limit,
        }
    }

    /// Rebuild a log from already validated parts.
    pub(crate) fn from_parts(
        snapshots: Vec<Snapshot<S>>,
        cursor: usize,
        limit: Option<NonZeroUsize>,
    ) -> Self {
        debug_assert!(cursor < snapshots.len());
        Self {
            snapshots,
            cursor,
            limit,
        }
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: a log holds its initial snapshot from creation on.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &Snapshot<S> {
        &self.snapshots[self.cursor]
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot<S>> {
        self.snapshots.get(index)
    }

    /// All retained snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot<S>] {
        &self.snapshots
    }

    /// States in order, oldest first, including any future beyond the cursor.
    pub fn get_path(&self) -> Vec<&S> {
        self.snapshots.iter().map(Snapshot::state).collect()
    }

    pub fn can_rewind(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_forward(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Time elapsed between the oldest retained snapshot and the current one.
    ///
    /// Returns `None` if the wall clock went backwards between the two.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.snapshots[0].recorded_at;
        let current = self.current().recorded_at;
        current.signed_duration_since(first).to_std().ok()
    }

    /// Move the cursor one step back, returning `(from, to)`.
    ///
    /// Returns `None` and leaves the cursor alone when already at the oldest
    /// snapshot.
    pub(crate) fn step_back(&mut self) -> Option<(Arc<S>, Arc<S>)> {
        if !self.can_rewind() {
            return None;
        }
        let from = self.current().shared();
        self.cursor -= 1;
        Some((from, self.current().shared()))
    }

    /// Move the cursor one step forward, returning `(from, to)`.
    pub(crate) fn step_forward(&mut self) -> Option<(Arc<S>, Arc<S>)> {
        if !self.can_forward() {
            return None;
        }
        let from = self.current().shared();
        self.cursor += 1;
        Some((from, self.current().shared()))
    }

    /// Discard every snapshot after the cursor. Returns how many were dropped.
    pub(crate) fn truncate_future(&mut self) -> usize {
        let keep = self.cursor + 1;
        let dropped = self.snapshots.len() - keep;
        self.snapshots.truncate(keep);
        dropped
    }

    /// Append a state at the tail and move the cursor onto it.
    ///
    /// Any future beyond the cursor must already be truncated. When a limit is
    /// set, the oldest snapshots are evicted to respect it; the number evicted
    /// is returned.
    pub(crate) fn commit(&mut self, state: Arc<S>) -> usize {
        debug_assert!(!self.can_forward());
        self.snapshots.push(Snapshot::from_shared(state));

        let evicted = match self.limit {
            Some(limit) if self.snapshots.len() > limit.get() => {
                let excess = self.snapshots.len() - limit.get();
                self.snapshots.drain(..excess);
                excess
            }
            _ => 0,
        };

        self.cursor = self.snapshots.len() - 1;
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_of(values: &[i32]) -> StateLog<i32> {
        let mut log = StateLog::new(values[0]);
        for value in &values[1..] {
            log.commit(Arc::new(*value));
        }
        log
    }

    #[test]
    fn new_log_holds_initial_state() {
        let log = StateLog::new(7);
        assert_eq!(log.len(), 1);
        assert!(!log.is_empty());
        assert_eq!(log.cursor(), 0);
        assert_eq!(*log.current().state(), 7);
        assert!(!log.can_rewind());
        assert!(!log.can_forward());
    }

    #[test]
    fn commit_moves_cursor_to_tail() {
        let log = log_of(&[0, 1, 2]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.cursor(), 2);
        assert_eq!(log.get_path(), vec![&0, &1, &2]);
    }

    #[test]
    fn step_back_stops_at_oldest() {
        let mut log = log_of(&[0, 1]);

        let (from, to) = log.step_back().unwrap();
        assert_eq!((*from, *to), (1, 0));
        assert_eq!(log.cursor(), 0);

        assert!(log.step_back().is_none());
        assert_eq!(log.cursor(), 0);
    }

    #[test]
    fn step_forward_stops_at_tail() {
        let mut log = log_of(&[0, 1]);
        assert!(log.step_forward().is_none());

        log.step_back();
        let (from, to) = log.step_forward().unwrap();
        assert_eq!((*from, *to), (0, 1));
        assert_eq!(log.cursor(), 1);
    }

    #[test]
    fn truncate_future_discards_after_cursor() {
        let mut log = log_of(&[0, 1, 2, 3]);
        log.step_back();
        log.step_back();

        assert_eq!(log.truncate_future(), 2);
        assert_eq!(log.len(), 2);
        assert!(!log.can_forward());
        assert_eq!(log.truncate_future(), 0);
    }

    #[test]
    fn limit_evicts_oldest_snapshots() {
        let mut log = StateLog::with_limit(0, NonZeroUsize::new(3));
        for value in 1..=4 {
            log.commit(Arc::new(value));
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.cursor(), 2);
        assert_eq!(log.get_path(), vec![&2, &3, &4]);
    }

    #[test]
    fn limit_of_one_keeps_only_current() {
        let mut log = StateLog::with_limit(0, NonZeroUsize::new(1));
        assert_eq!(log.commit(Arc::new(1)), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(*log.current().state(), 1);
        assert!(!log.can_rewind());
    }

    #[test]
    fn committed_snapshots_keep_identity() {
        let mut log = StateLog::new(String::from("a"));
        let first = log.current().shared();
        log.commit(Arc::new(String::from("b")));

        assert!(Arc::ptr_eq(&first, &log.get(0).unwrap().shared()));
    }

    #[test]
    fn duration_is_measured_to_current_snapshot() {
        let mut log = StateLog::new(0);
        std::thread::sleep(Duration::from_millis(10));
        log.commit(Arc::new(1));

        assert!(log.duration().unwrap() >= Duration::from_millis(10));
        log.step_back();
        assert_eq!(log.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn transition_into_pair_orders_next_first() {
        let transition = StateTransition::new(Arc::new(1), Arc::new(2), TransitionKind::Dispatch, 1);
        let (next, prev) = transition.into_pair();
        assert_eq!((*next, *prev), (2, 1));
    }

    #[test]
    fn snapshot_serializes_correctly() {
        let snapshot = Snapshot::new(String::from("begin"));
        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: Snapshot<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.state(), "begin");
        assert_eq!(deserialized.recorded_at(), snapshot.recorded_at());
    }
}
