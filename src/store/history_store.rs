//! The history-aware store: dispatch, time travel and notification.

use crate::builder::HistoryStoreBuilder;
use crate::core::{Reducer, State, StateLog, StateTransition, TransitionKind};
use crate::store::subscribers::{SubscriberRegistry, SubscriptionId};
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Single-writer store holding an append-only log of immutable snapshots.
///
/// Every effective transition (dispatch, rewind, forward) notifies all
/// subscribers synchronously before the call returns. Boundary rewinds and
/// forwards are silent no-ops.
///
/// The store has no internal locking; all calls take `&self` or `&mut self`
/// and are expected to come from one thread of control.
///
/// # Example
///
/// ```rust
/// use hindsight::create_store;
///
/// let mut store = create_store(0_i64);
/// store.dispatch(|n: &i64| n + 1);
/// store.dispatch(|n: &i64| n + 1);
/// assert_eq!(*store.get_state(), 2);
///
/// store.rewind();
/// assert_eq!(*store.get_state(), 1);
///
/// store.dispatch(|n: &i64| n * 10);
/// assert_eq!(*store.get_state(), 10);
/// assert!(store.forward().is_none());
/// ```
pub struct HistoryStore<S: State> {
    log: StateLog<S>,
    subscribers: SubscriberRegistry<S>,
}

impl<S: State> fmt::Debug for HistoryStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore")
            .field("log", &self.log)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

impl<S: State> HistoryStore<S> {
    /// Create an unbounded store whose log holds only `initial`.
    pub fn new(initial: S) -> Self {
        Self::from_log(StateLog::new(initial))
    }

    /// Start a builder for a configured store.
    pub fn builder() -> HistoryStoreBuilder<S> {
        HistoryStoreBuilder::new()
    }

    pub(crate) fn from_log(log: StateLog<S>) -> Self {
        Self {
            log,
            subscribers: SubscriberRegistry::new(),
        }
    }

    /// Get the state under the cursor (pure)
    pub fn get_state(&self) -> &S {
        self.log.current().state()
    }

    /// Get a shared handle to the state under the cursor.
    pub fn snapshot(&self) -> Arc<S> {
        self.log.current().shared()
    }

    /// Read-only view of the snapshot log.
    pub fn log(&self) -> &StateLog<S> {
        &self.log
    }

    pub fn cursor(&self) -> usize {
        self.log.cursor()
    }

    pub fn can_rewind(&self) -> bool {
        self.log.can_rewind()
    }

    pub fn can_forward(&self) -> bool {
        self.log.can_forward()
    }

    /// Apply `reducer` to the current state and commit the result.
    ///
    /// If the cursor is behind the tail, every snapshot after it is discarded
    /// first. Subscribers are notified with `(next, prev)` before the new
    /// snapshot is appended. A panic inside the reducer propagates to the
    /// caller; the truncation has already happened by then.
    pub fn dispatch<F>(&mut self, reducer: F) -> StateTransition<S>
    where
        F: FnOnce(&S) -> S,
    {
        match self.try_dispatch(|state| Ok::<S, Infallible>(reducer(state))) {
            Ok(transition) => transition,
            Err(never) => match never {},
        }
    }

    /// Dispatch a named [`Reducer`].
    pub fn dispatch_action<R>(&mut self, action: R) -> StateTransition<S>
    where
        R: Reducer<S>,
    {
        trace!(action = action.label(), "dispatching action");
        self.dispatch(|state| action.reduce(state))
    }

    /// Dispatch a reducer that may fail.
    ///
    /// The reducer's error is returned unchanged. Nothing is appended and no
    /// subscriber is notified on failure, but a rewound future is still
    /// discarded.
    pub fn try_dispatch<F, E>(&mut self, reducer: F) -> Result<StateTransition<S>, E>
    where
        F: FnOnce(&S) -> Result<S, E>,
    {
        let dropped = self.log.truncate_future();
        if dropped > 0 {
            trace!(dropped, cursor = self.log.cursor(), "discarded rewound snapshots");
        }

        let prev = self.log.current().shared();
        let next = Arc::new(reducer(&*prev)?);

        let failures = self.subscribers.notify(&next, &prev);
        let evicted = self.log.commit(Arc::clone(&next));

        let transition =
            StateTransition::new(prev, next, TransitionKind::Dispatch, self.log.cursor());
        debug!(
            state = transition.to.name(),
            cursor = transition.cursor,
            len = self.log.len(),
            evicted,
            failures,
            "dispatched"
        );
        Ok(transition)
    }

    /// Step the cursor back one snapshot.
    ///
    /// Returns `None` without notifying anyone when already at the oldest
    /// retained snapshot.
    pub fn rewind(&mut self) -> Option<StateTransition<S>> {
        let Some((from, to)) = self.log.step_back() else {
            trace!("rewind ignored at oldest snapshot");
            return None;
        };
        Some(self.announce(from, to, TransitionKind::Rewind))
    }

    /// Step the cursor forward one snapshot.
    ///
    /// Returns `None` without notifying anyone when already at the tail.
    pub fn forward(&mut self) -> Option<StateTransition<S>> {
        let Some((from, to)) = self.log.step_forward() else {
            trace!("forward ignored at newest snapshot");
            return None;
        };
        Some(self.announce(from, to, TransitionKind::Forward))
    }

    fn announce(&mut self, from: Arc<S>, to: Arc<S>, kind: TransitionKind) -> StateTransition<S> {
        let failures = self.subscribers.notify(&to, &from);
        let transition = StateTransition::new(from, to, kind, self.log.cursor());
        debug!(
            state = transition.to.name(),
            cursor = transition.cursor,
            ?kind,
            failures,
            "moved cursor"
        );
        transition
    }

    /// Register a handler called with `(next, prev)` on every transition.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&S, &S) + 'static,
    {
        self.subscribers.subscribe(handler)
    }

    /// Register a handler whose errors are logged and otherwise ignored.
    pub fn subscribe_fallible<F, E>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&S, &S) -> Result<(), E> + 'static,
        E: fmt::Display,
    {
        self.subscribers.subscribe_fallible(handler)
    }

    /// Remove a registration. Returns whether it was present.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
