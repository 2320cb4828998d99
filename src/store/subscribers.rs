//! Observer registry notified on every effective transition.

use crate::core::State;
use crate::store::error::SubscriberError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;
use uuid::Uuid;

/// Opaque handle identifying one registration.
///
/// Returned by `subscribe` and consumed by `unsubscribe`. Every call to
/// `subscribe` yields a fresh id, even for the same closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type Handler<S> = Box<dyn FnMut(&S, &S) -> Result<(), SubscriberError>>;

/// Set of subscribers keyed by [`SubscriptionId`].
///
/// Handlers receive `(next, prev)`. Notification order follows registration
/// order, but callers must not depend on it.
pub struct SubscriberRegistry<S: State> {
    handlers: Vec<(SubscriptionId, Handler<S>)>,
}

impl<S: State> Default for SubscriberRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> fmt::Debug for SubscriberRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|(id, _)| id))
            .finish()
    }
}

impl<S: State> SubscriberRegistry<S> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an infallible handler.
    pub fn subscribe<F>(&mut self, mut handler: F) -> SubscriptionId
    where
        F: FnMut(&S, &S) + 'static,
    {
        self.insert(Box::new(move |next: &S, prev: &S| {
            handler(next, prev);
            Ok(())
        }))
    }

    /// Register a handler that may report failure.
    ///
    /// An `Err` is logged and otherwise ignored.
    pub fn subscribe_fallible<F, E>(&mut self, mut handler: F) -> SubscriptionId
    where
        F: FnMut(&S, &S) -> Result<(), E> + 'static,
        E: fmt::Display,
    {
        self.insert(Box::new(move |next: &S, prev: &S| {
            handler(next, prev).map_err(|e| SubscriberError::Failed(e.to_string()))
        }))
    }

    fn insert(&mut self, handler: Handler<S>) -> SubscriptionId {
        let id = SubscriptionId::generate();
        self.handlers.push((id, handler));
        id
    }

    /// Remove a registration. Returns whether it was present.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.handlers.iter().position(|(existing, _)| *existing == id) {
            Some(index) => {
                self.handlers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.handlers.iter().any(|(existing, _)| *existing == id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every handler with `(next, prev)`.
    ///
    /// Each handler is isolated: errors and panics are logged and do not stop
    /// the remaining handlers. Returns the number of handlers that failed.
    pub(crate) fn notify(&mut self, next: &S, prev: &S) -> usize {
        let mut failures = 0;

        for (id, handler) in &mut self.handlers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(next, prev)));
            let error = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(error)) => error,
                Err(payload) => SubscriberError::Panicked(panic_message(payload.as_ref())),
            };

            failures += 1;
            warn!(
                subscription = %id,
                state = next.name(),
                error = %error,
                "subscriber failed during notification"
            );
        }

        failures
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
