//! Subscriber failure types.

use thiserror::Error;

/// Failure raised by a single subscriber during notification.
///
/// These never escape the store: each one is logged and the remaining
/// subscribers are still notified.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubscriberError {
    /// A fallible subscriber returned `Err`
    #[error("subscriber returned an error: {0}")]
    Failed(String),

    /// The subscriber panicked
    #[error("subscriber panicked: {0}")]
    Panicked(String),
}
