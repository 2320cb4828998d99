//! Core State trait for store states.
//!
//! Any value held by a [`HistoryStore`](crate::store::HistoryStore) must
//! implement this trait. The store treats states as opaque: it only needs
//! to print them for diagnostics and label them in log output.

use std::fmt::Debug;

/// Trait for application states held in a store.
///
/// States are immutable once recorded. The store wraps every snapshot in
/// an `Arc` and never hands out mutable access, so implementors do not need
/// interior mutability guards of their own.
///
/// # Example
///
/// ```rust
/// use hindsight::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Counter {
///     count: i64,
/// }
///
/// impl State for Counter {
///     fn name(&self) -> &str {
///         "Counter"
///     }
/// }
///
/// assert_eq!(Counter { count: 0 }.name(), "Counter");
/// ```
pub trait State: Debug + 'static {
    /// Get the state's name for display/logging.
    ///
    /// Default implementation returns the Rust type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

macro_rules! impl_state_for_primitives {
    ($($ty:ty),* $(,)?) => {
        $(impl State for $ty {})*
    };
}

impl_state_for_primitives!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);
