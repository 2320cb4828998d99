//! Builder API for configured store construction.
//!
//! `HistoryStore::new` covers the common case. The builder adds the knobs a
//! long-lived store needs, such as bounding how much history is retained.

pub mod error;
pub mod store;

pub use error::BuildError;
pub use store::HistoryStoreBuilder;
