//! Storage and domain layer for Chirp.
//!
//! Owns the named JSON collections, the activity log and its listeners, the
//! message and user stores, and the statistics computed over them.

pub mod aggregator;
pub mod events;
pub mod feed;
pub mod messages;
pub mod store;
pub mod users;

pub use feed::{Feed, FeedBuilder};
