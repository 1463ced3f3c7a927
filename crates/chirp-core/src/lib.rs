//! Shared building blocks for Chirp: the error taxonomy, the persisted data
//! model, timestamp helpers and command-line settings.

pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{FeedError, Result};
