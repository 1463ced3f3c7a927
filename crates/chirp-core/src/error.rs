use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Chirp.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Input text is longer than the allowed number of characters.
    #[error("{field} exceeds the maximum character limit ({actual} > {limit})")]
    Validation {
        field: &'static str,
        limit: usize,
        actual: usize,
    },

    /// A reply referenced a message id that is not in the store.
    #[error("Invalid message ID: {0}")]
    MessageNotFound(u64),

    /// Registration attempted with a username that is already taken.
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    /// Unknown username or wrong password.
    #[error("Invalid username or password")]
    Auth,

    /// A collection file could not be read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file could not be written to disk.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be serialised or parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// `true` for errors caused by user input, which the caller reports and
    /// then carries on. Storage and configuration failures return `false`.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FeedError::Validation { .. }
                | FeedError::MessageNotFound(_)
                | FeedError::DuplicateUser(_)
                | FeedError::Auth
        )
    }
}

/// Convenience alias used throughout the chirp crates.
pub type Result<T> = std::result::Result<T, FeedError>;
