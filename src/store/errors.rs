//! Store error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::booking::ValidationError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No booking with the given id
    #[error("booking not found")]
    NotFound,

    /// The record would violate a field rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing the data file failed
    #[error("{message} ({}): {source}", .path.display())]
    Io {
        message: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data file is not a valid booking collection
    #[error("corrupt data file {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub(crate) fn io(message: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            message,
            path: path.into(),
            source,
        }
    }
}
