//! Error types.
//!
//! The grading path never fails: these errors only surface from loading
//! answer tables and from session stores, whose callers degrade them to
//! warnings where the quiz must keep running.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`SessionStore`](crate::store::SessionStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("session store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not hold a JSON object of strings.
    #[error("session store at {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode session value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while loading an answer table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read answer table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse answer table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The table parsed but cannot be used, e.g. an exercise numbered 0.
    #[error("invalid answer table {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

impl StoreError {
    /// Returns `true` if the store content itself is damaged, as opposed to
    /// a transient I/O failure.
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}
