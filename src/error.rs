//! error — typed store errors.
//!
//! Absent data is not an error (it triggers seeding); lookup misses are `Option`.
//! What remains is: corrupt persisted values, I/O on the byte store, the
//! single-writer lock, invalid keys, and an exhausted id space.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Value is present under `key` but cannot be decoded. Never seeded over.
    #[error("corrupt store value under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another writer holds `<root>/LOCK`.
    #[error("store at {path} is locked by another writer")]
    Locked { path: PathBuf },

    #[error("invalid key '{0}' (allowed: A-Z a-z 0-9 _ . -)")]
    InvalidKey(String),

    /// The table already holds the largest representable id.
    #[error("no identifier left after {max}")]
    IdExhausted { max: u64 },

    #[error("encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn corrupt(key: &str, reason: impl ToString) -> Self {
        StoreError::Corrupt {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    #[inline]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
