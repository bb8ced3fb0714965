//! Error types for conflict resolution
//!
//! Only discovery errors abort a run. Read and delete errors belong to a
//! single conflict file; the resolver logs them and moves on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or resolving conflict files
#[derive(Debug, Error)]
pub enum ConflictError {
    /// A root directory could not be walked (missing, permission denied)
    #[error("Failed to walk {root}: {reason}")]
    Discovery { root: PathBuf, reason: String },

    /// A conflict copy or its original could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An identical conflict copy could not be removed
    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConflictError {
    /// Whether this error aborts the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConflictError::Discovery { .. })
    }
}

/// Result type alias using ConflictError
pub type Result<T> = std::result::Result<T, ConflictError>;

