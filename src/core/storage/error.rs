//! Error types for the storage module.
//!
//! Storage errors are environment faults (unreadable files, failed writes,
//! undeterminable paths). Malformed *values* are not storage errors; callers
//! decide how to interpret the strings they get back.

use thiserror::Error;

/// Unified error type for key/value storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Configuration error (undeterminable or invalid path).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backing file exists but does not hold a key/value object.
    #[error("Corrupt store {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// Backend-specific failure (lock poisoning, rename failure).
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error for file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a backend error with the given message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
