//! Error types for the Vera core library.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all Vera operations.
#[derive(Error, Debug)]
pub enum VeraError {
    /// A persisted store file exists but could not be decoded.
    ///
    /// Callers are expected to log this and fall back to a default
    /// document rather than abort the session.
    #[error("Corrupt store at {path}: {reason}")]
    CorruptStore {
        /// Path of the offending file.
        path: PathBuf,
        /// Decoder message describing what went wrong.
        reason: String,
    },

    /// A teach command was recognised but malformed (missing separator,
    /// empty key or empty value).
    #[error("Malformed teach command: {0}")]
    TeachCommand(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, VeraError>;
