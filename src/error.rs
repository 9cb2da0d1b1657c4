//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers every
//! fallible operation in the library.
//!
//! # What can fail
//!
//! Parsing itself never fails: unrecognized lines, unparseable timestamps
//! and malformed attachment markers all degrade to partially classified
//! records. Errors come only from the edges:
//!
//! - reading an export or writing output ([`ChatlensError::Io`])
//! - user-supplied filter dates ([`ChatlensError::InvalidDate`])
//! - configuration files ([`ChatlensError::InvalidConfig`])
//! - output formats ([`ChatlensError::InvalidFormat`], [`ChatlensError::Csv`],
//!   [`ChatlensError::Json`])
//! - an export that produced no records, when the caller asks for that to be
//!   an error ([`ChatlensError::EmptyExport`])

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Record;
///
/// fn load() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input export doesn't exist or isn't readable
    /// - The output file can't be created
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A filter date could not be parsed.
    ///
    /// Date filters expect `YYYY-MM-DD`.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An output format was requested that can't be produced.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What kind of format was involved (e.g. "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A configuration file was rejected.
    #[error("Invalid configuration{}: {message}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
        /// The configuration file, if the config came from disk
        path: Option<PathBuf>,
    },

    /// The export contained no parsable entries.
    ///
    /// Parsing returns an empty [`ChatLog`](crate::ChatLog) rather than this
    /// error; it is only produced by
    /// [`ChatLog::ensure_not_empty`](crate::ChatLog::ensure_not_empty).
    #[error("No messages could be parsed{}", path.as_ref().map(|p| format!(" from {}", p.display())).unwrap_or_default())]
    EmptyExport {
        /// The export file, if the content came from disk
        path: Option<PathBuf>,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        ChatlensError::InvalidConfig {
            message: message.into(),
            path,
        }
    }

    /// Creates an empty export error.
    pub fn empty_export(path: Option<PathBuf>) -> Self {
        ChatlensError::EmptyExport { path }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatlensError::InvalidConfig { .. })
    }

    /// Returns `true` if the export produced no records.
    pub fn is_empty_export(&self) -> bool {
        matches!(self, ChatlensError::EmptyExport { .. })
    }
}
