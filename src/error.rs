//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Fatal input errors** (undecodable bytes, I/O) abort the run
//! - **Per-record errors** (unparseable timestamps) are counted in the
//!   [`ParseReport`](crate::table::ParseReport) and never abort the run
//! - **Empty input** is not an error: it yields an empty [`Table`](crate::Table)

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Table;
///
/// fn my_function() -> Result<Table> {
///     Ok(Table::default())
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
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A raw line is not valid UTF-8.
    ///
    /// Fatal for the whole input: dropping the line would silently corrupt
    /// the continuation of the message it belongs to.
    #[error("Line {line} is not valid UTF-8: {source}")]
    Decode {
        /// 1-based line number in the source
        line: usize,
        /// The underlying UTF-8 error
        #[source]
        source: Utf8Error,
    },

    /// Neither accepted date-time layout matched a header's date and time.
    #[error("Invalid timestamp '{input}'. Expected DD/MM/YYYY HH:MM:SS or DD/MM/YYYY, HH:MM:SS")]
    Timestamp {
        /// The reconstructed date-time text
        input: String,
    },

    /// A line was pushed into an assembler that already reached end of input.
    #[error("Message assembler is closed; no more lines can be pushed")]
    Closed,

    /// A value doesn't match the expected structure.
    ///
    /// This occurs when:
    /// - An output format name or extension is unknown
    /// - A keyword set cannot be compiled into a matcher
    #[error("Invalid {kind}: {message}")]
    InvalidFormat {
        /// What was being interpreted (e.g., "output format")
        kind: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A configuration file could not be loaded.
    #[error("Failed to load config {}: {message}", path.display())]
    Config {
        /// The configuration file path
        path: PathBuf,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a decode error for the given 1-based line number.
    pub fn decode(line: usize, source: Utf8Error) -> Self {
        ChatlensError::Decode { line, source }
    }

    /// Creates a timestamp error.
    pub fn timestamp(input: impl Into<String>) -> Self {
        ChatlensError::Timestamp {
            input: input.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(kind: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            kind,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChatlensError::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, ChatlensError::Decode { .. })
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, ChatlensError::Timestamp { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
