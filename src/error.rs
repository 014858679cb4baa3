// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the rotolog logging system.

use std::io;

/// Result type for rotolog operations.
pub type Result<T> = std::result::Result<T, Error>;

/**
Errors surfaced by handler construction, reconfiguration, close, and the
registry.

Per-record failures inside `handle` are deliberately not represented here: a
record that cannot be formatted or written is dropped and the handler reports
"not handled" instead of failing the caller.
*/
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The date format is not one of the supported granularities.
    #[error("invalid date format {0:?}, expected YYYY, YYYY-MM or YYYY-MM-DD")]
    InvalidDateFormat(String),

    /// The filename format has no `{date}` placeholder.
    #[error("invalid filename format {0:?}, format should contain at least {{date}}")]
    MissingDatePlaceholder(String),

    /// I/O error opening, flushing or deleting a log file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The retention glob pattern could not be compiled.
    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A logger with this name is already registered.
    #[error("logger {0:?} already exists in the registry")]
    DuplicateLogger(String),

    /// No logger with this name is registered.
    #[error("requested logger {0:?} is not in the registry")]
    LoggerNotFound(String),

    /// The formatter could not serialize the record.
    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),
}
