//! Error types for the ledger engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while reading sources or writing ledgers.
///
/// Malformed input lines are never errors; they are dropped by the parser.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Generic I/O error not tied to a named source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An input source or output target could not be read or written
    #[error("I/O failure on {source_name}: {error}")]
    IoFailure {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// The logs path does not point to a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl LedgerError {
    /// Wraps an I/O error with the name of the source it came from.
    pub fn io_failure(source_name: impl Into<String>, error: std::io::Error) -> Self {
        LedgerError::IoFailure {
            source_name: source_name.into(),
            error,
        }
    }
}
