/*!
 * Error types for the subfixer application.
 *
 * This module contains custom error types for the different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when binding, loading or saving a subtitle file
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The path has no usable extension
    #[error("Invalid file: {0}")]
    InvalidFile(String),

    /// The extension is not one of the supported subtitle formats
    #[error("Not a valid subtitle file: unsupported extension '{0}'")]
    UnsupportedExtension(String),

    /// An operation needed a bound file but none was chosen
    #[error("No file selected")]
    NoFileSelected,

    /// The subtitle content could not be parsed
    #[error("Failed to parse subtitles: {0}")]
    Parse(String),

    /// Reading, copying or writing a file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File the operation was working on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by alignment table operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// Selection-dependent operations need at least one row
    #[error("Selection is empty")]
    EmptySelection,

    /// Selected rows must be ascending with no gaps
    #[error("Selection must be a contiguous ascending range of rows")]
    NonContiguous,

    /// A selected position lies past the end of the table
    #[error("Row {position} is out of range (table has {len} rows)")]
    OutOfRange {
        /// Offending row position (0-based)
        position: usize,
        /// Current table length
        len: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle handling
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from a table operation
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
