//! Error types for the VSOP87 module

use std::path::PathBuf;
use thiserror::Error;

use super::names::Body;

/// Main error type for VSOP87 series handling
#[derive(Error, Debug)]
pub enum Vsop87Error {
    /// Error when a series file cannot be read
    #[error("File I/O error on {path:?}: {source}")]
    FileError {
        /// The path of the file that caused the error
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Error when a series file does not follow the VSOP87 layout
    #[error("Invalid VSOP87 data at line {line}: {message}")]
    InvalidFormat {
        /// 1-based line number in the source text
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// Error when a file belongs to a VSOP87 version this crate does not evaluate
    #[error("Unsupported VSOP87 version: {0}")]
    UnsupportedVersion(char),

    /// Error when a body name or file extension is not recognised
    #[error("Unknown VSOP87 body: {0}")]
    UnknownBody(String),

    /// Error when no loaded series covers the requested body
    #[error("No VSOP87 series loaded for {0}")]
    SeriesUnavailable(Body),
}

/// Extension of the Result type for VSOP87 operations
pub type Result<T> = std::result::Result<T, Vsop87Error>;

/// Helper function to convert a std::io::Error to Vsop87Error
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> Vsop87Error {
    Vsop87Error::FileError {
        path: path.into(),
        source: err,
    }
}

/// Helper for format errors
pub(crate) fn format_err(line: usize, message: impl Into<String>) -> Vsop87Error {
    Vsop87Error::InvalidFormat {
        line,
        message: message.into(),
    }
}
