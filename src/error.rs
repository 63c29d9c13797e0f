//! Centralized error types for msgshell.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the msgshell library.
#[derive(Error, Debug)]
pub enum MsgError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("MSG file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file is not a compound document or its structure is broken.
    #[error("File does not appear to be a valid MSG: {0}")]
    InvalidMsg(PathBuf),
}

/// Convenience alias for `Result<T, MsgError>`.
pub type Result<T> = std::result::Result<T, MsgError>;

/// Helper to convert a bare `std::io::Error` together with a path.
impl MsgError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `MsgError`
/// when no path context is available (rare; prefer `MsgError::io`).
impl From<std::io::Error> for MsgError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
