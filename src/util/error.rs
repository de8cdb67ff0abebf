//! Error types for the pointskel library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pointskel operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A SKEL section tag did not match the next expected section
    #[error("Format mismatch: expected section `{expected}`, found `{found}`")]
    FormatMismatch { expected: &'static str, found: String },

    /// Input ended in the middle of a section
    #[error("Unexpected end of input in section `{section}`")]
    UnexpectedEof { section: &'static str },

    /// Token could not be parsed as the value a section requires
    #[error("Invalid token `{token}` in section `{section}`")]
    InvalidToken { section: &'static str, token: String },

    /// Declared record count disagrees with the owning collection
    #[error("Section `{section}` declares {found} records, expected {expected}")]
    CountMismatch {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    /// A reserved section carried data
    #[error("Reserved section `{section}` must be empty (declared {count})")]
    ReservedSection { section: &'static str, count: usize },

    /// Point cloud lacks a mandatory field
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Point cloud field with an unsupported numeric type
    #[error("Unsupported datatype {datatype} for field `{field}`")]
    UnsupportedFieldType { field: String, datatype: u8 },

    /// Mesh collaborator reported a nonzero status on read
    #[error("Failed reading mesh {path}: status {status}")]
    ImportFailure { path: PathBuf, status: i32 },

    /// Mesh collaborator reported a nonzero status on write
    #[error("Failed writing mesh {path}: status {status}")]
    ExportFailure { path: PathBuf, status: i32 },

    /// Invalid data structure in input
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Parameter file could not be (de)serialized
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Map an open failure to `FileNotFound` when the path is missing.
    pub(crate) fn from_open(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    }
}

/// Result type alias for pointskel operations.
pub type Result<T> = std::result::Result<T, Error>;
