use std::fmt;
use std::path::Path;

/// Error type for record store operations.
///
/// A missing record is not an error: lookups return `Ok(None)` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An insert was rejected because another record already carries this code.
    DuplicateCode(String),
    /// Reading or writing the backing resource failed.
    Io { path: String, message: String },
    /// The backing resource holds content that is not an array of records.
    Malformed(String),
    /// Encoding or typed (de)serialization failed.
    Serde(String),
    /// Backend-level failure that is not an I/O fault (e.g. a poisoned lock).
    Storage(String),
}

impl StoreError {
    pub(crate) fn io(path: &Path, err: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::DuplicateCode(_) => 409,
            StoreError::Io { .. }
            | StoreError::Malformed(_)
            | StoreError::Serde(_)
            | StoreError::Storage(_) => 500,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateCode(code) => {
                write!(f, "a record with code {} already exists", code)
            }
            StoreError::Io { path, message } => write!(f, "i/o error on {}: {}", path, message),
            StoreError::Malformed(msg) => write!(f, "malformed storage: {}", msg),
            StoreError::Serde(msg) => write!(f, "serialization error: {}", msg),
            StoreError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
