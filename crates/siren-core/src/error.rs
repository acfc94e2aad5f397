//! Error types for the siren likelihood

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a catalog file could not be turned into an event catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLoadKind {
    /// The file does not exist in the given directory.
    NotFound,
    /// The file exists but could not be read.
    Unreadable(String),
    /// The file was read but its contents do not form a valid catalog.
    Malformed(String),
}

impl fmt::Display for DataLoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLoadKind::NotFound => f.write_str("file not found"),
            DataLoadKind::Unreadable(msg) => write!(f, "unreadable: {msg}"),
            DataLoadKind::Malformed(msg) => write!(f, "malformed contents: {msg}"),
        }
    }
}

/// Siren likelihood error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Event catalog could not be loaded at initialization.
    #[error("could not load {file} from {}: {kind}", .directory.display())]
    DataLoad {
        /// Catalog file name that was attempted.
        file: String,
        /// Directory the file was looked up in.
        directory: PathBuf,
        /// Failure category.
        kind: DataLoadKind,
    },

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A per-event quantity left the domain where the likelihood is defined
    /// (non-positive density, non-positive sigma, non-finite prediction).
    #[error("Numeric domain error at event {index}: {message}")]
    NumericDomain {
        /// Catalog index of the offending event.
        index: usize,
        /// Human-readable description.
        message: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// `true` for per-event numeric errors, which a sampler should treat as a rejected point.
    pub fn is_numeric_domain(&self) -> bool {
        matches!(self, Error::NumericDomain { .. })
    }

    /// Catalog index carried by a [`Error::NumericDomain`] error.
    pub fn event_index(&self) -> Option<usize> {
        match self {
            Error::NumericDomain { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
