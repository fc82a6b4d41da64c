//! Error types for the Polarity library.
//!
//! All fallible operations return [`PolarityError`] through the crate-wide
//! [`Result`] alias. Non-fatal training conditions (an optimizer stopping at
//! its epoch limit) are not errors; see
//! [`ConvergenceWarning`](crate::classifier::ConvergenceWarning).
//!
//! # Examples
//!
//! ```
//! use polarity::error::{PolarityError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PolarityError::invalid_input("training set is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::Path;

use thiserror::Error;

/// The main error type for Polarity operations.
#[derive(Error, Debug)]
pub enum PolarityError {
    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input data or model file does not exist.
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Malformed record, wrong field count, unparseable label or mismatched vector length.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Empty dataset or out-of-range parameter.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Analysis-related errors (tokenization, filtering).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model persistence errors.
    #[error("Model error: {0}")]
    Model(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary model encoding errors.
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with PolarityError.
pub type Result<T> = std::result::Result<T, PolarityError>;

impl PolarityError {
    /// Create a new file-not-found error for the given path.
    pub fn file_not_found<P: AsRef<Path>>(path: P) -> Self {
        PolarityError::FileNotFound {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a new schema mismatch error.
    pub fn schema_mismatch<S: Into<String>>(msg: S) -> Self {
        PolarityError::SchemaMismatch(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        PolarityError::InvalidInput(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PolarityError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        PolarityError::Model(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PolarityError::Other(msg.into())
    }

    /// Map an I/O error on `path` to `FileNotFound` when the file is missing.
    pub fn from_io_at<P: AsRef<Path>>(err: io::Error, path: P) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::file_not_found(path)
        } else {
            PolarityError::Io(err)
        }
    }
}
