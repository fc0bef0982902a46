//! Application-level errors.
//!
//! Every variant renders to the `{"error": "<message>"}` shape at the
//! process boundary. Action selection errors are reported on stdout with a
//! zero exit code; everything else goes to stderr and fails the process.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No action specified")]
    MissingAction,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// The input payload was not valid JSON or had the wrong shape.
    #[error("{0}")]
    Input(#[from] serde_json::Error),

    #[error("Input payload must be a JSON object")]
    NotAnObject,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read pattern file {}: {source}", path.display())]
    PatternFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid pattern file {}: {source}", path.display())]
    PatternParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl AppError {
    /// Whether the error terminates the process with a failure status.
    ///
    /// Action selection errors keep exit code 0.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MissingAction | Self::UnknownAction(_))
    }
}
