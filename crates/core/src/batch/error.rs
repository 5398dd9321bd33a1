//! Error types for the batch module.

use std::path::PathBuf;
use thiserror::Error;

/// Batch-level errors. These stop the run before any job starts.
#[derive(Debug, Error)]
pub enum BatchError {
    /// None of the given paths contained a supported audio file.
    #[error("No audio files found in {} path(s)", .searched.len())]
    NoInputsFound { searched: Vec<PathBuf> },
}
