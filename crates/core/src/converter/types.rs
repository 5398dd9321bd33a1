//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of a successful encoder run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeOutcome {
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes, measured after the encoder exited.
    pub output_size_bytes: u64,
    /// Wall-clock encoding time in milliseconds.
    pub duration_ms: u64,
}
