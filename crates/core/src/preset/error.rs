//! Error types for the preset module.

use thiserror::Error;

/// Errors raised while selecting a preset.
#[derive(Debug, Error)]
pub enum PresetError {
    /// No preset with the requested name exists.
    #[error("Unknown preset '{name}' (available: {available})")]
    Unknown { name: String, available: String },
}
