//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ConverterError;
use super::types::EncodeOutcome;
use crate::resolver::ResolvedJob;

/// Probes and encodes audio files through an external tool.
///
/// Both operations suspend until the external process exits. A job is
/// never adjusted once `encode` has been called.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Returns the playback duration of `path` in seconds.
    ///
    /// The value is always positive and finite.
    async fn probe_duration(&self, path: &Path) -> Result<f64, ConverterError>;

    /// Runs the encoder for a fully resolved job.
    ///
    /// On success the output file exists. On failure the output may be
    /// partially written; cleaning it up is the caller's job.
    async fn encode(&self, job: &ResolvedJob) -> Result<EncodeOutcome, ConverterError>;

    /// Validates that the converter is properly configured and ready.
    async fn validate(&self) -> Result<(), ConverterError>;
}
