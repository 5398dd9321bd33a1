//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{Converter, ConverterError, EncodeOutcome};
use crate::resolver::ResolvedJob;

/// Duration reported for inputs without a configured one.
pub const DEFAULT_MOCK_DURATION_SECS: f64 = 180.0;

/// Size of the file the mock writes on a successful encode.
pub const DEFAULT_MOCK_OUTPUT_SIZE: u64 = 1024;

/// A recorded encode for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedEncode {
    /// The job that was submitted.
    pub job: ResolvedJob,
    /// Whether the encode succeeded.
    pub success: bool,
}

#[derive(Debug, Clone, Copy)]
struct EncodeFailure {
    leave_partial: bool,
}

/// Mock implementation of the Converter trait.
///
/// Probing returns configured durations. Encoding writes a file of the
/// configured size to the job's output path, so the orchestrator's
/// filesystem handling runs for real against a temp dir.
///
/// # Example
///
/// ```rust,ignore
/// use tinyaudio_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter.set_duration("/rec/a.wav", 300.0).await;
/// converter.fail_probe("/rec/b.wav", "invalid data").await;
///
/// // Run the batch...
///
/// assert_eq!(converter.encode_count().await, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    encodes: Arc<RwLock<Vec<RecordedEncode>>>,
    durations: Arc<RwLock<HashMap<PathBuf, f64>>>,
    probe_failures: Arc<RwLock<HashMap<PathBuf, String>>>,
    encode_failures: Arc<RwLock<HashMap<PathBuf, EncodeFailure>>>,
    skip_output: Arc<RwLock<HashSet<PathBuf>>>,
    output_size: Arc<RwLock<u64>>,
    validate_error: Arc<RwLock<Option<ConverterError>>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            encodes: Arc::new(RwLock::new(Vec::new())),
            durations: Arc::new(RwLock::new(HashMap::new())),
            probe_failures: Arc::new(RwLock::new(HashMap::new())),
            encode_failures: Arc::new(RwLock::new(HashMap::new())),
            skip_output: Arc::new(RwLock::new(HashSet::new())),
            output_size: Arc::new(RwLock::new(DEFAULT_MOCK_OUTPUT_SIZE)),
            validate_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Get all recorded encodes.
    pub async fn recorded_encodes(&self) -> Vec<RecordedEncode> {
        self.encodes.read().await.clone()
    }

    /// Get the jobs of successful encodes, in submission order.
    pub async fn recorded_jobs(&self) -> Vec<ResolvedJob> {
        self.encodes
            .read()
            .await
            .iter()
            .filter(|r| r.success)
            .map(|r| r.job.clone())
            .collect()
    }

    /// Get the number of encodes attempted.
    pub async fn encode_count(&self) -> usize {
        self.encodes.read().await.len()
    }

    /// Set the duration probing reports for `path`.
    pub async fn set_duration(&self, path: impl AsRef<Path>, secs: f64) {
        self.durations
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), secs);
    }

    /// Make probing `path` fail.
    pub async fn fail_probe(&self, path: impl AsRef<Path>, reason: impl Into<String>) {
        self.probe_failures
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), reason.into());
    }

    /// Make encoding `path` fail, optionally after writing a partial output.
    pub async fn fail_encode(&self, path: impl AsRef<Path>, leave_partial: bool) {
        self.encode_failures
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), EncodeFailure { leave_partial });
    }

    /// Report success for `path` without writing any output.
    pub async fn skip_output(&self, path: impl AsRef<Path>) {
        self.skip_output
            .write()
            .await
            .insert(path.as_ref().to_path_buf());
    }

    /// Set the size of files written by successful encodes.
    pub async fn set_output_size(&self, bytes: u64) {
        *self.output_size.write().await = bytes;
    }

    /// Make the next `validate` call fail with the given error.
    pub async fn set_validate_error(&self, error: ConverterError) {
        *self.validate_error.write().await = Some(error);
    }

    async fn record(&self, job: &ResolvedJob, success: bool) {
        self.encodes.write().await.push(RecordedEncode {
            job: job.clone(),
            success,
        });
    }
}

async fn write_output(path: &Path, bytes: u64) -> Result<(), ConverterError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, vec![0u8; bytes as usize]).await?;
    Ok(())
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe_duration(&self, path: &Path) -> Result<f64, ConverterError> {
        if let Some(reason) = self.probe_failures.read().await.get(path) {
            return Err(ConverterError::probe_failed(reason.clone()));
        }
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ConverterError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        Ok(self
            .durations
            .read()
            .await
            .get(path)
            .copied()
            .unwrap_or(DEFAULT_MOCK_DURATION_SECS))
    }

    async fn encode(&self, job: &ResolvedJob) -> Result<EncodeOutcome, ConverterError> {
        let failure = self.encode_failures.read().await.get(&job.input_path).copied();
        if let Some(failure) = failure {
            if failure.leave_partial {
                write_output(&job.output_path, 16).await?;
            }
            self.record(job, false).await;
            return Err(ConverterError::encode_failed(
                "mock encoder exited with status 1",
                Some("Error while decoding stream #0:0".to_string()),
            ));
        }

        if self.skip_output.read().await.contains(&job.input_path) {
            self.record(job, false).await;
            return Err(ConverterError::MissingOutput {
                path: job.output_path.clone(),
            });
        }

        let size = *self.output_size.read().await;
        write_output(&job.output_path, size).await?;
        self.record(job, true).await;

        Ok(EncodeOutcome {
            output_path: job.output_path.clone(),
            output_size_bytes: size,
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        match self.validate_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
