//! Sequential batch runner.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::output::{output_path_for, OutputTarget};
use super::types::{BatchSummary, FailureKind, JobResult, JobStatus};
use crate::converter::{Converter, ConverterError};
use crate::resolver::JobResolver;
use crate::units::format_bytes;

/// A per-job failure on its way into a [`JobResult`].
struct JobFailure {
    kind: FailureKind,
    reason: String,
}

impl JobFailure {
    fn new(kind: FailureKind, reason: impl ToString) -> Self {
        Self {
            kind,
            reason: reason.to_string(),
        }
    }
}

/// Drives every input through probe, resolve and encode.
///
/// Jobs run strictly one after another. A failed job is recorded and the
/// batch moves on; nothing is retried.
pub struct BatchOrchestrator<C: Converter> {
    converter: C,
    resolver: JobResolver,
    output: OutputTarget,
    dry_run: bool,
}

impl<C: Converter> BatchOrchestrator<C> {
    /// Creates a new orchestrator.
    pub fn new(converter: C, resolver: JobResolver, output: OutputTarget) -> Self {
        Self {
            converter,
            resolver,
            output,
            dry_run: false,
        }
    }

    /// Resolve and report every job without running the encoder.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn resolver(&self) -> &JobResolver {
        &self.resolver
    }

    /// Processes every input in order and returns the tally.
    pub async fn run(&self, inputs: &[PathBuf]) -> BatchSummary {
        info!(
            files = inputs.len(),
            preset = self.resolver.preset().name,
            converter = self.converter.name(),
            dry_run = self.dry_run,
            "Starting batch"
        );

        let mut summary = BatchSummary::default();
        for input in inputs {
            summary.push(self.process_one(input).await);
        }

        info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            skipped = summary.skipped(),
            "Batch finished"
        );
        summary
    }

    /// Processes a single input. Never fails; problems end up in the
    /// returned status.
    pub async fn process_one(&self, input: &Path) -> JobResult {
        let start = Instant::now();
        let codec = self.resolver.codec();
        let output = output_path_for(input, &self.output, codec);
        let mut result = JobResult::new(input.to_path_buf(), output, codec);

        result.status = match self.execute(&mut result).await {
            Ok(status) => status,
            Err(failure) => {
                warn!(
                    input = %input.display(),
                    kind = %failure.kind,
                    "Job failed: {}",
                    failure.reason
                );
                JobStatus::Failed {
                    kind: failure.kind,
                    reason: failure.reason,
                }
            }
        };
        result.elapsed_ms = start.elapsed().as_millis() as u64;
        result
    }

    async fn execute(&self, result: &mut JobResult) -> Result<JobStatus, JobFailure> {
        let input = result.input_path.clone();

        let metadata = tokio::fs::metadata(&input).await.map_err(|e| {
            JobFailure::new(
                FailureKind::InputNotFound,
                format!("{}: {}", input.display(), e),
            )
        })?;
        if !metadata.is_file() {
            return Err(JobFailure::new(
                FailureKind::InputNotFound,
                format!("{} is not a file", input.display()),
            ));
        }
        result.original_size_bytes = Some(metadata.len());

        let duration_secs = self
            .converter
            .probe_duration(&input)
            .await
            .map_err(|e| match e {
                ConverterError::InputNotFound { .. } => {
                    JobFailure::new(FailureKind::InputNotFound, e)
                }
                other => JobFailure::new(FailureKind::ProbeFailure, other),
            })?;

        let job = self
            .resolver
            .resolve(&input, result.output_path.clone(), Some(duration_secs))
            .map_err(|e| JobFailure::new(FailureKind::InvalidDuration, e))?;

        result.bitrate_bps = Some(job.bitrate_bps);
        result.estimated_size_bytes = job.estimated_size_bytes();

        info!(
            input = %input.display(),
            output = %job.output_path.display(),
            original = %format_bytes(metadata.len()),
            estimated = %result.estimated_size_bytes.map(format_bytes).unwrap_or_default(),
            bitrate_bps = job.bitrate_bps,
            bitrate_source = ?job.bitrate_source,
            codec = %job.codec,
            "Resolved job"
        );
        debug!(filters = ?job.filters.to_ffmpeg_expr(), "Filter chain");

        if self.dry_run {
            return Ok(JobStatus::Skipped {
                reason: "dry run".to_string(),
            });
        }

        let outcome = match self.converter.encode(&job).await {
            Ok(outcome) => outcome,
            Err(e) => {
                discard_partial_output(&job.output_path).await;
                let kind = match e {
                    ConverterError::MissingOutput { .. } => FailureKind::MissingOutput,
                    _ => FailureKind::EncodeError,
                };
                if let Some(stderr) = e.stderr() {
                    debug!(input = %input.display(), "Encoder stderr: {}", stderr);
                }
                return Err(JobFailure::new(kind, e));
            }
        };

        result.actual_size_bytes = Some(outcome.output_size_bytes);

        // The encoder's output is kept even when it is larger than the input.
        if result.grew() {
            warn!(
                input = %input.display(),
                original = metadata.len(),
                actual = outcome.output_size_bytes,
                "Output is larger than the original; keeping it"
            );
        }

        info!(
            output = %outcome.output_path.display(),
            actual = %format_bytes(outcome.output_size_bytes),
            elapsed_ms = outcome.duration_ms,
            "Encoded"
        );

        Ok(JobStatus::Succeeded)
    }
}

/// Removes whatever a failed encode left at `path`.
async fn discard_partial_output(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "Removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), "Failed to remove partial output: {}", e),
    }
}
