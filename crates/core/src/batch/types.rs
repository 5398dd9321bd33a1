//! Types for the batch module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::preset::Codec;

/// Why a job failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The input disappeared before it could be processed.
    InputNotFound,
    /// The duration could not be read.
    ProbeFailure,
    /// The probed duration could not be used to size the output.
    InvalidDuration,
    /// The encoder failed or could not be started.
    EncodeError,
    /// The encoder reported success but left no output file.
    MissingOutput,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InputNotFound => "input not found",
            Self::ProbeFailure => "probe failure",
            Self::InvalidDuration => "invalid duration",
            Self::EncodeError => "encode error",
            Self::MissingOutput => "missing output",
        };
        f.write_str(name)
    }
}

/// Terminal status of one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Succeeded,
    Failed { kind: FailureKind, reason: String },
    Skipped { reason: String },
}

impl JobStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Outcome of processing one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path (may not exist if the job failed).
    pub output_path: PathBuf,
    /// Codec the job was resolved to.
    pub codec: Codec,
    /// Resolved bitrate in bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate_bps: Option<u32>,
    /// Input size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_size_bytes: Option<u64>,
    /// Size predicted from bitrate and duration, before encoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_size_bytes: Option<u64>,
    /// Size measured after a successful encode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_size_bytes: Option<u64>,
    /// Terminal status.
    pub status: JobStatus,
    /// Wall-clock time spent on this job in milliseconds.
    pub elapsed_ms: u64,
}

impl JobResult {
    /// Creates a result with no measurements yet.
    pub fn new(input_path: PathBuf, output_path: PathBuf, codec: Codec) -> Self {
        Self {
            input_path,
            output_path,
            codec,
            bitrate_bps: None,
            original_size_bytes: None,
            estimated_size_bytes: None,
            actual_size_bytes: None,
            status: JobStatus::Skipped {
                reason: "not processed".to_string(),
            },
            elapsed_ms: 0,
        }
    }

    /// Predicted size reduction in percent, never below zero.
    pub fn estimated_reduction_percent(&self) -> Option<f64> {
        let original = self.original_size_bytes.filter(|&o| o > 0)?;
        let estimated = self.estimated_size_bytes?;
        if estimated >= original {
            return Some(0.0);
        }
        Some(percent_smaller(original, estimated))
    }

    /// Measured size reduction in percent. Negative when the output grew.
    pub fn actual_reduction_percent(&self) -> Option<f64> {
        let original = self.original_size_bytes.filter(|&o| o > 0)?;
        let actual = self.actual_size_bytes?;
        Some(percent_smaller(original, actual))
    }

    /// Whether the kept output is larger than its input.
    pub fn grew(&self) -> bool {
        matches!(
            (self.original_size_bytes, self.actual_size_bytes),
            (Some(original), Some(actual)) if actual > original
        )
    }
}

fn percent_smaller(original: u64, new: u64) -> f64 {
    (original as f64 - new as f64) / original as f64 * 100.0
}

/// Tally of a whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub results: Vec<JobResult>,
}

impl BatchSummary {
    pub fn push(&mut self, result: JobResult) {
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.status.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.status.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, JobStatus::Skipped { .. }))
            .count()
    }

    /// Results that failed, in processing order.
    pub fn failures(&self) -> impl Iterator<Item = &JobResult> {
        self.results.iter().filter(|r| r.status.is_failure())
    }
}
