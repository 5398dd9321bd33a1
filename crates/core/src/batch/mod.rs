//! Batch orchestration.
//!
//! Runs a list of inputs through probe, resolve and encode, one file at a
//! time. Every per-file problem becomes a [`JobResult`]; nothing that goes
//! wrong with one file stops the next one from being processed.

mod discovery;
mod error;
mod orchestrator;
mod output;
mod types;

pub use discovery::{discover_inputs, is_audio_file, AUDIO_EXTENSIONS};
pub use error::BatchError;
pub use orchestrator::BatchOrchestrator;
pub use output::{output_path_for, OutputTarget, COLLISION_MARKER};
pub use types::{BatchSummary, FailureKind, JobResult, JobStatus};
