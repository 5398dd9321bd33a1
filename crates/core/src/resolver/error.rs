//! Error types for the resolver module.

use thiserror::Error;

/// Errors raised while resolving a job.
#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    /// A target size was requested against a non-positive duration.
    #[error("Duration must be positive, got {duration_secs}")]
    InvalidDuration { duration_secs: f64 },

    /// A target size was requested but no duration was supplied.
    #[error("A target size requires the input duration")]
    MissingDuration,
}
