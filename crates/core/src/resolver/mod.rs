//! Encoding-parameter resolution.
//!
//! Turns a preset plus the user's explicit overrides into a single
//! [`ResolvedJob`]. Resolution happens once per input, before the encoder
//! starts, and never mutates the preset or the options it was given.
//!
//! Bitrate precedence is total: a target size beats an explicit bitrate,
//! which beats the preset default. The result is always clamped to
//! [`MIN_BITRATE_BPS`]..=[`MAX_BITRATE_BPS`].

mod bitrate;
mod error;
mod filters;
mod job;

pub use bitrate::{
    effective_lowpass, resolve_bitrate, BitrateRequest, BitrateSource, ResolvedBitrate,
    CONTAINER_OVERHEAD, MAX_BITRATE_BPS, MIN_BITRATE_BPS, ULTRA_LOW_BITRATE_BPS,
    ULTRA_LOW_LOWPASS_HZ,
};
pub use error::ResolveError;
pub use filters::{
    build_filter_chain, FilterChain, FilterOptions, FilterStage, LOUDNORM_LRA,
    LOUDNORM_TRUE_PEAK_DB,
};
pub use job::{JobOptions, JobResolver, ResolvedJob};
