//! Job resolution: preset + overrides + probed duration -> ResolvedJob.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::bitrate::{effective_lowpass, resolve_bitrate, BitrateRequest, BitrateSource};
use super::error::ResolveError;
use super::filters::{build_filter_chain, FilterChain, FilterOptions};
use crate::preset::{Codec, Preset};

/// Explicit per-run overrides. Every field falls back to the preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOptions {
    /// Desired output size in bytes. Beats `bitrate_bps`.
    pub target_size_bytes: Option<u64>,
    /// Explicit bitrate in bits per second.
    pub bitrate_bps: Option<u32>,
    /// Output sample rate in Hz.
    pub sample_rate_hz: Option<u32>,
    /// Output channel count.
    pub channels: Option<u8>,
    /// Output codec.
    pub codec: Option<Codec>,
    /// Filter overrides.
    #[serde(default)]
    pub filters: FilterOptions,
}

/// A fully determined encoder invocation for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub codec: Codec,
    pub sample_rate_hz: u32,
    pub channels: u8,
    /// Final bitrate, always within the clamp bounds.
    pub bitrate_bps: u32,
    pub bitrate_source: BitrateSource,
    pub filters: FilterChain,
    /// Probed input duration.
    pub duration_secs: Option<f64>,
}

impl ResolvedJob {
    /// Expected output size: bitrate x duration / 8.
    pub fn estimated_size_bytes(&self) -> Option<u64> {
        self.duration_secs
            .map(|secs| (f64::from(self.bitrate_bps) * secs / 8.0) as u64)
    }
}

/// Resolves jobs against one preset and one set of overrides.
#[derive(Debug, Clone)]
pub struct JobResolver {
    preset: &'static Preset,
    options: JobOptions,
}

impl JobResolver {
    pub fn new(preset: &'static Preset, options: JobOptions) -> Self {
        Self { preset, options }
    }

    pub fn preset(&self) -> &'static Preset {
        self.preset
    }

    pub fn options(&self) -> &JobOptions {
        &self.options
    }

    /// The codec every job from this resolver will use.
    pub fn codec(&self) -> Codec {
        self.options.codec.unwrap_or(self.preset.codec)
    }

    /// Resolves one job.
    ///
    /// `duration_secs` is required only when a target size is set.
    pub fn resolve(
        &self,
        input_path: &Path,
        output_path: PathBuf,
        duration_secs: Option<f64>,
    ) -> Result<ResolvedJob, ResolveError> {
        let preset = self.preset;
        let options = &self.options;

        let bitrate = resolve_bitrate(BitrateRequest {
            target_size_bytes: options.target_size_bytes,
            explicit_bps: options.bitrate_bps,
            preset_default_bps: preset.bitrate_bps,
            duration_secs,
        })?;

        let lowpass_hz = effective_lowpass(preset, bitrate.bps, options.filters.lowpass_hz);
        let filters = build_filter_chain(preset, &options.filters, lowpass_hz);

        Ok(ResolvedJob {
            input_path: input_path.to_path_buf(),
            output_path,
            codec: self.codec(),
            sample_rate_hz: options
                .sample_rate_hz
                .filter(|&hz| hz > 0)
                .unwrap_or(preset.sample_rate_hz),
            channels: options
                .channels
                .filter(|&ch| ch > 0)
                .unwrap_or(preset.channels),
            bitrate_bps: bitrate.bps,
            bitrate_source: bitrate.source,
            filters,
            duration_secs,
        })
    }
}
