//! Bitrate resolution.

use serde::{Deserialize, Serialize};

use super::error::ResolveError;
use crate::preset::Preset;

/// Lowest bitrate ever handed to the encoder.
pub const MIN_BITRATE_BPS: u32 = 6_000;

/// Highest bitrate ever handed to the encoder.
pub const MAX_BITRATE_BPS: u32 = 512_000;

/// Share of a target size left for audio after container framing.
pub const CONTAINER_OVERHEAD: f64 = 0.97;

/// Voice bitrates at or below this get a narrower low-pass.
pub const ULTRA_LOW_BITRATE_BPS: u32 = 24_000;

/// Low-pass cutoff forced for ultra-low voice bitrates.
pub const ULTRA_LOW_LOWPASS_HZ: u32 = 8_000;

/// Where the resolved bitrate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitrateSource {
    /// Derived from a target output size and the probed duration.
    TargetSize,
    /// Given explicitly by the user.
    Explicit,
    /// The preset's default.
    PresetDefault,
}

/// Inputs to bitrate resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitrateRequest {
    /// Desired output size in bytes.
    pub target_size_bytes: Option<u64>,
    /// Explicit bitrate in bits per second.
    pub explicit_bps: Option<u32>,
    /// Fallback from the preset.
    pub preset_default_bps: u32,
    /// Probed duration. Only consulted for a target size.
    pub duration_secs: Option<f64>,
}

/// A clamped bitrate and the source that won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBitrate {
    pub bps: u32,
    pub source: BitrateSource,
}

/// Resolves the bitrate for one job.
pub fn resolve_bitrate(request: BitrateRequest) -> Result<ResolvedBitrate, ResolveError> {
    let (raw, source) = if let Some(target_bytes) = request.target_size_bytes {
        let duration_secs = request
            .duration_secs
            .ok_or(ResolveError::MissingDuration)?;
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ResolveError::InvalidDuration { duration_secs });
        }
        let bits_available = target_bytes as f64 * 8.0 * CONTAINER_OVERHEAD;
        ((bits_available / duration_secs).floor(), BitrateSource::TargetSize)
    } else if let Some(bps) = request.explicit_bps {
        (f64::from(bps), BitrateSource::Explicit)
    } else {
        (f64::from(request.preset_default_bps), BitrateSource::PresetDefault)
    };

    let bps = raw.clamp(f64::from(MIN_BITRATE_BPS), f64::from(MAX_BITRATE_BPS)) as u32;
    Ok(ResolvedBitrate { bps, source })
}

/// Returns the low-pass cutoff to use once the bitrate is known.
///
/// An explicit cutoff always wins. Otherwise the voice preset drops to
/// [`ULTRA_LOW_LOWPASS_HZ`] at ultra-low bitrates, and everything else
/// keeps the preset's own cutoff.
pub fn effective_lowpass(preset: &Preset, bitrate_bps: u32, explicit: Option<u32>) -> Option<u32> {
    match explicit {
        Some(hz) => Some(hz),
        None if preset.is_voice() && bitrate_bps <= ULTRA_LOW_BITRATE_BPS => {
            Some(ULTRA_LOW_LOWPASS_HZ)
        }
        None => preset.lowpass_hz,
    }
}
