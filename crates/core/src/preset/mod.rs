//! Named encoding presets.
//!
//! The catalog is a fixed, process-wide table. Presets are never mutated;
//! per-run overrides live in [`crate::resolver::JobOptions`] and are merged
//! into a [`crate::resolver::ResolvedJob`] instead.
//!
//! # Example
//!
//! ```
//! use tinyaudio_core::preset::{self, Codec};
//!
//! let voice = preset::lookup("voice").unwrap();
//! assert_eq!(voice.codec, Codec::Opus);
//! assert_eq!(voice.channels, 1);
//! ```

mod error;
mod types;

pub use error::PresetError;
pub use types::{Codec, Preset};

use once_cell::sync::Lazy;

/// Name of the preset used when none is selected.
pub const DEFAULT_PRESET: &str = VOICE;

/// Name of the speech preset. Some resolution rules only apply to it.
pub const VOICE: &str = "voice";

static CATALOG: Lazy<Vec<Preset>> = Lazy::new(|| {
    vec![
        Preset {
            name: VOICE,
            sample_rate_hz: 24000,
            channels: 1,
            bitrate_bps: 32000,
            codec: Codec::Opus,
            lufs: Some(-16.0),
            highpass_hz: Some(80),
            lowpass_hz: Some(12000),
            description: "Voice optimized - mono, 32kbps Opus (~70-90% smaller)",
        },
        Preset {
            name: "music",
            sample_rate_hz: 48000,
            channels: 2,
            bitrate_bps: 80000,
            codec: Codec::Opus,
            lufs: Some(-14.0),
            highpass_hz: None,
            lowpass_hz: None,
            description: "Music quality - stereo, 80kbps Opus (~40-60% smaller)",
        },
        Preset {
            name: "podcast",
            sample_rate_hz: 44100,
            channels: 1,
            bitrate_bps: 64000,
            codec: Codec::Opus,
            lufs: Some(-16.0),
            highpass_hz: Some(60),
            lowpass_hz: Some(15000),
            description: "Podcast - mono, 64kbps Opus (~50-75% smaller)",
        },
    ]
});

/// Returns every preset in catalog order.
pub fn all() -> &'static [Preset] {
    CATALOG.as_slice()
}

/// Returns the preset names in catalog order.
pub fn names() -> Vec<&'static str> {
    CATALOG.iter().map(|p| p.name).collect()
}

/// Looks up a preset by exact name.
pub fn lookup(name: &str) -> Result<&'static Preset, PresetError> {
    CATALOG
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| PresetError::Unknown {
            name: name.to_string(),
            available: names().join(", "),
        })
}
