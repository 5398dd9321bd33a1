//! Types for the preset module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::VOICE;

/// Output codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Codec {
    /// Opus (modern, efficient)
    Opus,
    /// Advanced Audio Coding
    Aac,
    /// MPEG Audio Layer III
    Mp3,
}

impl Codec {
    /// All codecs, in the order they are presented to users.
    pub const ALL: [Codec; 3] = [Codec::Opus, Codec::Aac, Codec::Mp3];

    /// Returns the file extension (without the dot) for this codec.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Opus => "opus",
            Self::Aac => "m4a",
            Self::Mp3 => "mp3",
        }
    }

    /// Returns the ffmpeg encoder name for this codec.
    pub fn ffmpeg_encoder(&self) -> &'static str {
        match self {
            Self::Opus => "libopus",
            Self::Aac => "aac",
            Self::Mp3 => "libmp3lame",
        }
    }

    /// Short lowercase name, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unsupported codec '{}' (expected one of: opus, aac, mp3)", s))
    }
}

/// A named bundle of default encoding and filter parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    /// Catalog name.
    pub name: &'static str,
    /// Output sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Output channel count (1 = mono, 2 = stereo).
    pub channels: u8,
    /// Default bitrate in bits per second.
    pub bitrate_bps: u32,
    /// Output codec.
    pub codec: Codec,
    /// Loudness normalization target in LUFS.
    pub lufs: Option<f64>,
    /// High-pass cutoff in Hz.
    pub highpass_hz: Option<u32>,
    /// Low-pass cutoff in Hz.
    pub lowpass_hz: Option<u32>,
    /// Human-readable summary.
    pub description: &'static str,
}

impl Preset {
    /// Whether this is the speech preset.
    pub fn is_voice(&self) -> bool {
        self.name == VOICE
    }
}
