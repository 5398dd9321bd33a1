//! Audio filter chain construction.

use serde::{Deserialize, Serialize};

use crate::preset::Preset;

/// Loudness range tolerance passed to `loudnorm`.
pub const LOUDNORM_LRA: f64 = 11.0;

/// True-peak ceiling in dBTP passed to `loudnorm`.
pub const LOUDNORM_TRUE_PEAK_DB: f64 = -1.5;

const VOICE_SILENCE_THRESHOLD_DB: f64 = -50.0;
const DEFAULT_SILENCE_THRESHOLD_DB: f64 = -45.0;
const VOICE_SILENCE_DURATION_SECS: f64 = 0.5;
const DEFAULT_SILENCE_DURATION_SECS: f64 = 0.8;

/// Explicit filter overrides. `None` falls back to the preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Trim silence at both ends of the track.
    #[serde(default)]
    pub silence_trim: bool,
    /// Silence threshold in dB.
    pub silence_threshold_db: Option<f64>,
    /// Minimum silence length in seconds.
    pub silence_duration_secs: Option<f64>,
    /// High-pass cutoff in Hz.
    pub highpass_hz: Option<u32>,
    /// Low-pass cutoff in Hz.
    pub lowpass_hz: Option<u32>,
    /// Loudness target in LUFS.
    pub lufs: Option<f64>,
}

/// One stage of the filter pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterStage {
    /// Remove leading and trailing silence.
    SilenceTrim {
        threshold_db: f64,
        duration_secs: f64,
    },
    /// Remove rumble below the cutoff.
    HighPass { cutoff_hz: u32 },
    /// Remove content above the cutoff.
    LowPass { cutoff_hz: u32 },
    /// EBU R128 loudness normalization.
    Loudnorm { integrated_lufs: f64 },
}

impl FilterStage {
    /// Position of this stage in every chain.
    fn rank(&self) -> u8 {
        match self {
            Self::SilenceTrim { .. } => 0,
            Self::HighPass { .. } => 1,
            Self::LowPass { .. } => 2,
            Self::Loudnorm { .. } => 3,
        }
    }

    /// Short stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SilenceTrim { .. } => "silenceremove",
            Self::HighPass { .. } => "highpass",
            Self::LowPass { .. } => "lowpass",
            Self::Loudnorm { .. } => "loudnorm",
        }
    }

    /// Renders the stage as an ffmpeg filter expression.
    pub fn to_ffmpeg(&self) -> String {
        match self {
            Self::SilenceTrim {
                threshold_db,
                duration_secs,
            } => format!(
                "silenceremove=start_periods=1:start_duration={d}:start_threshold={t}dB:\
                 stop_periods=1:stop_duration={d}:stop_threshold={t}dB",
                d = duration_secs,
                t = threshold_db
            ),
            Self::HighPass { cutoff_hz } => format!("highpass=f={}", cutoff_hz),
            Self::LowPass { cutoff_hz } => format!("lowpass=f={}", cutoff_hz),
            Self::Loudnorm { integrated_lufs } => format!(
                "loudnorm=I={:?}:LRA={}:TP={}",
                integrated_lufs, LOUDNORM_LRA, LOUDNORM_TRUE_PEAK_DB
            ),
        }
    }
}

/// An ordered filter pipeline. Empty means no filtering.
///
/// Stages always run silence trim, high-pass, low-pass, loudnorm, no matter
/// how the chain was put together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    /// Builds a chain from stages given in any order.
    pub fn from_stages(mut stages: Vec<FilterStage>) -> Self {
        stages.sort_by_key(FilterStage::rank);
        Self { stages }
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// The comma-joined `-af` expression, or `None` when empty.
    pub fn to_ffmpeg_expr(&self) -> Option<String> {
        if self.stages.is_empty() {
            return None;
        }
        Some(
            self.stages
                .iter()
                .map(FilterStage::to_ffmpeg)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Builds the filter chain for a preset and a set of overrides.
///
/// `lowpass_hz` is the already corrected low-pass cutoff (see
/// [`super::effective_lowpass`]); `options.lowpass_hz` is not consulted.
/// A cutoff of 0 disables its stage.
pub fn build_filter_chain(
    preset: &Preset,
    options: &FilterOptions,
    lowpass_hz: Option<u32>,
) -> FilterChain {
    let mut stages = Vec::with_capacity(4);

    if options.silence_trim {
        let (default_threshold, default_duration) = if preset.is_voice() {
            (VOICE_SILENCE_THRESHOLD_DB, VOICE_SILENCE_DURATION_SECS)
        } else {
            (DEFAULT_SILENCE_THRESHOLD_DB, DEFAULT_SILENCE_DURATION_SECS)
        };
        stages.push(FilterStage::SilenceTrim {
            threshold_db: options.silence_threshold_db.unwrap_or(default_threshold),
            duration_secs: options.silence_duration_secs.unwrap_or(default_duration),
        });
    }

    if let Some(cutoff_hz) = options
        .highpass_hz
        .or(preset.highpass_hz)
        .filter(|&hz| hz > 0)
    {
        stages.push(FilterStage::HighPass { cutoff_hz });
    }

    if let Some(cutoff_hz) = lowpass_hz.filter(|&hz| hz > 0) {
        stages.push(FilterStage::LowPass { cutoff_hz });
    }

    if let Some(integrated_lufs) = options.lufs.or(preset.lufs) {
        stages.push(FilterStage::Loudnorm { integrated_lufs });
    }

    FilterChain::from_stages(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset;

    fn names(chain: &FilterChain) -> Vec<&'static str> {
        chain.stages().iter().map(FilterStage::name).collect()
    }

    #[test]
    fn test_voice_defaults() {
        let voice = preset::lookup("voice").unwrap();
        let chain = build_filter_chain(voice, &FilterOptions::default(), voice.lowpass_hz);
        assert_eq!(
            chain.to_ffmpeg_expr().unwrap(),
            "highpass=f=80,lowpass=f=12000,loudnorm=I=-16.0:LRA=11:TP=-1.5"
        );
    }

    #[test]
    fn test_music_has_only_loudnorm() {
        let music = preset::lookup("music").unwrap();
        let chain = build_filter_chain(music, &FilterOptions::default(), music.lowpass_hz);
        assert_eq!(names(&chain), vec!["loudnorm"]);
        assert_eq!(
            chain.stages()[0],
            FilterStage::Loudnorm { integrated_lufs: -14.0 }
        );
    }

    #[test]
    fn test_loudnorm_target_keeps_decimal() {
        let stage = FilterStage::Loudnorm { integrated_lufs: -14.0 };
        assert_eq!(stage.to_ffmpeg(), "loudnorm=I=-14.0:LRA=11:TP=-1.5");

        let stage = FilterStage::Loudnorm { integrated_lufs: -18.5 };
        assert_eq!(stage.to_ffmpeg(), "loudnorm=I=-18.5:LRA=11:TP=-1.5");
    }

    #[test]
    fn test_full_chain_order() {
        let music = preset::lookup("music").unwrap();
        let options = FilterOptions {
            silence_trim: true,
            lowpass_hz: Some(16_000),
            highpass_hz: Some(40),
            lufs: Some(-18.0),
            ..Default::default()
        };
        let chain = build_filter_chain(music, &options, options.lowpass_hz);
        assert_eq!(
            names(&chain),
            vec!["silenceremove", "highpass", "lowpass", "loudnorm"]
        );
    }

    #[test]
    fn test_from_stages_reorders() {
        let chain = FilterChain::from_stages(vec![
            FilterStage::Loudnorm { integrated_lufs: -16.0 },
            FilterStage::LowPass { cutoff_hz: 12_000 },
            FilterStage::SilenceTrim {
                threshold_db: -50.0,
                duration_secs: 0.5,
            },
            FilterStage::HighPass { cutoff_hz: 80 },
        ]);
        assert_eq!(
            names(&chain),
            vec!["silenceremove", "highpass", "lowpass", "loudnorm"]
        );
    }

    #[test]
    fn test_silence_trim_defaults_per_preset() {
        let options = FilterOptions {
            silence_trim: true,
            ..Default::default()
        };

        let voice = preset::lookup("voice").unwrap();
        let chain = build_filter_chain(voice, &options, None);
        assert_eq!(
            chain.stages()[0],
            FilterStage::SilenceTrim {
                threshold_db: -50.0,
                duration_secs: 0.5
            }
        );

        let podcast = preset::lookup("podcast").unwrap();
        let chain = build_filter_chain(podcast, &options, None);
        assert_eq!(
            chain.stages()[0],
            FilterStage::SilenceTrim {
                threshold_db: -45.0,
                duration_secs: 0.8
            }
        );
    }

    #[test]
    fn test_silence_trim_expression() {
        let stage = FilterStage::SilenceTrim {
            threshold_db: -40.0,
            duration_secs: 1.25,
        };
        assert_eq!(
            stage.to_ffmpeg(),
            "silenceremove=start_periods=1:start_duration=1.25:start_threshold=-40dB:\
             stop_periods=1:stop_duration=1.25:stop_threshold=-40dB"
        );
    }

    #[test]
    fn test_silence_trim_overrides() {
        let voice = preset::lookup("voice").unwrap();
        let options = FilterOptions {
            silence_trim: true,
            silence_threshold_db: Some(-60.0),
            silence_duration_secs: Some(2.0),
            ..Default::default()
        };
        let chain = build_filter_chain(voice, &options, None);
        assert_eq!(
            chain.stages()[0],
            FilterStage::SilenceTrim {
                threshold_db: -60.0,
                duration_secs: 2.0
            }
        );
    }

    #[test]
    fn test_zero_cutoff_disables_stage() {
        let voice = preset::lookup("voice").unwrap();
        let options = FilterOptions {
            highpass_hz: Some(0),
            ..Default::default()
        };
        let chain = build_filter_chain(voice, &options, Some(0));
        assert_eq!(names(&chain), vec!["loudnorm"]);
    }

    #[test]
    fn test_empty_chain() {
        let music = preset::lookup("music").unwrap();
        let mut preset = music.clone();
        preset.lufs = None;
        let chain = build_filter_chain(&preset, &FilterOptions::default(), None);
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert_eq!(chain.to_ffmpeg_expr(), None);
    }
}
