//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use tinyaudio_core::{parse_bitrate, parse_size, Codec, FilterOptions, JobOptions, UnitError};

#[derive(Debug, Parser)]
#[command(name = "tinyaudio", version)]
#[command(about = "Compress audio files with ffmpeg using speech, music and podcast presets")]
pub struct Cli {
    /// Audio files or directories to compress
    #[arg(required_unless_present = "list_presets")]
    pub paths: Vec<PathBuf>,

    /// Preset to use (see --list-presets)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Output file (single input) or directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suffix for output file names when writing next to the input
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Override the preset's codec
    #[arg(long)]
    pub codec: Option<Codec>,

    /// Target bitrate in kbps, e.g. 48k or 48
    #[arg(short, long)]
    pub bitrate: Option<String>,

    /// Target output size, e.g. 5MB (overrides --bitrate)
    #[arg(long = "target-size", visible_alias = "ts")]
    pub target_size: Option<String>,

    /// Output sample rate in Hz
    #[arg(long, visible_alias = "sr")]
    pub samplerate: Option<u32>,

    /// Output channels
    #[arg(long, visible_alias = "ch", value_parser = clap::value_parser!(u8).range(1..=2))]
    pub channels: Option<u8>,

    /// Loudness normalization target in LUFS
    #[arg(long, allow_negative_numbers = true)]
    pub lufs: Option<f64>,

    /// Trim silence at the start and end
    #[arg(long = "silence-trim", visible_alias = "st")]
    pub silence_trim: bool,

    /// Silence threshold in dB
    #[arg(long = "silence-threshold", visible_alias = "sth", allow_negative_numbers = true)]
    pub silence_threshold: Option<f64>,

    /// Minimum silence duration in seconds
    #[arg(long = "silence-duration", visible_alias = "sd")]
    pub silence_duration: Option<f64>,

    /// High-pass cutoff in Hz (0 disables)
    #[arg(long, visible_alias = "hp")]
    pub highpass: Option<u32>,

    /// Low-pass cutoff in Hz (0 disables)
    #[arg(long, visible_alias = "lp")]
    pub lowpass: Option<u32>,

    /// List available presets and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Configuration file
    #[arg(long, env = "TINYAUDIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Resolve and report every job without encoding
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Builds job overrides, parsing the human-readable size and bitrate.
    pub fn job_options(&self) -> Result<JobOptions, UnitError> {
        Ok(JobOptions {
            target_size_bytes: self.target_size.as_deref().map(parse_size).transpose()?,
            bitrate_bps: self.bitrate.as_deref().map(parse_bitrate).transpose()?,
            sample_rate_hz: self.samplerate,
            channels: self.channels,
            codec: self.codec,
            filters: FilterOptions {
                silence_trim: self.silence_trim,
                silence_threshold_db: self.silence_threshold,
                silence_duration_secs: self.silence_duration,
                highpass_hz: self.highpass,
                lowpass_hz: self.lowpass,
                lufs: self.lufs,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tinyaudio").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aliases_and_negative_numbers() {
        let cli = parse(&[
            "talk.wav", "--ts", "5MB", "--sr", "16000", "--ch", "1", "--lufs", "-18", "--sth",
            "-40", "--st", "--hp", "100", "--lp", "0",
        ]);

        let options = cli.job_options().unwrap();
        assert_eq!(options.target_size_bytes, Some(5 * 1024 * 1024));
        assert_eq!(options.sample_rate_hz, Some(16_000));
        assert_eq!(options.channels, Some(1));
        assert_eq!(options.filters.lufs, Some(-18.0));
        assert_eq!(options.filters.silence_threshold_db, Some(-40.0));
        assert!(options.filters.silence_trim);
        assert_eq!(options.filters.highpass_hz, Some(100));
        assert_eq!(options.filters.lowpass_hz, Some(0));
    }

    #[test]
    fn test_bitrate_and_codec() {
        let cli = parse(&["a.wav", "-b", "48k", "--codec", "MP3"]);
        let options = cli.job_options().unwrap();
        assert_eq!(options.bitrate_bps, Some(48_000));
        assert_eq!(options.codec, Some(Codec::Mp3));
    }

    #[test]
    fn test_bare_bitrate_means_kbps() {
        let options = parse(&["a.wav", "-b", "64"]).job_options().unwrap();
        assert_eq!(options.bitrate_bps, Some(64_000));
    }

    #[test]
    fn test_invalid_size_is_an_error() {
        let cli = parse(&["a.wav", "--target-size", "5 parsecs"]);
        assert!(matches!(
            cli.job_options(),
            Err(UnitError::InvalidSizeFormat(_))
        ));
    }

    #[test]
    fn test_channels_out_of_range_rejected() {
        let result = Cli::try_parse_from(["tinyaudio", "a.wav", "--channels", "6"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_paths_required_unless_listing() {
        assert!(Cli::try_parse_from(["tinyaudio"]).is_err());
        let cli = Cli::try_parse_from(["tinyaudio", "--list-presets"]).unwrap();
        assert!(cli.list_presets);
        assert!(cli.paths.is_empty());
    }
}
