//! FFmpeg-based converter implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::EncodeOutcome;
use crate::preset::Codec;
use crate::resolver::ResolvedJob;

/// FFmpeg-based converter implementation.
pub struct FfmpegConverter {
    config: ConverterConfig,
}

impl FfmpegConverter {
    /// Creates a new FFmpeg converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Builds ffmpeg arguments for a resolved job.
    pub fn build_args(&self, job: &ResolvedJob) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            "-i".to_string(),
            job.input_path.to_string_lossy().to_string(),
        ];

        if let Some(chain) = job.filters.to_ffmpeg_expr() {
            args.extend(["-af".to_string(), chain]);
        }

        args.extend([
            "-ac".to_string(),
            job.channels.to_string(),
            "-ar".to_string(),
            job.sample_rate_hz.to_string(),
        ]);

        args.extend(codec_args(job.codec, job.bitrate_bps));

        args.extend(self.config.extra_ffmpeg_args.iter().cloned());

        args.push(job.output_path.to_string_lossy().to_string());

        args
    }

    /// Extracts the duration from ffprobe JSON output.
    ///
    /// The container duration wins; otherwise the first audio stream that
    /// reports one is used.
    fn parse_probe_duration(output: &str) -> Result<f64, ConverterError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: Option<ProbeFormat>,
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            codec_type: Option<String>,
            duration: Option<String>,
        }

        let probe: ProbeOutput = serde_json::from_str(output).map_err(|e| {
            ConverterError::probe_failed(format!("Failed to parse ffprobe output: {}", e))
        })?;

        let raw = match probe.format.and_then(|f| f.duration) {
            Some(container) => Some(container),
            None => probe
                .streams
                .into_iter()
                .filter(|s| s.codec_type.as_deref() == Some("audio"))
                .find_map(|s| s.duration),
        };

        let raw = raw.ok_or_else(|| ConverterError::probe_failed("no duration reported"))?;
        let duration: f64 = raw.trim().parse().map_err(|_| {
            ConverterError::probe_failed(format!("unparseable duration: {}", raw))
        })?;

        if !duration.is_finite() || duration <= 0.0 {
            return Err(ConverterError::probe_failed(format!(
                "invalid duration: {}",
                duration
            )));
        }

        Ok(duration)
    }

    fn not_found_or_io(
        e: std::io::Error,
        missing: impl FnOnce() -> ConverterError,
    ) -> ConverterError {
        if e.kind() == std::io::ErrorKind::NotFound {
            missing()
        } else {
            ConverterError::Io(e)
        }
    }

    async fn check_binary(
        &self,
        path: &Path,
        missing: ConverterError,
    ) -> Result<(), ConverterError> {
        match Command::new(path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => Err(Self::not_found_or_io(e, || missing)),
        }
    }
}

/// Codec-specific encoder flags.
fn codec_args(codec: Codec, bitrate_bps: u32) -> Vec<String> {
    let mut args = vec![
        "-c:a".to_string(),
        codec.ffmpeg_encoder().to_string(),
        "-b:a".to_string(),
        bitrate_bps.to_string(),
    ];
    if codec == Codec::Opus {
        args.extend([
            "-vbr".to_string(),
            "on".to_string(),
            "-compression_level".to_string(),
            "10".to_string(),
        ]);
    }
    args
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn probe_duration(&self, path: &Path) -> Result<f64, ConverterError> {
        if !path.exists() {
            return Err(ConverterError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let output = Command::new(&self.config.ffprobe_path)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                Self::not_found_or_io(e, || ConverterError::FfprobeNotFound {
                    path: self.config.ffprobe_path.clone(),
                })
            })?;

        if !output.status.success() {
            return Err(ConverterError::probe_failed(format!(
                "ffprobe failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let duration = Self::parse_probe_duration(&stdout)?;
        debug!(path = %path.display(), duration_secs = duration, "Probed duration");
        Ok(duration)
    }

    async fn encode(&self, job: &ResolvedJob) -> Result<EncodeOutcome, ConverterError> {
        let start = Instant::now();

        // Ensure output directory exists
        if let Some(parent) = job.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                ConverterError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }

        let args = self.build_args(job);
        debug!(ffmpeg = %self.config.ffmpeg_path.display(), ?args, "Running encoder");

        let output = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                Self::not_found_or_io(e, || ConverterError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ConverterError::encode_failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                if stderr.is_empty() { None } else { Some(stderr) },
            ));
        }

        // Verify output exists and get size
        let output_meta = tokio::fs::metadata(&job.output_path).await.map_err(|_| {
            ConverterError::MissingOutput {
                path: job.output_path.clone(),
            }
        })?;

        Ok(EncodeOutcome {
            output_path: job.output_path.clone(),
            output_size_bytes: output_meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        self.check_binary(
            &self.config.ffmpeg_path,
            ConverterError::FfmpegNotFound {
                path: self.config.ffmpeg_path.clone(),
            },
        )
        .await?;

        self.check_binary(
            &self.config.ffprobe_path,
            ConverterError::FfprobeNotFound {
                path: self.config.ffprobe_path.clone(),
            },
        )
        .await
    }
}
