//! Converter module: the boundary to the external probing and encoding tools.
//!
//! The `Converter` trait covers the two blocking operations of a job:
//! reading a file's duration and running the encoder for a fully resolved
//! job. `FfmpegConverter` implements it with `ffprobe` and `ffmpeg`.
//!
//! # Example
//!
//! ```ignore
//! use tinyaudio_core::converter::{Converter, FfmpegConverter};
//!
//! let converter = FfmpegConverter::with_defaults();
//! converter.validate().await?;
//!
//! let duration = converter.probe_duration(Path::new("talk.wav")).await?;
//! let job = resolver.resolve(input, output, Some(duration))?;
//! let outcome = converter.encode(&job).await?;
//! println!("{} bytes in {} ms", outcome.output_size_bytes, outcome.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::{ConverterConfig, FFMPEG_LOG_LEVELS};
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use traits::Converter;
pub use types::EncodeOutcome;
