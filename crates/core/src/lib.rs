pub mod batch;
pub mod config;
pub mod converter;
pub mod preset;
pub mod resolver;
pub mod testing;
pub mod units;

pub use batch::{
    discover_inputs, output_path_for, BatchError, BatchOrchestrator, BatchSummary, FailureKind,
    JobResult, JobStatus, OutputTarget, AUDIO_EXTENSIONS,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DefaultsConfig,
};
pub use converter::{Converter, ConverterConfig, ConverterError, EncodeOutcome, FfmpegConverter};
pub use preset::{Codec, Preset, PresetError};
pub use resolver::{
    BitrateSource, FilterChain, FilterOptions, FilterStage, JobOptions, JobResolver,
    ResolveError, ResolvedJob,
};
pub use units::{format_bytes, parse_bitrate, parse_size, UnitError};
