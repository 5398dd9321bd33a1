use super::{types::Config, ConfigError};
use crate::converter::FFMPEG_LOG_LEVELS;
use crate::preset;

/// Validate configuration
/// Currently validates:
/// - Default preset names a catalog entry
/// - ffmpeg log level is one ffmpeg accepts
/// - Binary paths are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    preset::lookup(&config.defaults.preset)
        .map_err(|e| ConfigError::ValidationError(format!("defaults.preset: {}", e)))?;

    let level = config.converter.ffmpeg_log_level.as_str();
    if !FFMPEG_LOG_LEVELS.contains(&level) {
        return Err(ConfigError::ValidationError(format!(
            "converter.ffmpeg_log_level '{}' is not one of: {}",
            level,
            FFMPEG_LOG_LEVELS.join(", ")
        )));
    }

    if config.converter.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.ffmpeg_path cannot be empty".to_string(),
        ));
    }
    if config.converter.ffprobe_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.ffprobe_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
