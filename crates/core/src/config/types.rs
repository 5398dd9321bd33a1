use serde::{Deserialize, Serialize};

use crate::converter::ConverterConfig;
use crate::preset::DEFAULT_PRESET;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Fallbacks for options not given on the command line
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Preset used when `--preset` is absent.
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Suffix appended to output stems when writing alongside inputs.
    #[serde(default)]
    pub suffix: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            suffix: String::new(),
        }
    }
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
