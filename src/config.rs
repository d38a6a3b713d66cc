//! Configuration for node construction and output
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (figure-schema.toml)
//! - Environment variables (FIGURE_SCHEMA__*)
//!
//! ## Example config file (figure-schema.toml):
//! ```toml
//! [validation]
//! skip_invalid = false
//! unknown_fields = "pass_through"
//!
//! [output]
//! format = "compact"
//! include_pass_through = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::factory::UnknownFieldPolicy;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Serialization settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Validation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Drop invalid values instead of failing construction
    #[serde(default)]
    pub skip_invalid: bool,

    /// Handling of keys that name no declared field
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON layout (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Emit pass-through keys alongside declared fields
    #[serde(default = "default_true")]
    pub include_pass_through: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            include_pass_through: true,
        }
    }
}

impl SchemaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "figure-schema.toml",
            ".figure-schema.toml",
            "config/figure-schema.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "figure-schema") {
            let xdg_config = config_dir.config_dir().join("figure-schema.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("FIGURE_SCHEMA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
