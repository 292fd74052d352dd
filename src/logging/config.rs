//! Configuration management for the logging system
//!
//! Loaded from a TOML file with environment variable overrides.

use super::features::LogFeature;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const VALID_LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Main logging configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub general: GeneralConfig,
    pub outputs: OutputsConfig,
    /// Feature name to level, e.g. `webhook = "DEBUG"`
    pub features: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default log level for all modules
    pub default_level: String,
    pub enable_colors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputsConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub level: String,
    pub include_timestamp: bool,
    pub include_module: bool,
    pub include_thread: bool,
}

/// File output; the file rolls over daily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: String,
    pub level: String,
    pub include_timestamp: bool,
    pub include_module: bool,
    pub include_thread: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            outputs: OutputsConfig::default(),
            features: Self::default_features(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_level: "INFO".to_string(),
            enable_colors: true,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "INFO".to_string(),
            include_timestamp: true,
            include_module: true,
            include_thread: false,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "logs/slicecms.log".to_string(),
            level: "DEBUG".to_string(),
            include_timestamp: true,
            include_module: true,
            include_thread: true,
        }
    }
}

impl LogConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Defaults with environment variable overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides to the configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("SLICECMS_LOG_LEVEL") {
            self.general.default_level = level.to_uppercase();
        }
        if let Ok(enabled) = std::env::var("SLICECMS_LOG_CONSOLE_ENABLED") {
            self.outputs.console.enabled = enabled.parse().unwrap_or(true);
        }
        if let Ok(enabled) = std::env::var("SLICECMS_LOG_FILE_ENABLED") {
            self.outputs.file.enabled = enabled.parse().unwrap_or(false);
        }
        if let Ok(path) = std::env::var("SLICECMS_LOG_FILE_PATH") {
            self.outputs.file.path = path;
        }

        for (key, value) in std::env::vars() {
            if let Some(feature) = key.strip_prefix("SLICECMS_LOG_FEATURE_") {
                self.features
                    .insert(feature.to_lowercase(), value.to_uppercase());
            }
        }
    }

    fn default_features() -> HashMap<String, String> {
        LogFeature::ALL
            .iter()
            .map(|feature| {
                let level = match feature {
                    LogFeature::Database => "WARN",
                    _ => "INFO",
                };
                (feature.name().to_string(), level.to_string())
            })
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for level in [
            &self.general.default_level,
            &self.outputs.console.level,
            &self.outputs.file.level,
        ] {
            if !VALID_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::InvalidLevel(level.clone()));
            }
        }

        for (feature, level) in &self.features {
            if !VALID_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::InvalidFeatureLevel(
                    feature.clone(),
                    level.clone(),
                ));
            }
        }

        Ok(())
    }

    /// `EnvFilter` directives: the default level, then one entry per feature.
    ///
    /// Unknown feature names are used verbatim as targets.
    pub fn filter_directives(&self) -> String {
        let mut features: Vec<_> = self.features.iter().collect();
        features.sort();

        let mut directives = vec![self.general.default_level.to_lowercase()];
        for (feature, level) in features {
            let target = LogFeature::from_name(feature)
                .map(|f| f.target().to_string())
                .unwrap_or_else(|| feature.clone());
            directives.push(format!("{}={}", target, level.to_lowercase()));
        }
        directives.join(",")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
    #[error("Invalid log level for feature '{0}': {1}")]
    InvalidFeatureLevel(String, String),
}
