//! # Logging System
//!
//! Call sites log through the `log` facade using the feature targets from
//! [`features`]. [`LoggingSystem`] installs a `tracing` subscriber with a
//! console and an optional file output, plus the `log` bridge.

pub mod config;
pub mod features;
pub mod outputs;

use config::LogConfig;
use once_cell::sync::OnceCell;
use outputs::{BoxedLayer, ConsoleOutput, FileOutput};
use std::path::Path;
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Configuration the subscriber was installed with
static LOGGING_CONFIG: OnceCell<LogConfig> = OnceCell::new();

/// Keeps the file writer alive until process exit
static FILE_GUARD: OnceCell<Mutex<WorkerGuard>> = OnceCell::new();

pub struct LoggingSystem;

impl LoggingSystem {
    /// Initialize the logging system with defaults and environment overrides
    pub async fn init_default() -> Result<(), LoggingError> {
        Self::init_with_config(LogConfig::from_env()).await
    }

    /// Initialize from a TOML file
    pub async fn init_from_file<P: AsRef<Path>>(path: P) -> Result<(), LoggingError> {
        let config = LogConfig::from_file(path)?;
        Self::init_with_config(config).await
    }

    /// Initialize the logging system with a custom configuration
    pub async fn init_with_config(config: LogConfig) -> Result<(), LoggingError> {
        config.validate()?;
        if LOGGING_CONFIG.get().is_some() {
            return Err(LoggingError::AlreadyInitialized);
        }

        let filter = EnvFilter::try_new(config.filter_directives())
            .map_err(|e| LoggingError::Config(format!("Invalid filter: {}", e)))?;

        let mut layers: Vec<BoxedLayer> = Vec::new();
        if config.outputs.console.enabled {
            let console =
                ConsoleOutput::new(&config.outputs.console, config.general.enable_colors);
            layers.push(console.create_layer()?);
        }

        let mut guard = None;
        if config.outputs.file.enabled {
            let file = FileOutput::new(&config.outputs.file).await?;
            let (layer, file_guard) = file.create_layer()?;
            layers.push(layer);
            guard = Some(file_guard);
        }

        // Also installs the log -> tracing bridge
        tracing_subscriber::registry()
            .with(layers)
            .with(filter)
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)?;

        if let Some(guard) = guard {
            let _ = FILE_GUARD.set(Mutex::new(guard));
        }
        let _ = LOGGING_CONFIG.set(config);

        Ok(())
    }

    pub fn is_initialized() -> bool {
        LOGGING_CONFIG.get().is_some()
    }

    /// Get the configuration the logging system was initialized with
    pub fn get_config() -> Option<LogConfig> {
        LOGGING_CONFIG.get().cloned()
    }
}

/// Logging system errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logging system already initialized")]
    AlreadyInitialized,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Config error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_invalid_config_before_installing() {
        let mut config = LogConfig::default();
        config.general.default_level = "VERBOSE".to_string();

        let err = LoggingSystem::init_with_config(config).await.unwrap_err();
        assert!(matches!(err, LoggingError::ConfigError(_)));
    }
}
