//! Console output handler with color support

use super::{parse_level_filter, BoxedLayer};
use crate::logging::config::ConsoleConfig;
use crate::logging::LoggingError;
use std::io;
use tracing_subscriber::fmt;
use tracing_subscriber::Layer;

/// Console output handler that provides terminal output
pub struct ConsoleOutput {
    config: ConsoleConfig,
    colors: bool,
}

impl ConsoleOutput {
    pub fn new(config: &ConsoleConfig, colors: bool) -> Self {
        Self {
            config: config.clone(),
            colors,
        }
    }

    /// Create a tracing layer for console output
    pub fn create_layer(&self) -> Result<BoxedLayer, LoggingError> {
        let level = parse_level_filter(&self.config.level)?;

        let layer = fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(self.colors)
            .with_target(self.config.include_module)
            .with_thread_ids(self.config.include_thread)
            .with_thread_names(self.config.include_thread);

        let layer = if self.config.include_timestamp {
            layer.with_filter(level).boxed()
        } else {
            layer.without_time().with_filter(level).boxed()
        };

        Ok(layer)
    }
}
