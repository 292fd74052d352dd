//! File output handler with daily rotation

use super::{parse_level_filter, BoxedLayer};
use crate::logging::config::FileConfig;
use crate::logging::LoggingError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::fmt;
use tracing_subscriber::Layer;

/// File output handler that writes through a background worker
pub struct FileOutput {
    config: FileConfig,
}

impl FileOutput {
    /// Create the handler and the log directory
    pub async fn new(config: &FileConfig) -> Result<Self, LoggingError> {
        let path = Path::new(&config.path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        Ok(Self {
            config: config.clone(),
        })
    }

    /// Create a tracing layer for file output.
    ///
    /// The returned guard flushes pending lines when dropped and must be
    /// kept alive for as long as the layer is installed.
    pub fn create_layer(&self) -> Result<(BoxedLayer, WorkerGuard), LoggingError> {
        let level = parse_level_filter(&self.config.level)?;

        let path = Path::new(&self.config.path);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("slicecms.log");

        let appender = rolling::daily(directory, filename);
        let (writer, guard) = non_blocking(appender);

        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(self.config.include_module)
            .with_thread_ids(self.config.include_thread)
            .with_thread_names(self.config.include_thread);

        let layer = if self.config.include_timestamp {
            layer.with_filter(level).boxed()
        } else {
            layer.without_time().with_filter(level).boxed()
        };

        Ok((layer, guard))
    }
}
