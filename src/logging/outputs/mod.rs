//! Output handlers for the logging system
//!
//! - Console output (optionally colored)
//! - File output (daily rotation)

pub mod console;
pub mod file;

pub use console::ConsoleOutput;
pub use file::FileOutput;

use crate::logging::LoggingError;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Layer, Registry};

/// A type-erased output layer over the root registry
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Parse a configured level name into a filter
pub(crate) fn parse_level_filter(level: &str) -> Result<LevelFilter, LoggingError> {
    match level {
        "TRACE" => Ok(LevelFilter::TRACE),
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARN" => Ok(LevelFilter::WARN),
        "ERROR" => Ok(LevelFilter::ERROR),
        _ => Err(LoggingError::Config(format!("Invalid log level: {}", level))),
    }
}
