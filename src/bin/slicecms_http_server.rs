use clap::Parser;
use log::{info, warn};
use slicecms::cms_node::{load_cms_config, CmsHttpServer};
use slicecms::logging::{LoggingError, LoggingSystem};

/// Command line options for the HTTP server binary.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the JSON server configuration
    #[arg(long)]
    config: Option<String>,

    /// Port for the HTTP server; overrides the configuration
    #[arg(long)]
    port: Option<u16>,

    /// Path to a TOML logging configuration
    #[arg(long)]
    log_config: Option<String>,
}

/// Main entry point for the slicecms HTTP server.
///
/// # Environment Variables
///
/// * `SLICECMS_CONFIG` - Path to the server configuration (default: config/cms_config.json)
/// * `SLICECMS_LOG_LEVEL` - Default log level
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let logging = match &cli.log_config {
        Some(path) => LoggingSystem::init_from_file(path).await,
        None => LoggingSystem::init_default().await,
    };
    match logging {
        Ok(()) | Err(LoggingError::AlreadyInitialized) => {}
        Err(e) => eprintln!("Failed to initialize logging: {}", e),
    }

    info!("Starting slicecms HTTP server...");
    let config = load_cms_config(cli.config.as_deref(), cli.port)?;
    info!("Config loaded successfully");
    if config.webhook.urls.is_empty() {
        warn!("No webhook URLs configured; slice events will not be delivered");
    }

    let server = CmsHttpServer::new(config)?;
    server.run().await?;

    info!("slicecms HTTP server shut down");
    Ok(())
}
