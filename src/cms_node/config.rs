use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_CONFIG_PATH, DEFAULT_MAX_FILE_SIZE, DEFAULT_PUBLIC_BASE_URL,
    DEFAULT_STORAGE_PATH, DEFAULT_UPLOAD_DIR, DEFAULT_WEBHOOK_SECRET,
    DEFAULT_WEBHOOK_TIMEOUT_SECS, DEFAULT_WEBHOOK_URL,
};
use crate::error::{CmsError, CmsResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Deployment environment. Only development exposes server error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            _ => Environment::Production,
        }
    }
}

/// Where slice lifecycle events are delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub urls: Vec<String>,
    /// Sent in the `x-webhook-secret` header
    pub secret: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            urls: vec![DEFAULT_WEBHOOK_URL.to_string()],
            secret: DEFAULT_WEBHOOK_SECRET.to_string(),
            timeout_seconds: DEFAULT_WEBHOOK_TIMEOUT_SECS,
        }
    }
}

/// Configuration for a CMS server instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Path where the sled database lives
    pub storage_path: PathBuf,
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Base of public asset URLs
    pub public_base_url: String,
    pub upload_dir: PathBuf,
    /// Upload size limit in bytes
    pub max_file_size: u64,
    /// The only MIME types accepted for upload
    pub allowed_mime_types: Vec<String>,
    pub webhook: WebhookConfig,
    pub environment: Environment,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: default_allowed_mime_types(),
            webhook: WebhookConfig::default(),
            environment: Environment::default(),
        }
    }
}

pub fn default_allowed_mime_types() -> Vec<String> {
    [
        "image/jpeg",
        "image/jpg",
        "image/png",
        "image/gif",
        "image/webp",
        "image/svg+xml",
        "application/pdf",
    ]
    .iter()
    .map(|mime| mime.to_string())
    .collect()
}

impl CmsConfig {
    /// Create a configuration with the specified storage path
    pub fn new(storage_path: PathBuf) -> Self {
        Self {
            storage_path,
            ..Default::default()
        }
    }

    pub fn with_bind_address(mut self, address: &str) -> Self {
        self.bind_address = address.to_string();
        self
    }

    /// Replace the port of `bind_address`, keeping its host
    pub fn with_port(mut self, port: u16) -> Self {
        let host = self
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| self.bind_address.clone());
        self.bind_address = format!("{}:{}", host, port);
        self
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`. Unparsable numbers are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("SLICECMS_STORAGE_PATH") {
            self.storage_path = PathBuf::from(path);
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            *self = std::mem::take(self).with_port(port);
        }
        if let Some(url) = lookup("API_URL") {
            self.public_base_url = url;
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(dir);
        }
        if let Some(size) = lookup("MAX_FILE_SIZE").and_then(|s| s.parse().ok()) {
            self.max_file_size = size;
        }
        if let Some(urls) = lookup("SLICE_WEBHOOK_URLS") {
            self.webhook.urls = urls
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(secret) = lookup("WEBHOOK_SECRET") {
            self.webhook.secret = secret;
        }
        if let Some(env) = lookup("SLICECMS_ENV") {
            self.environment = Environment::parse(&env);
        }
    }

    pub fn validate(&self) -> CmsResult<()> {
        if self.bind_address.trim().is_empty() {
            return Err(CmsError::Config("bind_address must not be empty".to_string()));
        }
        if self.max_file_size == 0 {
            return Err(CmsError::Config(
                "max_file_size must be greater than 0".to_string(),
            ));
        }
        if self.webhook.timeout_seconds == 0 {
            return Err(CmsError::Config(
                "webhook.timeout_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load the server configuration.
///
/// The file is taken from `path`, else `SLICECMS_CONFIG`, else
/// `config/cms_config.json`. A missing file yields defaults; a file that
/// does not parse is an error. Environment overrides are applied next and
/// `port` wins over everything.
pub fn load_cms_config(path: Option<&str>, port: Option<u16>) -> CmsResult<CmsConfig> {
    let config_path = path
        .map(|p| p.to_string())
        .or_else(|| std::env::var("SLICECMS_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = match std::fs::read_to_string(&config_path) {
        Ok(config_str) => serde_json::from_str::<CmsConfig>(&config_str).map_err(|e| {
            log::error!("Failed to parse CMS configuration: {}", e);
            CmsError::Config(format!("Invalid configuration file {}: {}", config_path, e))
        })?,
        Err(_) => CmsConfig::default(),
    };

    config.apply_env_overrides();
    if let Some(p) = port {
        config = config.with_port(p);
    }
    config.validate()?;
    Ok(config)
}
