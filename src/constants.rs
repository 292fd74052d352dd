/// Common constants used across the slicecms project.
///
/// These defaults are used for command line arguments and
/// configuration when explicit values are not provided.
pub const DEFAULT_HTTP_PORT: u16 = 3001;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3001";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_STORAGE_PATH: &str = "data";
pub const DEFAULT_CONFIG_PATH: &str = "config/cms_config.json";

/// 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Largest accepted JSON request body, 10 MiB
pub const MAX_JSON_BODY_SIZE: usize = 10 * 1024 * 1024;

pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:3000/api/webhooks/slices";
pub const DEFAULT_WEBHOOK_SECRET: &str = "your-secret-key";
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";
/// Events waiting for the dispatcher; further events are dropped
pub const WEBHOOK_QUEUE_CAPACITY: usize = 1024;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_DOCUMENT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_ASSET_PAGE_SIZE: u32 = 50;

/// Number of recent documents embedded in a content type detail response.
pub const RECENT_DOCUMENTS_PREVIEW: usize = 5;

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
