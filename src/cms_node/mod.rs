//! The CMS server: configuration, HTTP surface and request handling.

pub mod config;
pub mod http_helpers;
pub mod http_server;
pub mod request_validation;
pub mod routes;

pub use config::{load_cms_config, CmsConfig, Environment, WebhookConfig};
pub use http_server::{create_app, AppState, CmsHttpServer};
