//! Shared fixtures for the HTTP integration tests.
//!
//! Each fixture owns a temporary directory holding the sled database and
//! the upload directory.

#![allow(dead_code)]

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use slicecms::cms_node::{AppState, CmsConfig, Environment};
use slicecms::db_operations::DbOperations;
use slicecms::services::CmsServices;
use slicecms::webhook::{SliceEvent, SliceEventPublisher};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Publisher that drops every event
pub struct NullPublisher;

impl SliceEventPublisher for NullPublisher {
    fn publish(&self, _event: SliceEvent) {}
}

pub struct TestCms {
    pub state: web::Data<AppState>,
    pub config: CmsConfig,
    pub _temp_dir: TempDir,
}

/// Configuration pointing into `dir`, with no webhook URLs
pub fn test_config(dir: &TempDir) -> CmsConfig {
    let mut config = CmsConfig::new(dir.path().join("db"));
    config.upload_dir = dir.path().join("uploads");
    config.webhook.urls = Vec::new();
    config.environment = Environment::Test;
    config
}

/// Build application state over a temporary store
pub fn build_state(config: &CmsConfig, publisher: Arc<dyn SliceEventPublisher>) -> web::Data<AppState> {
    let db = sled::Config::new()
        .path(&config.storage_path)
        .temporary(true)
        .open()
        .expect("Failed to open temporary database");
    let db_ops = Arc::new(DbOperations::new(db).expect("Failed to create DbOperations"));
    let services = CmsServices::new(db_ops, publisher, config);
    web::Data::new(AppState::new(services, config))
}

impl TestCms {
    pub fn new() -> Self {
        Self::with_publisher(Arc::new(NullPublisher))
    }

    pub fn with_publisher(publisher: Arc<dyn SliceEventPublisher>) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let config = test_config(&temp_dir);
        let state = build_state(&config, publisher);
        Self {
            state,
            config,
            _temp_dir: temp_dir,
        }
    }
}

pub fn page_content_type() -> Value {
    json!({
        "name": "page",
        "description": "Landing pages",
        "schema": {
            "fields": [{"id": "title", "type": "text", "label": "Title", "required": true}]
        }
    })
}

pub fn hero_slice() -> Value {
    json!({
        "sliceType": "hero",
        "name": "Hero",
        "schema": {
            "primary": [{"id": "title", "type": "text", "label": "Title", "required": true}]
        }
    })
}

pub fn home_document(status: &str) -> Value {
    json!({
        "uid": "home",
        "title": "Home",
        "contentType": "page",
        "data": {"title": "Home", "uid": "home", "body": []},
        "status": status
    })
}

/// One request seen by a [`WebhookReceiver`]
#[derive(Debug, Clone)]
pub struct ReceivedHook {
    pub path: String,
    pub secret: Option<String>,
    pub body: Value,
}

type Received = Arc<Mutex<Vec<ReceivedHook>>>;

async fn record_hook(req: HttpRequest, body: web::Json<Value>, received: web::Data<Received>) -> HttpResponse {
    let secret = req
        .headers()
        .get("x-webhook-secret")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    received.lock().unwrap().push(ReceivedHook {
        path: req.path().to_string(),
        secret,
        body: body.into_inner(),
    });
    HttpResponse::Ok().finish()
}

/// A throw-away HTTP server that records every webhook POST
pub struct WebhookReceiver {
    pub base_url: String,
    received: Received,
    handle: actix_web::dev::ServerHandle,
}

impl WebhookReceiver {
    pub async fn start() -> Self {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let data = web::Data::new(received.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/{hook}", web::post().to(record_hook))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind webhook receiver");
        let address = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        tokio::spawn(server);

        Self {
            base_url: format!("http://{}", address),
            received,
            handle,
        }
    }

    pub fn url(&self, hook: &str) -> String {
        format!("{}/{}", self.base_url, hook)
    }

    pub fn received(&self) -> Vec<ReceivedHook> {
        self.received.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}
