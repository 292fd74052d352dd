use crate::cms_node::http_server::AppState;
use crate::constants::SERVICE_VERSION;
use crate::error::{CmsError, CmsResult};
use actix_web::{web, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

const SERVICE_NAME: &str = "slicecms";

/// Describe the service and its mount points
pub async fn service_root() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "endpoints": {
            "public": "/api",
            "admin": "/api/admin",
            "uploads": "/uploads/{filename}",
        },
    }))
}

pub async fn public_index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Public content API",
        "endpoints": [
            "GET /api/content-types",
            "GET /api/content-types/{name}",
            "GET /api/slices",
            "GET /api/slices/{sliceType}",
            "GET /api/documents",
            "GET /api/documents/{uid}",
            "GET /api/health",
        ],
    }))
}

pub async fn admin_index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Admin content API",
        "endpoints": [
            "GET|POST /api/admin/content-types",
            "GET|PUT|DELETE /api/admin/content-types/{name}",
            "GET|POST /api/admin/slices",
            "GET|PUT|DELETE /api/admin/slices/{sliceType}",
            "POST /api/admin/slices/{sliceType}/validate",
            "GET|POST /api/admin/documents",
            "GET|PUT|DELETE /api/admin/documents/{uid}",
            "POST /api/admin/documents/{uid}/publish",
            "POST /api/admin/documents/{uid}/unpublish",
            "GET|POST /api/admin/assets",
            "GET|PUT|DELETE /api/admin/assets/{id}",
            "GET /api/admin/health",
        ],
    }))
}

/// Liveness report; `uptime` is in seconds
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "service": SERVICE_NAME,
        "status": "healthy",
        "version": SERVICE_VERSION,
        "uptime": state.started_at.elapsed().as_secs_f64(),
    }))
}

pub async fn uploads_index() -> CmsResult<HttpResponse> {
    Err(CmsError::Validation(
        "A filename is required: use /uploads/{filename}".to_string(),
    ))
}

pub async fn not_found() -> CmsResult<HttpResponse> {
    Err(CmsError::NotFound("Route not found".to_string()))
}
