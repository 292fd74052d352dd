//! Route tables for the public and admin surfaces.

pub mod asset_routes;
pub mod content_type_routes;
pub mod document_routes;
pub mod slice_routes;
pub mod system_routes;

use actix_web::web;
use asset_routes::*;
use content_type_routes::*;
use document_routes::*;
use slice_routes::*;
use system_routes::*;

/// Read-only routes mounted under `/api`. Documents are published-only.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(public_index))
        .route("/health", web::get().to(health))
        .route("/content-types", web::get().to(list_content_types))
        .route("/content-types/{name}", web::get().to(get_content_type))
        .route("/slices", web::get().to(list_slices))
        .route("/slices/{slice_type}", web::get().to(get_slice))
        .route("/documents", web::get().to(list_published_documents))
        .route("/documents/{uid}", web::get().to(get_published_document));
}

/// Full CRUD routes mounted under `/api/admin`. No authentication is applied.
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(admin_index))
        .route("/health", web::get().to(health))
        // Content types
        .route("/content-types", web::get().to(list_content_types))
        .route("/content-types", web::post().to(create_content_type))
        .route("/content-types/{name}", web::get().to(get_content_type))
        .route("/content-types/{name}", web::put().to(update_content_type))
        .route("/content-types/{name}", web::delete().to(delete_content_type))
        // Slices
        .route("/slices", web::get().to(list_slices))
        .route("/slices", web::post().to(create_slice))
        .route("/slices/{slice_type}", web::get().to(get_slice))
        .route("/slices/{slice_type}", web::put().to(update_slice))
        .route("/slices/{slice_type}", web::delete().to(delete_slice))
        .route(
            "/slices/{slice_type}/validate",
            web::post().to(validate_slice_data),
        )
        // Documents
        .route("/documents", web::get().to(list_documents))
        .route("/documents", web::post().to(create_document))
        .route("/documents/{uid}", web::get().to(get_document))
        .route("/documents/{uid}", web::put().to(update_document))
        .route("/documents/{uid}", web::delete().to(delete_document))
        .route("/documents/{uid}/publish", web::post().to(publish_document))
        .route(
            "/documents/{uid}/unpublish",
            web::post().to(unpublish_document),
        )
        // Assets
        .route("/assets", web::get().to(list_assets))
        .route("/assets", web::post().to(upload_asset))
        .route("/assets/{id}", web::get().to(get_asset))
        .route("/assets/{id}", web::put().to(update_asset))
        .route("/assets/{id}", web::delete().to(delete_asset));
}
