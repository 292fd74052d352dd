use crate::cms_node::http_helpers::{created, no_content, ok, ListQuery};
use crate::cms_node::http_server::AppState;
use crate::cms_node::request_validation::{parse_slice_create, parse_slice_update};
use crate::error::CmsResult;
use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

/// List slices, optionally for one content type.
pub async fn list_slices(
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let service = &state.services.slices;
    let slices = match query.content_type() {
        Some(content_type) => service.list_for_content_type(&content_type)?,
        None => service.list()?,
    };
    Ok(ok(slices))
}

pub async fn get_slice(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    Ok(ok(state.services.slices.get(&path.into_inner())?))
}

pub async fn create_slice(
    body: web::Json<Value>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let slice = parse_slice_create(&body)?;
    Ok(created(state.services.slices.create(slice)?))
}

pub async fn update_slice(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let update = parse_slice_update(&body)?;
    let slice = state.services.slices.update(&path.into_inner(), update)?;
    Ok(ok(slice))
}

pub async fn delete_slice(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    state.services.slices.delete(&path.into_inner())?;
    Ok(no_content())
}

/// Check slice instance data against the slice's required fields.
///
/// The instance is read from `data` when present, otherwise the whole body
/// is taken as the instance.
pub async fn validate_slice_data(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let body = body.into_inner();
    let data = match body.get("data") {
        Some(data) => data,
        None => &body,
    };
    let valid = state
        .services
        .slices
        .validate_data(&path.into_inner(), data)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "valid": valid })))
}
