use crate::cms_node::http_helpers::{created, no_content, ok, ListQuery};
use crate::cms_node::http_server::AppState;
use crate::cms_node::request_validation::{parse_content_type_create, parse_content_type_update};
use crate::constants::DEFAULT_DOCUMENT_PAGE_SIZE;
use crate::error::CmsResult;
use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

/// List all content types with their document counts.
pub async fn list_content_types(state: web::Data<AppState>) -> CmsResult<HttpResponse> {
    let summaries = state.services.content_types.list()?;
    Ok(ok(summaries))
}

/// Get one content type.
///
/// With `withDocuments=true` the response carries a page of the type's
/// published documents instead of the recent-documents preview.
pub async fn get_content_type(
    path: web::Path<String>,
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let name = path.into_inner();
    let service = &state.services.content_types;

    if query.with_documents() {
        let pagination = query.pagination(DEFAULT_DOCUMENT_PAGE_SIZE);
        let (content_type, documents) = service.get_with_documents(&name, pagination)?;
        return Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "contentType": content_type,
            "documents": documents.data,
            "meta": documents.meta,
        })));
    }

    Ok(ok(service.get(&name)?))
}

pub async fn create_content_type(
    body: web::Json<Value>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let request = parse_content_type_create(&body)?;
    let content_type = state.services.content_types.create(
        &request.name,
        &request.description,
        &request.schema,
    )?;
    Ok(created(content_type))
}

pub async fn update_content_type(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let update = parse_content_type_update(&body)?;
    let content_type = state
        .services
        .content_types
        .update(&path.into_inner(), update)?;
    Ok(ok(content_type))
}

pub async fn delete_content_type(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    state.services.content_types.delete(&path.into_inner())?;
    Ok(no_content())
}
