use crate::cms_node::http_helpers::{created, no_content, ok, paginated, ListQuery};
use crate::cms_node::http_server::AppState;
use crate::cms_node::request_validation::{parse_document_create, parse_document_update};
use crate::constants::DEFAULT_DOCUMENT_PAGE_SIZE;
use crate::error::CmsResult;
use crate::services::DocumentQuery;
use actix_web::{web, HttpResponse};
use serde_json::Value;

fn list_with(
    query: &ListQuery,
    include_drafts: bool,
    state: &AppState,
) -> CmsResult<HttpResponse> {
    let selection = DocumentQuery {
        search: query.search(),
        content_type: query.document_type(),
        include_drafts,
    };
    let page = state
        .services
        .documents
        .list(selection, query.pagination(DEFAULT_DOCUMENT_PAGE_SIZE))?;
    Ok(paginated(page))
}

/// Admin listing; `draft=true` includes drafts.
pub async fn list_documents(
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    list_with(&query, query.include_drafts(), &state)
}

/// Public listing; drafts are never included.
pub async fn list_published_documents(
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    list_with(&query, false, &state)
}

pub async fn get_document(
    path: web::Path<String>,
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let document = state
        .services
        .documents
        .get(&path.into_inner(), query.include_drafts())?;
    Ok(ok(document))
}

pub async fn get_published_document(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let document = state.services.documents.get(&path.into_inner(), false)?;
    Ok(ok(document))
}

pub async fn create_document(
    body: web::Json<Value>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let document = parse_document_create(&body)?;
    Ok(created(state.services.documents.create(document)?))
}

pub async fn update_document(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let update = parse_document_update(&body)?;
    let document = state
        .services
        .documents
        .update(&path.into_inner(), update)?;
    Ok(ok(document))
}

pub async fn publish_document(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    Ok(ok(state.services.documents.publish(&path.into_inner())?))
}

pub async fn unpublish_document(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    Ok(ok(state.services.documents.unpublish(&path.into_inner())?))
}

pub async fn delete_document(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    state.services.documents.delete(&path.into_inner())?;
    Ok(no_content())
}
