use crate::constants::DEFAULT_PAGE;
use crate::db_operations::{Page, Pagination};
use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// `{"success": true, "data": ...}` with the given status.
pub fn success_with<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "success": true,
        "data": data,
    }))
}

pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    success_with(StatusCode::OK, data)
}

pub fn created<T: Serialize>(data: T) -> HttpResponse {
    success_with(StatusCode::CREATED, data)
}

/// `{"success": true, "data": [...], "meta": {...}}`
pub fn paginated<T: Serialize>(page: Page<T>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": page.data,
        "meta": page.meta,
    }))
}

pub fn no_content() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Query string accepted by the list endpoints.
///
/// Numbers are kept as text so a malformed `page` falls back to its
/// default instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub content_type: Option<String>,
    pub draft: Option<String>,
    pub mime_type: Option<String>,
    pub with_documents: Option<String>,
}

fn parse_positive(value: Option<&String>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ListQuery {
    pub fn pagination(&self, default_limit: u32) -> Pagination {
        Pagination::new(
            parse_positive(self.page.as_ref(), DEFAULT_PAGE),
            parse_positive(self.limit.as_ref(), default_limit),
        )
    }

    /// Only the literal `"true"` includes drafts
    pub fn include_drafts(&self) -> bool {
        self.draft.as_deref() == Some("true")
    }

    pub fn with_documents(&self) -> bool {
        self.with_documents.as_deref() == Some("true")
    }

    pub fn search(&self) -> Option<String> {
        non_empty(&self.search)
    }

    /// The document type filter; `type` wins over `contentType`
    pub fn document_type(&self) -> Option<String> {
        non_empty(&self.doc_type).or_else(|| non_empty(&self.content_type))
    }

    pub fn content_type(&self) -> Option<String> {
        non_empty(&self.content_type)
    }

    pub fn mime_type(&self) -> Option<String> {
        non_empty(&self.mime_type)
    }
}
