use crate::schema::SchemaError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::io;
use thiserror::Error;

/// One failing member of a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Unified error type for the whole crate.
///
/// Every variant maps onto one HTTP status. Client errors (4xx) keep their
/// message on the wire; server errors (5xx) are reported as a generic
/// message outside development mode.
#[derive(Error, Debug)]
pub enum CmsError {
    /// Malformed or schema-violating input
    #[error("{0}")]
    Validation(String),

    /// Request body failed field-level checks
    #[error("Validation failed")]
    InvalidRequest(Vec<FieldViolation>),

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    NotFound(String),

    /// Unique key already taken
    #[error("{0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    /// Failure with an explicit status code
    #[error("{message}")]
    App { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for crate operations.
pub type CmsResult<T> = Result<T, CmsError>;

impl From<sled::Error> for CmsError {
    fn from(error: sled::Error) -> Self {
        CmsError::Database(error.to_string())
    }
}

impl From<serde_json::Error> for CmsError {
    fn from(error: serde_json::Error) -> Self {
        CmsError::Serialization(error.to_string())
    }
}

impl CmsError {
    pub fn status(&self) -> StatusCode {
        match self {
            CmsError::Validation(_) | CmsError::InvalidRequest(_) | CmsError::Schema(_) => {
                StatusCode::BAD_REQUEST
            }
            CmsError::NotFound(_) => StatusCode::NOT_FOUND,
            CmsError::Conflict(_) => StatusCode::CONFLICT,
            CmsError::Unauthorized => StatusCode::UNAUTHORIZED,
            CmsError::Forbidden => StatusCode::FORBIDDEN,
            CmsError::App { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            CmsError::Database(_)
            | CmsError::Io(_)
            | CmsError::Serialization(_)
            | CmsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the `{"error": {...}}` envelope for this error.
    pub fn envelope(&self, path: &str, development: bool) -> Value {
        let status = self.status();
        let hide = status.is_server_error() && !development;

        let message = if hide {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let mut body = json!({
            "message": message,
            "status": status.as_u16(),
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "path": path,
        });

        let details = match self {
            CmsError::InvalidRequest(violations) => Some(json!(violations)),
            _ if status.is_server_error() && development => Some(json!(format!("{:?}", self))),
            _ => None,
        };
        if let (Some(details), Some(object)) = (details, body.as_object_mut()) {
            object.insert("details".to_string(), details);
        }

        json!({ "error": body })
    }

    pub fn to_response(&self, path: &str, development: bool) -> HttpResponse {
        HttpResponse::build(self.status()).json(self.envelope(path, development))
    }
}

impl ResponseError for CmsError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    // The request path is filled in by the error-path middleware.
    fn error_response(&self) -> HttpResponse {
        self.to_response("", false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_statuses() {
        assert_eq!(CmsError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CmsError::Schema(SchemaError::InvalidShape("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CmsError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(CmsError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(CmsError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(CmsError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            CmsError::App {
                status: 418,
                message: "teapot".into()
            }
            .status()
            .as_u16(),
            418
        );
        assert_eq!(
            CmsError::Database("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn hides_server_error_messages_outside_development() {
        let err = CmsError::Database("tree corrupted".into());

        let production = err.envelope("/api/admin/slices", false);
        assert_eq!(production["error"]["message"], "Internal server error");
        assert_eq!(production["error"]["status"], 500);
        assert_eq!(production["error"]["path"], "/api/admin/slices");
        assert!(production["error"].get("details").is_none());

        let development = err.envelope("/api/admin/slices", true);
        assert_eq!(development["error"]["message"], "Database error: tree corrupted");
        assert!(development["error"]["details"].is_string());
    }

    #[test]
    fn invalid_request_lists_violations() {
        let err = CmsError::InvalidRequest(vec![
            FieldViolation::new("name", "name is required"),
            FieldViolation::new("schema", "schema must be an object"),
        ]);
        let envelope = err.envelope("/api/admin/content-types", false);
        assert_eq!(envelope["error"]["message"], "Validation failed");
        assert_eq!(envelope["error"]["status"], 400);
        assert_eq!(envelope["error"]["details"][1]["field"], "schema");
    }
}
