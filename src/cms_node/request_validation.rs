//! Field-level checks on admin request bodies, run before any service call.
//!
//! Each parser collects every failing member so the client sees all of them
//! in one `details` list.

use crate::document::DocumentStatus;
use crate::error::{CmsError, CmsResult, FieldViolation};
use crate::services::{ContentTypeUpdate, DocumentUpdate, NewDocument, NewSlice, SliceUpdate};
use serde_json::{Map, Value};

/// A validated content type creation request
#[derive(Debug, Clone)]
pub struct NewContentType {
    pub name: String,
    pub description: String,
    pub schema: Value,
}

struct BodyChecker<'a> {
    body: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> BodyChecker<'a> {
    fn new(body: &'a Value) -> CmsResult<Self> {
        match body.as_object() {
            Some(body) => Ok(Self {
                body,
                violations: Vec::new(),
            }),
            None => Err(CmsError::InvalidRequest(vec![FieldViolation::new(
                "body",
                "Request body must be a JSON object",
            )])),
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.violations.push(FieldViolation::new(field, message));
    }

    fn required_string(&mut self, field: &str) -> String {
        match self.body.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => {
                self.fail(field, &format!("{} is required", field));
                String::new()
            }
        }
    }

    /// Absent or null is `None`; present values must be non-empty strings
    fn optional_string(&mut self, field: &str, allow_empty: bool) -> Option<String> {
        match self.body.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if allow_empty || !s.trim().is_empty() => Some(s.clone()),
            Some(_) => {
                self.fail(field, &format!("{} must be a non-empty string", field));
                None
            }
        }
    }

    fn required_object(&mut self, field: &str) -> Value {
        match self.body.get(field) {
            Some(value @ Value::Object(_)) => value.clone(),
            _ => {
                self.fail(field, &format!("{} must be an object", field));
                Value::Null
            }
        }
    }

    fn optional_object(&mut self, field: &str) -> Option<Value> {
        match self.body.get(field) {
            None => None,
            Some(value @ Value::Object(_)) => Some(value.clone()),
            Some(_) => {
                self.fail(field, &format!("{} must be an object", field));
                None
            }
        }
    }

    fn optional_status(&mut self, field: &str) -> Option<DocumentStatus> {
        match self.body.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => match s.parse() {
                Ok(status) => Some(status),
                Err(message) => {
                    self.fail(field, &message);
                    None
                }
            },
            Some(_) => {
                self.fail(field, "status must be 'draft' or 'published'");
                None
            }
        }
    }

    fn finish<T>(self, value: T) -> CmsResult<T> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(CmsError::InvalidRequest(self.violations))
        }
    }
}

pub fn parse_content_type_create(body: &Value) -> CmsResult<NewContentType> {
    let mut check = BodyChecker::new(body)?;
    let request = NewContentType {
        name: check.required_string("name"),
        description: check.optional_string("description", true).unwrap_or_default(),
        schema: check.required_object("schema"),
    };
    check.finish(request)
}

pub fn parse_content_type_update(body: &Value) -> CmsResult<ContentTypeUpdate> {
    let mut check = BodyChecker::new(body)?;
    let update = ContentTypeUpdate {
        description: check.optional_string("description", true),
        schema: check.optional_object("schema"),
    };
    check.finish(update)
}

pub fn parse_slice_create(body: &Value) -> CmsResult<NewSlice> {
    let mut check = BodyChecker::new(body)?;
    let slice = NewSlice {
        slice_type: check.required_string("sliceType"),
        name: check.required_string("name"),
        description: check.optional_string("description", true).unwrap_or_default(),
        schema: check.required_object("schema"),
        items_schema: check.optional_object("itemsSchema"),
    };
    check.finish(slice)
}

/// `itemsSchema: null` clears the items schema
pub fn parse_slice_update(body: &Value) -> CmsResult<SliceUpdate> {
    let mut check = BodyChecker::new(body)?;
    let fields = check.body;
    let items_schema = match fields.get("itemsSchema") {
        None => None,
        Some(Value::Null) => Some(None),
        Some(value @ Value::Object(_)) => Some(Some(value.clone())),
        Some(_) => {
            check.fail("itemsSchema", "itemsSchema must be an object or null");
            None
        }
    };
    let update = SliceUpdate {
        name: check.optional_string("name", false),
        description: check.optional_string("description", true),
        schema: check.optional_object("schema"),
        items_schema,
    };
    check.finish(update)
}

pub fn parse_document_create(body: &Value) -> CmsResult<NewDocument> {
    let mut check = BodyChecker::new(body)?;
    let document = NewDocument {
        uid: check.required_string("uid"),
        title: check.required_string("title"),
        content_type: check.required_string("contentType"),
        data: check.required_object("data"),
        status: check.optional_status("status").unwrap_or_default(),
    };
    check.finish(document)
}

pub fn parse_document_update(body: &Value) -> CmsResult<DocumentUpdate> {
    let mut check = BodyChecker::new(body)?;
    let update = DocumentUpdate {
        title: check.optional_string("title", false),
        data: check.optional_object("data"),
        status: check.optional_status("status"),
    };
    check.finish(update)
}

/// The new alt text; null or an empty string clears it
pub fn parse_asset_update(body: &Value) -> CmsResult<Option<String>> {
    let mut check = BodyChecker::new(body)?;
    let alt_text = check
        .optional_string("altText", true)
        .filter(|alt| !alt.is_empty());
    check.finish(alt_text)
}
