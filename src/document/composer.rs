//! Structural validation of document payloads.
//!
//! Only the shape is checked here. Slice types are not resolved and
//! required slice fields are not enforced; see [`super::slice_data`] for
//! the optional per-slice check.

use super::types::{DocumentData, SliceInstance};
use crate::schema::SchemaError;
use serde_json::{Map, Value};

const RESERVED_KEYS: [&str; 3] = ["title", "uid", "body"];

/// Validate a raw document `data` payload.
///
/// `title` and `uid` must be non-empty strings and `body` an ordered list of
/// slice instances. Any other top-level member is carried through untouched.
pub fn validate_document_data(raw: &Value) -> Result<DocumentData, SchemaError> {
    let object = raw
        .as_object()
        .ok_or_else(|| SchemaError::InvalidData("data must be an object".to_string()))?;

    let title = required_string(object, "title", "data")?;
    let uid = required_string(object, "uid", "data")?;

    let body = object
        .get("body")
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaError::InvalidData("data.body must be an array".to_string()))?
        .iter()
        .enumerate()
        .map(|(index, slice)| validate_slice_instance(slice, &format!("data.body[{}]", index)))
        .collect::<Result<Vec<_>, _>>()?;

    let extra = object
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(DocumentData {
        title,
        uid,
        body,
        extra,
    })
}

fn validate_slice_instance(value: &Value, path: &str) -> Result<SliceInstance, SchemaError> {
    let object = value
        .as_object()
        .ok_or_else(|| SchemaError::InvalidData(format!("{} must be an object", path)))?;

    let slice_type = required_string(object, "slice_type", path)?;

    let slice_label = match object.get("slice_label") {
        None | Some(Value::Null) => None,
        Some(Value::String(label)) => Some(label.clone()),
        Some(_) => {
            return Err(SchemaError::InvalidData(format!(
                "{}.slice_label must be a string",
                path
            )))
        }
    };

    let primary = object
        .get("primary")
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| SchemaError::InvalidData(format!("{}.primary must be an object", path)))?;

    let items = match object.get("items") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.as_object().cloned().ok_or_else(|| {
                        SchemaError::InvalidData(format!(
                            "{}.items[{}] must be an object",
                            path, index
                        ))
                    })
                })
                .collect::<Result<Vec<Map<String, Value>>, _>>()?,
        ),
        Some(_) => {
            return Err(SchemaError::InvalidData(format!(
                "{}.items must be an array",
                path
            )))
        }
    };

    Ok(SliceInstance {
        slice_type,
        slice_label,
        primary,
        items,
    })
}

fn required_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<String, SchemaError> {
    match object.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(SchemaError::InvalidData(format!(
            "{}.{} must be a non-empty string",
            path, key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_body_of_slice_instances() {
        let raw = json!({
            "title": "Home",
            "uid": "home",
            "body": [
                {"slice_type": "hero", "slice_label": "Big", "primary": {"title": "Hi"}},
                {"slice_type": "gallery", "primary": {}, "items": [{"image": "a.png"}, {"image": "b.png"}]}
            ]
        });

        let data = validate_document_data(&raw).unwrap();
        assert_eq!(data.body.len(), 2);
        assert_eq!(data.body[0].slice_label.as_deref(), Some("Big"));
        assert_eq!(data.body[1].items.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn keeps_extra_top_level_members() {
        let raw = json!({
            "title": "Home",
            "uid": "home",
            "body": [],
            "metaTitle": "Welcome",
            "seo": {"noindex": true}
        });

        let data = validate_document_data(&raw).unwrap();
        assert_eq!(data.extra.len(), 2);

        let round_trip = serde_json::to_value(&data).unwrap();
        assert_eq!(round_trip["metaTitle"], "Welcome");
        assert_eq!(round_trip["seo"]["noindex"], true);
    }

    #[test]
    fn unknown_slice_types_pass() {
        let raw = json!({
            "title": "Home",
            "uid": "home",
            "body": [{"slice_type": "does_not_exist", "primary": {}}]
        });
        assert!(validate_document_data(&raw).is_ok());
    }

    #[test]
    fn rejects_structural_problems() {
        let cases = [
            json!("not an object"),
            json!({"uid": "home", "body": []}),
            json!({"title": "", "uid": "home", "body": []}),
            json!({"title": "Home", "body": []}),
            json!({"title": "Home", "uid": "home"}),
            json!({"title": "Home", "uid": "home", "body": [{"primary": {}}]}),
            json!({"title": "Home", "uid": "home", "body": [{"slice_type": "hero"}]}),
            json!({"title": "Home", "uid": "home", "body": [{"slice_type": "hero", "primary": [], }]}),
            json!({"title": "Home", "uid": "home", "body": [{"slice_type": "hero", "primary": {}, "items": [1]}]}),
            json!({"title": "Home", "uid": "home", "body": [{"slice_type": "hero", "primary": {}, "slice_label": 3}]}),
        ];

        for raw in cases {
            assert!(
                validate_document_data(&raw).is_err(),
                "expected rejection for {}",
                raw
            );
        }
    }

    #[test]
    fn error_names_the_failing_path() {
        let raw = json!({
            "title": "Home",
            "uid": "home",
            "body": [{"slice_type": "hero", "primary": {}}, {"slice_type": "", "primary": {}}]
        });
        let err = validate_document_data(&raw).unwrap_err();
        assert!(err.to_string().contains("data.body[1].slice_type"));
    }
}
