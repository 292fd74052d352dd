use super::types::{
    ContentTypeSchema, FieldDescriptor, FieldKind, SchemaContext, SchemaError, SliceSchema,
    ValidatedSchema,
};
use serde_json::{Map, Value};

/// Validates raw schema objects before they are stored.
///
/// The checks are structural: every field descriptor needs a non-empty
/// `id` and `label` and a `type` from the context's closed set, `required`
/// must be a boolean and `config` an object when present. Duplicate ids,
/// field ordering and the contents of `config` are left to the caller.
/// Members the model does not know are dropped.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate `raw` in the given context.
    pub fn validate(raw: &Value, context: SchemaContext) -> Result<ValidatedSchema, SchemaError> {
        match context {
            SchemaContext::ContentType => {
                Self::validate_content_type_schema(raw).map(ValidatedSchema::ContentType)
            }
            SchemaContext::Slice => Self::validate_slice_schema(raw).map(ValidatedSchema::Slice),
        }
    }

    /// Validate a content type schema: `{fields: [...]}`.
    pub fn validate_content_type_schema(raw: &Value) -> Result<ContentTypeSchema, SchemaError> {
        let object = expect_object(raw)?;
        let fields = object
            .get("fields")
            .ok_or_else(|| SchemaError::InvalidShape("'fields' is required".to_string()))?;

        Ok(ContentTypeSchema {
            fields: validate_field_list(fields, "fields")?,
        })
    }

    /// Validate a slice schema: `{primary: [...], items?: [...]}`.
    pub fn validate_slice_schema(raw: &Value) -> Result<SliceSchema, SchemaError> {
        let object = expect_object(raw)?;
        let primary = object
            .get("primary")
            .ok_or_else(|| SchemaError::InvalidShape("'primary' is required".to_string()))?;

        let items = match object.get("items") {
            None | Some(Value::Null) => None,
            Some(items) => Some(validate_field_list(items, "items")?),
        };

        Ok(SliceSchema {
            primary: validate_field_list(primary, "primary")?,
            items,
        })
    }
}

fn expect_object(raw: &Value) -> Result<&Map<String, Value>, SchemaError> {
    raw.as_object()
        .ok_or_else(|| SchemaError::InvalidShape("schema must be an object".to_string()))
}

fn validate_field_list<K: FieldKind>(
    value: &Value,
    path: &str,
) -> Result<Vec<FieldDescriptor<K>>, SchemaError> {
    let entries = value
        .as_array()
        .ok_or_else(|| SchemaError::InvalidShape(format!("'{}' must be an array", path)))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| validate_field(entry, &format!("{}[{}]", path, index)))
        .collect()
}

fn validate_field<K: FieldKind>(value: &Value, path: &str) -> Result<FieldDescriptor<K>, SchemaError> {
    let object = value
        .as_object()
        .ok_or_else(|| SchemaError::InvalidField(format!("{} must be an object", path)))?;

    let id = non_empty_string(object, "id", path)?;
    let label = non_empty_string(object, "label", path)?;

    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::InvalidField(format!("{}.type must be a string", path)))?;
    let field_type = K::parse(type_name).ok_or_else(|| {
        SchemaError::UnknownFieldType(format!(
            "{}.type '{}' is not one of: {}",
            path,
            type_name,
            K::expected()
        ))
    })?;

    let required = match object.get("required") {
        None => false,
        Some(Value::Bool(required)) => *required,
        Some(_) => {
            return Err(SchemaError::InvalidField(format!(
                "{}.required must be a boolean",
                path
            )))
        }
    };

    let config = match object.get("config") {
        None => None,
        Some(Value::Object(config)) => Some(config.clone()),
        Some(_) => {
            return Err(SchemaError::InvalidField(format!(
                "{}.config must be an object",
                path
            )))
        }
    };

    Ok(FieldDescriptor {
        id,
        field_type,
        label,
        required,
        config,
    })
}

fn non_empty_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<String, SchemaError> {
    match object.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(SchemaError::InvalidField(format!(
            "{}.{} must be a non-empty string",
            path, key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{ContentTypeFieldType, SliceFieldType};
    use serde_json::json;

    #[test]
    fn accepts_content_type_schema() {
        let raw = json!({
            "fields": [
                {"id": "title", "type": "text", "label": "Title", "required": true,
                 "config": {"placeholder": "Enter page title"}},
                {"id": "uid", "type": "uid", "label": "URL Slug"}
            ]
        });

        let schema = SchemaValidator::validate_content_type_schema(&raw).unwrap();
        assert_eq!(schema.fields.len(), 2);
        assert!(schema.fields[0].required);
        assert_eq!(schema.fields[1].field_type, ContentTypeFieldType::Uid);
        assert!(!schema.fields[1].required);
        assert!(schema.fields[1].config.is_none());
    }

    #[test]
    fn rejects_type_outside_context() {
        // `image` is a slice field type, not a content type one
        let raw = json!({"fields": [{"id": "hero", "type": "image", "label": "Hero"}]});
        let err = SchemaValidator::validate_content_type_schema(&raw).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownFieldType(_)));
        assert!(err.to_string().contains("fields[0].type"));

        let raw = json!({"primary": [{"id": "slug", "type": "uid", "label": "Slug"}]});
        assert!(matches!(
            SchemaValidator::validate_slice_schema(&raw),
            Err(SchemaError::UnknownFieldType(_))
        ));
    }

    #[test]
    fn rejects_missing_or_empty_id_and_label() {
        for field in [
            json!({"type": "text", "label": "Title"}),
            json!({"id": "", "type": "text", "label": "Title"}),
            json!({"id": "title", "type": "text"}),
            json!({"id": "title", "type": "text", "label": ""}),
            json!({"id": 7, "type": "text", "label": "Title"}),
        ] {
            let raw = json!({"fields": [field]});
            assert!(matches!(
                SchemaValidator::validate_content_type_schema(&raw),
                Err(SchemaError::InvalidField(_))
            ));
        }
    }

    #[test]
    fn rejects_wrong_top_level_shape() {
        assert!(SchemaValidator::validate_content_type_schema(&json!([])).is_err());
        assert!(SchemaValidator::validate_content_type_schema(&json!({})).is_err());
        assert!(SchemaValidator::validate_content_type_schema(&json!({"fields": {}})).is_err());
        assert!(SchemaValidator::validate_slice_schema(&json!({"items": []})).is_err());
    }

    #[test]
    fn rejects_mistyped_required_and_config() {
        let raw = json!({"primary": [{"id": "a", "type": "text", "label": "A", "required": "yes"}]});
        assert!(SchemaValidator::validate_slice_schema(&raw).is_err());

        let raw = json!({"primary": [{"id": "a", "type": "text", "label": "A", "config": []}]});
        assert!(SchemaValidator::validate_slice_schema(&raw).is_err());
    }

    #[test]
    fn slice_items_are_optional() {
        let raw = json!({"primary": [{"id": "title", "type": "text", "label": "Title"}]});
        let schema = SchemaValidator::validate_slice_schema(&raw).unwrap();
        assert!(schema.items.is_none());

        let raw = json!({
            "primary": [],
            "items": [{"id": "image", "type": "image", "label": "Image", "required": true}]
        });
        let schema = SchemaValidator::validate_slice_schema(&raw).unwrap();
        let items = schema.items.unwrap();
        assert_eq!(items[0].field_type, SliceFieldType::Image);
        assert!(items[0].required);
    }

    #[test]
    fn duplicate_ids_and_unknown_members_are_tolerated() {
        let raw = json!({
            "primary": [
                {"id": "title", "type": "text", "label": "Title", "hint": "ignored"},
                {"id": "title", "type": "rich_text", "label": "Title again"}
            ]
        });
        let schema = SchemaValidator::validate_slice_schema(&raw).unwrap();
        assert_eq!(schema.primary.len(), 2);
        let stored = serde_json::to_value(&schema).unwrap();
        assert!(stored["primary"][0].get("hint").is_none());
    }

    #[test]
    fn dispatches_on_context() {
        let raw = json!({"fields": []});
        assert!(matches!(
            SchemaValidator::validate(&raw, SchemaContext::ContentType),
            Ok(ValidatedSchema::ContentType(_))
        ));
        assert!(SchemaValidator::validate(&raw, SchemaContext::Slice).is_err());
    }
}
