//! Required-field check of slice instance data against a slice definition.

use crate::schema::SliceDefinition;
use serde_json::Value;

/// Loose truthiness: `null`, `false`, `0` and `""` are falsy, everything
/// else (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Check `data` against the required fields of `definition`.
///
/// Every required id of `schema.primary` must be truthy in `data.primary`.
/// When the definition has an `items_schema` and `data.items` is a list,
/// each item must satisfy the required ids of `items_schema.primary`.
/// Falsy values count as missing. Any failure fails the whole check.
pub fn slice_data_satisfies(definition: &SliceDefinition, data: &Value) -> bool {
    let primary = data.get("primary");
    let primary_ok = definition
        .schema
        .required_primary_ids()
        .all(|id| has_truthy(primary, id));
    if !primary_ok {
        return false;
    }

    let (Some(items_schema), Some(items)) = (
        definition.items_schema.as_ref(),
        data.get("items").and_then(Value::as_array),
    ) else {
        return true;
    };

    items.iter().all(|item| {
        items_schema
            .required_primary_ids()
            .all(|id| has_truthy(Some(item), id))
    })
}

fn has_truthy(container: Option<&Value>, id: &str) -> bool {
    container
        .and_then(|value| value.get(id))
        .map_or(false, is_truthy)
}
