use super::field_descriptor::{ContentTypeField, FieldKind, SliceField};
use serde::{Deserialize, Serialize};

/// The context a raw schema is validated in. Each context has its own
/// top-level keys and its own closed set of field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaContext {
    ContentType,
    Slice,
}

/// Top-level fields of a class of documents.
///
/// By convention one field has type `uid` and acts as the document slug;
/// nothing checks that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentTypeSchema {
    pub fields: Vec<ContentTypeField>,
}

/// Shape of one composable content block.
///
/// `primary` fields appear once per slice instance; `items`, when present,
/// describes each entry of the instance's repeatable list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SliceSchema {
    pub primary: Vec<SliceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SliceField>>,
}

impl SliceSchema {
    /// Ids of the required primary fields, in declaration order.
    pub fn required_primary_ids(&self) -> impl Iterator<Item = &str> {
        required_ids(&self.primary)
    }
}

/// Schema accepted by the validator, tagged with the context it was checked in.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedSchema {
    ContentType(ContentTypeSchema),
    Slice(SliceSchema),
}

pub(crate) fn required_ids<K: FieldKind>(
    fields: &[super::FieldDescriptor<K>],
) -> impl Iterator<Item = &str> {
    fields
        .iter()
        .filter(|field| field.required)
        .map(|field| field.id.as_str())
}
