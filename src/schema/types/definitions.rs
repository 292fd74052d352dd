use super::schema::{ContentTypeSchema, SliceSchema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named content type. `name` is its primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub schema: ContentTypeSchema,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reusable slice definition. `slice_type` is its primary key and the
/// value slice instances refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceDefinition {
    pub slice_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub schema: SliceSchema,
    /// Item shape; its `primary` list is checked against every item of an instance.
    pub items_schema: Option<SliceSchema>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
