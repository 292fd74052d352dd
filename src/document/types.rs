use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// One occurrence of a slice inside a document body.
///
/// `slice_type` names a slice definition but is not resolved against one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceInstance {
    pub slice_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_label: Option<String>,
    pub primary: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Map<String, Value>>>,
}

/// The `data` payload of a document.
///
/// Content types may add their own top-level members next to `title`,
/// `uid` and `body`; those are kept in `extra` and written back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    pub title: String,
    pub uid: String,
    pub body: Vec<SliceInstance>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Published,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Published => "published",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(DocumentStatus::Draft),
            "published" => Ok(DocumentStatus::Published),
            other => Err(format!(
                "Invalid status '{}': expected 'draft' or 'published'",
                other
            )),
        }
    }
}

/// A stored document. `uid` is the public lookup key and is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub uid: String,
    pub title: String,
    /// Name of a content type; not checked after creation.
    pub content_type: String,
    pub data: DocumentData,
    pub status: DocumentStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn is_published(&self) -> bool {
        self.status == DocumentStatus::Published
    }

    /// Move the document to `status`.
    ///
    /// `published_at` is stamped only on a draft to published edge and is
    /// cleared on the way back; staying in the same state leaves it alone.
    pub fn transition_to(&mut self, status: DocumentStatus, now: DateTime<Utc>) {
        match (self.status, status) {
            (DocumentStatus::Draft, DocumentStatus::Published) => self.published_at = Some(now),
            (DocumentStatus::Published, DocumentStatus::Draft) => self.published_at = None,
            _ => {}
        }
        self.status = status;
    }
}
