use crate::schema::SliceDefinition;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A slice lifecycle change, published after the store confirmed it.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceEvent {
    Created(SliceDefinition),
    Updated(SliceDefinition),
    Deleted { slice_type: String },
}

impl SliceEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            SliceEvent::Created(_) => "slice.created",
            SliceEvent::Updated(_) => "slice.updated",
            SliceEvent::Deleted { .. } => "slice.deleted",
        }
    }

    pub fn slice_type(&self) -> &str {
        match self {
            SliceEvent::Created(slice) | SliceEvent::Updated(slice) => &slice.slice_type,
            SliceEvent::Deleted { slice_type } => slice_type,
        }
    }

    /// Created and updated events carry the full record; deleted only the key.
    fn data(&self) -> Value {
        match self {
            SliceEvent::Created(slice) | SliceEvent::Updated(slice) => {
                serde_json::to_value(slice).unwrap_or(Value::Null)
            }
            SliceEvent::Deleted { slice_type } => json!({ "sliceType": slice_type }),
        }
    }

    pub fn payload(&self, at: DateTime<Utc>) -> WebhookPayload {
        WebhookPayload {
            event: self.name().to_string(),
            data: self.data(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// JSON body POSTed to every webhook URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: String,
    pub data: Value,
    pub timestamp: String,
}
