use crate::db_operations::DbOperations;
use crate::document::slice_data_satisfies;
use crate::error::{CmsError, CmsResult};
use crate::schema::{SchemaValidator, SliceDefinition};
use crate::webhook::{SliceEvent, SliceEventPublisher};
use crate::{log_schema_debug, log_schema_info};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

/// Input for a new slice definition. Schemas are raw and validated here.
#[derive(Debug, Clone)]
pub struct NewSlice {
    pub slice_type: String,
    pub name: String,
    pub description: String,
    pub schema: Value,
    pub items_schema: Option<Value>,
}

/// Fields a slice update may change.
///
/// `items_schema: Some(None)` clears the items schema.
#[derive(Debug, Clone, Default)]
pub struct SliceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub schema: Option<Value>,
    pub items_schema: Option<Option<Value>>,
}

/// Slice definitions and their lifecycle events.
///
/// This is the only place slice events are published, always after the
/// store has confirmed the change.
pub struct SliceService {
    db_ops: Arc<DbOperations>,
    publisher: Arc<dyn SliceEventPublisher>,
}

impl SliceService {
    pub fn new(db_ops: Arc<DbOperations>, publisher: Arc<dyn SliceEventPublisher>) -> Self {
        Self { db_ops, publisher }
    }

    pub fn create(&self, input: NewSlice) -> CmsResult<SliceDefinition> {
        let schema = SchemaValidator::validate_slice_schema(&input.schema)?;
        let items_schema = input
            .items_schema
            .as_ref()
            .filter(|raw| !raw.is_null())
            .map(SchemaValidator::validate_slice_schema)
            .transpose()?;

        let now = Utc::now();
        let slice = SliceDefinition {
            slice_type: input.slice_type,
            name: input.name,
            description: input.description,
            schema,
            items_schema,
            created_at: now,
            updated_at: now,
        };
        self.db_ops.create_slice(&slice)?;

        log_schema_info!("Created slice '{}'", slice.slice_type);
        self.publisher.publish(SliceEvent::Created(slice.clone()));
        Ok(slice)
    }

    pub fn get(&self, slice_type: &str) -> CmsResult<SliceDefinition> {
        self.db_ops
            .get_slice(slice_type)?
            .ok_or_else(|| CmsError::NotFound(format!("Slice \"{}\" not found", slice_type)))
    }

    /// All slices, newest first
    pub fn list(&self) -> CmsResult<Vec<SliceDefinition>> {
        self.db_ops.list_slices()
    }

    /// Slices usable by a content type. No such relationship is modelled,
    /// so this is every slice.
    pub fn list_for_content_type(&self, content_type: &str) -> CmsResult<Vec<SliceDefinition>> {
        log_schema_debug!("Listing slices for content type '{}'", content_type);
        self.list()
    }

    pub fn update(&self, slice_type: &str, update: SliceUpdate) -> CmsResult<SliceDefinition> {
        let schema = update
            .schema
            .as_ref()
            .map(SchemaValidator::validate_slice_schema)
            .transpose()?;
        let items_schema = match &update.items_schema {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) if raw.is_null() => Some(None),
            Some(Some(raw)) => Some(Some(SchemaValidator::validate_slice_schema(raw)?)),
        };

        let mut slice = self
            .db_ops
            .get_slice(slice_type)?
            .ok_or_else(|| CmsError::NotFound("Slice not found".to_string()))?;

        if let Some(name) = update.name {
            slice.name = name;
        }
        if let Some(description) = update.description {
            slice.description = description;
        }
        if let Some(schema) = schema {
            slice.schema = schema;
        }
        if let Some(items_schema) = items_schema {
            slice.items_schema = items_schema;
        }
        slice.updated_at = Utc::now();

        self.db_ops.update_slice(&slice)?;

        log_schema_info!("Updated slice '{}'", slice_type);
        self.publisher.publish(SliceEvent::Updated(slice.clone()));
        Ok(slice)
    }

    pub fn delete(&self, slice_type: &str) -> CmsResult<()> {
        if !self.db_ops.delete_slice(slice_type)? {
            return Err(CmsError::NotFound("Slice not found".to_string()));
        }

        log_schema_info!("Deleted slice '{}'", slice_type);
        self.publisher.publish(SliceEvent::Deleted {
            slice_type: slice_type.to_string(),
        });
        Ok(())
    }

    /// Check instance data against the slice's required fields.
    ///
    /// A missing slice is `NotFound`; invalid data is `Ok(false)`.
    pub fn validate_data(&self, slice_type: &str, data: &Value) -> CmsResult<bool> {
        let slice = self.get(slice_type)?;
        Ok(slice_data_satisfies(&slice, data))
    }
}
