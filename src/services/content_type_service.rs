use crate::constants::RECENT_DOCUMENTS_PREVIEW;
use crate::db_operations::{DbOperations, DocumentFilter, Page, Pagination};
use crate::document::Document;
use crate::error::{CmsError, CmsResult};
use crate::{log_schema_info, log_schema_warn};
use crate::schema::{ContentType, SchemaValidator};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// A content type with the number of documents that reference it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeSummary {
    #[serde(flatten)]
    pub content_type: ContentType,
    pub document_count: u64,
}

/// A content type with its newest documents, any status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDetail {
    #[serde(flatten)]
    pub content_type: ContentType,
    pub recent_documents: Vec<Document>,
}

/// Fields a content type update may change. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeUpdate {
    pub description: Option<String>,
    pub schema: Option<Value>,
}

pub struct ContentTypeService {
    db_ops: Arc<DbOperations>,
}

impl ContentTypeService {
    pub fn new(db_ops: Arc<DbOperations>) -> Self {
        Self { db_ops }
    }

    pub fn create(&self, name: &str, description: &str, schema: &Value) -> CmsResult<ContentType> {
        let schema = SchemaValidator::validate_content_type_schema(schema)?;

        let now = Utc::now();
        let content_type = ContentType {
            name: name.to_string(),
            description: description.to_string(),
            schema,
            created_at: now,
            updated_at: now,
        };
        self.db_ops.create_content_type(&content_type)?;

        log_schema_info!("Created content type '{}'", name);
        Ok(content_type)
    }

    fn require(&self, name: &str) -> CmsResult<ContentType> {
        self.db_ops
            .get_content_type(name)?
            .ok_or_else(|| CmsError::NotFound(format!("Content type \"{}\" not found", name)))
    }

    pub fn get(&self, name: &str) -> CmsResult<ContentTypeDetail> {
        let content_type = self.require(name)?;
        let recent_documents = self
            .db_ops
            .recent_documents_of_type(name, RECENT_DOCUMENTS_PREVIEW)?;
        Ok(ContentTypeDetail {
            content_type,
            recent_documents,
        })
    }

    /// The content type and a page of its published documents
    pub fn get_with_documents(
        &self,
        name: &str,
        pagination: Pagination,
    ) -> CmsResult<(ContentType, Page<Document>)> {
        let content_type = self.require(name)?;
        let filter = DocumentFilter {
            content_type: Some(name.to_string()),
            ..DocumentFilter::published()
        };
        let documents = self.db_ops.list_documents(&filter, pagination)?;
        Ok((content_type, documents))
    }

    /// Every content type, newest first, with its document count
    pub fn list(&self) -> CmsResult<Vec<ContentTypeSummary>> {
        self.db_ops
            .list_content_types()?
            .into_iter()
            .map(|content_type| {
                let document_count = self.db_ops.count_documents_of_type(&content_type.name)?;
                Ok(ContentTypeSummary {
                    content_type,
                    document_count,
                })
            })
            .collect()
    }

    pub fn update(&self, name: &str, update: ContentTypeUpdate) -> CmsResult<ContentType> {
        let schema = update
            .schema
            .as_ref()
            .map(SchemaValidator::validate_content_type_schema)
            .transpose()?;

        let mut content_type = self
            .db_ops
            .get_content_type(name)?
            .ok_or_else(|| CmsError::NotFound("Content type not found".to_string()))?;

        if let Some(description) = update.description {
            content_type.description = description;
        }
        if let Some(schema) = schema {
            content_type.schema = schema;
        }
        content_type.updated_at = Utc::now();

        self.db_ops.update_content_type(&content_type)?;
        log_schema_info!("Updated content type '{}'", name);
        Ok(content_type)
    }

    /// Documents of the deleted type are kept as they are
    pub fn delete(&self, name: &str) -> CmsResult<()> {
        if !self.db_ops.delete_content_type(name)? {
            return Err(CmsError::NotFound("Content type not found".to_string()));
        }
        let orphaned = self.db_ops.count_documents_of_type(name)?;
        if orphaned > 0 {
            log_schema_warn!(
                "Deleted content type '{}' still referenced by {} documents",
                name,
                orphaned
            );
        } else {
            log_schema_info!("Deleted content type '{}'", name);
        }
        Ok(())
    }
}
