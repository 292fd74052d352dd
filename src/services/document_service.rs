use crate::db_operations::{DbOperations, DocumentFilter, Page, Pagination};
use crate::document::{validate_document_data, Document, DocumentStatus};
use crate::error::{CmsError, CmsResult};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Input for a new document. `data` is raw and validated here.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub uid: String,
    pub title: String,
    pub content_type: String,
    pub data: Value,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub data: Option<Value>,
    pub status: Option<DocumentStatus>,
}

/// How a document listing is selected.
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    pub search: Option<String>,
    pub content_type: Option<String>,
    pub include_drafts: bool,
}

impl DocumentQuery {
    /// A search is always restricted to published documents.
    fn into_filter(self) -> DocumentFilter {
        match self.search {
            Some(search) => DocumentFilter {
                content_type: self.content_type,
                include_drafts: false,
                search: Some(search),
            },
            None => DocumentFilter {
                content_type: self.content_type,
                include_drafts: self.include_drafts,
                search: None,
            },
        }
    }
}

pub struct DocumentService {
    db_ops: Arc<DbOperations>,
}

impl DocumentService {
    pub fn new(db_ops: Arc<DbOperations>) -> Self {
        Self { db_ops }
    }

    /// Create a document.
    ///
    /// Checks run in order: data structure, uid uniqueness, content type
    /// existence. Nothing is written unless all of them pass.
    pub fn create(&self, input: NewDocument) -> CmsResult<Document> {
        let data = validate_document_data(&input.data)?;

        if self.db_ops.document_exists(&input.uid)? {
            return Err(CmsError::Conflict(format!(
                "Document with uid \"{}\" already exists",
                input.uid
            )));
        }
        if !self.db_ops.content_type_exists(&input.content_type)? {
            return Err(CmsError::Validation(format!(
                "Content type \"{}\" does not exist",
                input.content_type
            )));
        }

        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4().to_string(),
            uid: input.uid,
            title: input.title,
            content_type: input.content_type,
            data,
            status: input.status,
            published_at: (input.status == DocumentStatus::Published).then_some(now),
            created_at: now,
            updated_at: now,
        };
        self.db_ops.create_document(&document)?;

        log::info!(
            "Created {} document '{}' of type '{}'",
            document.status,
            document.uid,
            document.content_type
        );
        Ok(document)
    }

    /// Look a document up by uid. Drafts are hidden unless `include_drafts`.
    pub fn get(&self, uid: &str, include_drafts: bool) -> CmsResult<Document> {
        self.db_ops
            .get_document(uid)?
            .filter(|document| include_drafts || document.is_published())
            .ok_or_else(|| CmsError::NotFound("Document not found".to_string()))
    }

    pub fn list(&self, query: DocumentQuery, pagination: Pagination) -> CmsResult<Page<Document>> {
        self.db_ops.list_documents(&query.into_filter(), pagination)
    }

    /// Update fields in place. The content type is not rechecked.
    pub fn update(&self, uid: &str, update: DocumentUpdate) -> CmsResult<Document> {
        let data = update
            .data
            .as_ref()
            .map(validate_document_data)
            .transpose()?;

        let mut document = self
            .db_ops
            .get_document(uid)?
            .ok_or_else(|| CmsError::NotFound("Document not found".to_string()))?;

        let now = Utc::now();
        if let Some(title) = update.title {
            document.title = title;
        }
        if let Some(data) = data {
            document.data = data;
        }
        if let Some(status) = update.status {
            document.transition_to(status, now);
        }
        document.updated_at = now;

        self.db_ops.update_document(&document)?;
        Ok(document)
    }

    pub fn publish(&self, uid: &str) -> CmsResult<Document> {
        self.set_status(uid, DocumentStatus::Published)
    }

    pub fn unpublish(&self, uid: &str) -> CmsResult<Document> {
        self.set_status(uid, DocumentStatus::Draft)
    }

    fn set_status(&self, uid: &str, status: DocumentStatus) -> CmsResult<Document> {
        let document = self.update(
            uid,
            DocumentUpdate {
                status: Some(status),
                ..Default::default()
            },
        )?;
        log::info!("Document '{}' is now {}", uid, document.status);
        Ok(document)
    }

    pub fn delete(&self, uid: &str) -> CmsResult<()> {
        if !self.db_ops.delete_document(uid)? {
            return Err(CmsError::NotFound("Document not found".to_string()));
        }
        Ok(())
    }
}
