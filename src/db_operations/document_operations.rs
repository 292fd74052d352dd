use super::core::DbOperations;
use super::pagination::{Page, Pagination};
use crate::document::{Document, DocumentStatus};
use crate::error::{CmsError, CmsResult};

/// Selection applied to a document listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    /// Only documents of this content type
    pub content_type: Option<String>,
    /// Drafts are dropped unless set
    pub include_drafts: bool,
    /// Case-insensitive substring over `title` and `uid`
    pub search: Option<String>,
}

impl DocumentFilter {
    pub fn published() -> Self {
        Self::default()
    }

    fn matches(&self, document: &Document, needle: Option<&str>) -> bool {
        if !self.include_drafts && document.status != DocumentStatus::Published {
            return false;
        }
        if let Some(content_type) = &self.content_type {
            if &document.content_type != content_type {
                return false;
            }
        }
        match needle {
            Some(needle) => {
                document.title.to_lowercase().contains(needle)
                    || document.uid.to_lowercase().contains(needle)
            }
            None => true,
        }
    }
}

impl DbOperations {
    /// Stores a new document; the uid must not be taken
    pub fn create_document(&self, document: &Document) -> CmsResult<()> {
        if !self.insert_new_in_tree(&self.documents_tree, &document.uid, document)? {
            return Err(CmsError::Conflict(format!(
                "Document with uid \"{}\" already exists",
                document.uid
            )));
        }
        Ok(())
    }

    pub fn get_document(&self, uid: &str) -> CmsResult<Option<Document>> {
        self.get_from_tree(&self.documents_tree, uid)
    }

    pub fn document_exists(&self, uid: &str) -> CmsResult<bool> {
        self.exists_in_tree(&self.documents_tree, uid)
    }

    /// Documents matching `filter`, newest first
    pub fn find_documents(&self, filter: &DocumentFilter) -> CmsResult<Vec<Document>> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut documents: Vec<Document> = self
            .list_values_in_tree::<Document>(&self.documents_tree)?
            .into_iter()
            .filter(|document| filter.matches(document, needle.as_deref()))
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    pub fn list_documents(
        &self,
        filter: &DocumentFilter,
        pagination: Pagination,
    ) -> CmsResult<Page<Document>> {
        Ok(pagination.apply(self.find_documents(filter)?))
    }

    /// Number of documents of a content type, any status
    pub fn count_documents_of_type(&self, content_type: &str) -> CmsResult<u64> {
        let documents: Vec<Document> = self.list_values_in_tree(&self.documents_tree)?;
        Ok(documents
            .iter()
            .filter(|document| document.content_type == content_type)
            .count() as u64)
    }

    /// Newest `count` documents of a content type, any status
    pub fn recent_documents_of_type(
        &self,
        content_type: &str,
        count: usize,
    ) -> CmsResult<Vec<Document>> {
        let filter = DocumentFilter {
            content_type: Some(content_type.to_string()),
            include_drafts: true,
            search: None,
        };
        let mut documents = self.find_documents(&filter)?;
        documents.truncate(count);
        Ok(documents)
    }

    pub fn update_document(&self, document: &Document) -> CmsResult<()> {
        if !self.document_exists(&document.uid)? {
            return Err(CmsError::NotFound(format!(
                "Document \"{}\" not found",
                document.uid
            )));
        }
        self.store_in_tree(&self.documents_tree, &document.uid, document)
    }

    pub fn delete_document(&self, uid: &str) -> CmsResult<bool> {
        self.delete_from_tree(&self.documents_tree, uid)
    }
}
