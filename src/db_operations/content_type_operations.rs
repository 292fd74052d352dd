use super::core::DbOperations;
use crate::error::{CmsError, CmsResult};
use crate::schema::ContentType;

impl DbOperations {
    /// Stores a new content type; the name must not be taken
    pub fn create_content_type(&self, content_type: &ContentType) -> CmsResult<()> {
        if !self.insert_new_in_tree(&self.content_types_tree, &content_type.name, content_type)? {
            return Err(CmsError::Conflict(format!(
                "Content type \"{}\" already exists",
                content_type.name
            )));
        }
        Ok(())
    }

    pub fn get_content_type(&self, name: &str) -> CmsResult<Option<ContentType>> {
        self.get_from_tree(&self.content_types_tree, name)
    }

    pub fn content_type_exists(&self, name: &str) -> CmsResult<bool> {
        self.exists_in_tree(&self.content_types_tree, name)
    }

    /// All content types, newest first
    pub fn list_content_types(&self) -> CmsResult<Vec<ContentType>> {
        let mut content_types: Vec<ContentType> =
            self.list_values_in_tree(&self.content_types_tree)?;
        content_types.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(content_types)
    }

    /// Overwrites an existing content type
    pub fn update_content_type(&self, content_type: &ContentType) -> CmsResult<()> {
        if !self.content_type_exists(&content_type.name)? {
            return Err(CmsError::NotFound(format!(
                "Content type \"{}\" not found",
                content_type.name
            )));
        }
        self.store_in_tree(&self.content_types_tree, &content_type.name, content_type)
    }

    /// Removes a content type; documents referencing it are left alone
    pub fn delete_content_type(&self, name: &str) -> CmsResult<bool> {
        self.delete_from_tree(&self.content_types_tree, name)
    }
}
