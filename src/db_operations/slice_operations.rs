use super::core::DbOperations;
use crate::error::{CmsError, CmsResult};
use crate::schema::SliceDefinition;

impl DbOperations {
    /// Stores a new slice definition; the slice type must not be taken
    pub fn create_slice(&self, slice: &SliceDefinition) -> CmsResult<()> {
        if !self.insert_new_in_tree(&self.slices_tree, &slice.slice_type, slice)? {
            return Err(CmsError::Conflict(format!(
                "Slice type \"{}\" already exists",
                slice.slice_type
            )));
        }
        Ok(())
    }

    pub fn get_slice(&self, slice_type: &str) -> CmsResult<Option<SliceDefinition>> {
        self.get_from_tree(&self.slices_tree, slice_type)
    }

    /// All slice definitions, newest first
    pub fn list_slices(&self) -> CmsResult<Vec<SliceDefinition>> {
        let mut slices: Vec<SliceDefinition> = self.list_values_in_tree(&self.slices_tree)?;
        slices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(slices)
    }

    pub fn update_slice(&self, slice: &SliceDefinition) -> CmsResult<()> {
        if !self.exists_in_tree(&self.slices_tree, &slice.slice_type)? {
            return Err(CmsError::NotFound(format!(
                "Slice \"{}\" not found",
                slice.slice_type
            )));
        }
        self.store_in_tree(&self.slices_tree, &slice.slice_type, slice)
    }

    pub fn delete_slice(&self, slice_type: &str) -> CmsResult<bool> {
        self.delete_from_tree(&self.slices_tree, slice_type)
    }
}
