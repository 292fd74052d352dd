use super::core::DbOperations;
use super::pagination::{Page, Pagination};
use crate::assets::Asset;
use crate::error::{CmsError, CmsResult};

impl DbOperations {
    pub fn create_asset(&self, asset: &Asset) -> CmsResult<()> {
        if !self.insert_new_in_tree(&self.assets_tree, &asset.id, asset)? {
            return Err(CmsError::Conflict(format!(
                "Asset \"{}\" already exists",
                asset.id
            )));
        }
        Ok(())
    }

    pub fn get_asset(&self, id: &str) -> CmsResult<Option<Asset>> {
        self.get_from_tree(&self.assets_tree, id)
    }

    fn assets_newest_first(&self) -> CmsResult<Vec<Asset>> {
        let mut assets: Vec<Asset> = self.list_values_in_tree(&self.assets_tree)?;
        assets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(assets)
    }

    pub fn list_assets(&self, pagination: Pagination) -> CmsResult<Page<Asset>> {
        Ok(pagination.apply(self.assets_newest_first()?))
    }

    /// Case-insensitive substring search over `filename` and `altText`
    pub fn search_assets(&self, query: &str, pagination: Pagination) -> CmsResult<Page<Asset>> {
        let needle = query.to_lowercase();
        let matches = self
            .assets_newest_first()?
            .into_iter()
            .filter(|asset| {
                asset.filename.to_lowercase().contains(&needle)
                    || asset
                        .alt_text
                        .as_ref()
                        .map_or(false, |alt| alt.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(pagination.apply(matches))
    }

    /// Assets whose MIME type starts with `prefix`, e.g. `image/`
    pub fn assets_by_mime_prefix(&self, prefix: &str) -> CmsResult<Vec<Asset>> {
        Ok(self
            .assets_newest_first()?
            .into_iter()
            .filter(|asset| asset.mime_type.starts_with(prefix))
            .collect())
    }

    pub fn update_asset(&self, asset: &Asset) -> CmsResult<()> {
        if !self.exists_in_tree(&self.assets_tree, &asset.id)? {
            return Err(CmsError::NotFound("Asset not found".to_string()));
        }
        self.store_in_tree(&self.assets_tree, &asset.id, asset)
    }

    pub fn delete_asset(&self, id: &str) -> CmsResult<bool> {
        self.delete_from_tree(&self.assets_tree, id)
    }
}
