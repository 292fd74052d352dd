use crate::assets::{
    format_bytes, generate_filename, public_url, sanitize_filename, Asset, MimeAllowList,
    UploadStore,
};
use crate::db_operations::{DbOperations, Page, Pagination};
use crate::error::{CmsError, CmsResult};
use crate::{log_assets_info, log_assets_warn};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// How an asset listing is selected.
#[derive(Debug, Clone)]
pub enum AssetQuery {
    /// Filename / alt text search, paginated
    Search(String, Pagination),
    /// MIME type prefix, unpaginated
    MimeType(String),
    All(Pagination),
}

#[derive(Debug, Clone)]
pub enum AssetListing {
    Page(Page<Asset>),
    List(Vec<Asset>),
}

pub struct AssetService {
    db_ops: Arc<DbOperations>,
    store: UploadStore,
    allow_list: MimeAllowList,
    max_file_size: u64,
    public_base_url: String,
}

impl AssetService {
    pub fn new(
        db_ops: Arc<DbOperations>,
        store: UploadStore,
        allow_list: MimeAllowList,
        max_file_size: u64,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            db_ops,
            store,
            allow_list,
            max_file_size,
            public_base_url: public_base_url.into(),
        }
    }

    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn accepts(&self, mime_type: &str) -> bool {
        self.allow_list.allows(mime_type)
    }

    /// Store the file on disk, then record it.
    ///
    /// When the record cannot be written the file is removed once; a failed
    /// removal is logged and the file stays behind.
    pub async fn upload(&self, file: UploadedFile, alt_text: Option<String>) -> CmsResult<Asset> {
        self.upload_as(Uuid::new_v4().to_string(), file, alt_text).await
    }

    pub(super) async fn upload_as(
        &self,
        id: String,
        file: UploadedFile,
        alt_text: Option<String>,
    ) -> CmsResult<Asset> {
        if !self.accepts(&file.mime_type) {
            return Err(CmsError::Validation("Invalid file type".to_string()));
        }
        let size = file.bytes.len() as u64;
        if size > self.max_file_size {
            return Err(CmsError::Validation(format!(
                "File too large: {} exceeds the {} limit",
                format_bytes(size, 2),
                format_bytes(self.max_file_size, 2)
            )));
        }

        let filename = sanitize_filename(&file.original_name);
        let stored_name = generate_filename(&filename);
        self.store.write(&stored_name, &file.bytes).await?;

        let now = Utc::now();
        let asset = Asset {
            id,
            filename,
            mime_type: file.mime_type,
            url: public_url(&self.public_base_url, &stored_name),
            size,
            width: None,
            height: None,
            alt_text: alt_text.filter(|alt| !alt.is_empty()),
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.db_ops.create_asset(&asset) {
            if let Err(cleanup) = self.store.remove(&stored_name).await {
                log_assets_warn!("Failed to remove orphaned upload {}: {}", stored_name, cleanup);
            }
            return Err(e);
        }

        log_assets_info!(
            "Uploaded {} ({}, {})",
            asset.filename,
            asset.mime_type,
            format_bytes(size, 2)
        );
        Ok(asset)
    }

    pub fn get(&self, id: &str) -> CmsResult<Asset> {
        self.db_ops
            .get_asset(id)?
            .ok_or_else(|| CmsError::NotFound("Asset not found".to_string()))
    }

    pub fn list(&self, query: AssetQuery) -> CmsResult<AssetListing> {
        match query {
            AssetQuery::Search(search, pagination) => Ok(AssetListing::Page(
                self.db_ops.search_assets(&search, pagination)?,
            )),
            AssetQuery::MimeType(prefix) => Ok(AssetListing::List(
                self.db_ops.assets_by_mime_prefix(&prefix)?,
            )),
            AssetQuery::All(pagination) => {
                Ok(AssetListing::Page(self.db_ops.list_assets(pagination)?))
            }
        }
    }

    /// Only the alt text of an asset can change
    pub fn update_alt_text(&self, id: &str, alt_text: Option<String>) -> CmsResult<Asset> {
        let mut asset = self.get(id)?;
        asset.alt_text = alt_text;
        asset.updated_at = Utc::now();
        self.db_ops.update_asset(&asset)?;
        Ok(asset)
    }

    /// Remove the stored file, then the record
    pub async fn delete(&self, id: &str) -> CmsResult<()> {
        let asset = self.get(id)?;
        self.remove_loaded(&asset).await
    }

    /// Fails with `NotFound` when the record went away after it was loaded
    pub(super) async fn remove_loaded(&self, asset: &Asset) -> CmsResult<()> {
        if !self.store.remove(asset.stored_name()).await? {
            log_assets_warn!("Stored file for asset {} was already missing", asset.id);
        }
        if !self.db_ops.delete_asset(&asset.id)? {
            return Err(CmsError::NotFound("Asset not found".to_string()));
        }
        log_assets_info!("Deleted asset {} ({})", asset.id, asset.filename);
        Ok(())
    }
}
