//! Business operations over the entity stores.
//!
//! Services validate input, talk to [`DbOperations`] and, for slices,
//! publish lifecycle events. Handlers never touch the stores directly.

pub mod asset_service;
pub mod content_type_service;
pub mod document_service;
pub mod slice_service;

#[cfg(test)]
mod tests;

pub use asset_service::{AssetListing, AssetQuery, AssetService, UploadedFile};
pub use content_type_service::{
    ContentTypeDetail, ContentTypeService, ContentTypeSummary, ContentTypeUpdate,
};
pub use document_service::{DocumentQuery, DocumentService, DocumentUpdate, NewDocument};
pub use slice_service::{NewSlice, SliceService, SliceUpdate};

use crate::assets::{MimeAllowList, UploadStore};
use crate::cms_node::config::CmsConfig;
use crate::db_operations::DbOperations;
use crate::webhook::SliceEventPublisher;
use std::sync::Arc;

/// Every service, wired to one store and one event publisher.
pub struct CmsServices {
    pub content_types: ContentTypeService,
    pub slices: SliceService,
    pub documents: DocumentService,
    pub assets: AssetService,
    db_ops: Arc<DbOperations>,
}

impl CmsServices {
    pub fn new(
        db_ops: Arc<DbOperations>,
        publisher: Arc<dyn SliceEventPublisher>,
        config: &CmsConfig,
    ) -> Self {
        let assets = AssetService::new(
            Arc::clone(&db_ops),
            UploadStore::new(config.upload_dir.clone()),
            MimeAllowList::new(&config.allowed_mime_types),
            config.max_file_size,
            config.public_base_url.clone(),
        );
        Self {
            content_types: ContentTypeService::new(Arc::clone(&db_ops)),
            slices: SliceService::new(Arc::clone(&db_ops), publisher),
            documents: DocumentService::new(Arc::clone(&db_ops)),
            assets,
            db_ops,
        }
    }

    pub fn db_ops(&self) -> &Arc<DbOperations> {
        &self.db_ops
    }
}
