use crate::error::{CmsError, CmsResult};
use crate::{log_database_error, log_database_info};
use serde::{de::DeserializeOwned, Serialize};

/// Unified access to every entity tree of the content store.
///
/// Each entity kind lives in its own sled tree keyed by its primary key:
/// content types by `name`, slices by `sliceType`, documents by `uid` and
/// assets by `id`. Values are JSON encoded.
#[derive(Clone)]
pub struct DbOperations {
    /// The underlying sled database instance
    db: sled::Db,
    pub(crate) content_types_tree: sled::Tree,
    pub(crate) slices_tree: sled::Tree,
    pub(crate) documents_tree: sled::Tree,
    pub(crate) assets_tree: sled::Tree,
}

impl DbOperations {
    /// Opens all entity trees on `db`
    pub fn new(db: sled::Db) -> Result<Self, sled::Error> {
        let content_types_tree = db.open_tree("content_types")?;
        let slices_tree = db.open_tree("slices")?;
        let documents_tree = db.open_tree("documents")?;
        let assets_tree = db.open_tree("assets")?;
        log_database_info!(
            "Opened content store: {} content types, {} slices, {} documents, {} assets",
            content_types_tree.len(),
            slices_tree.len(),
            documents_tree.len(),
            assets_tree.len()
        );

        Ok(Self {
            db,
            content_types_tree,
            slices_tree,
            documents_tree,
            assets_tree,
        })
    }

    /// Gets a reference to the underlying database
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flushes every pending write to disk
    pub fn flush(&self) -> CmsResult<()> {
        self.db.flush().map_err(|e| {
            log_database_error!("Failed to flush content store: {}", e);
            CmsError::Database(format!("Flush failed: {}", e))
        })?;
        Ok(())
    }

    // ========== GENERIC TREE OPERATIONS ==========

    /// Store an item under `key`, replacing any previous value
    pub fn store_in_tree<T: Serialize>(
        &self,
        tree: &sled::Tree,
        key: &str,
        item: &T,
    ) -> CmsResult<()> {
        let bytes = serde_json::to_vec(item)?;

        tree.insert(key.as_bytes(), bytes)
            .map_err(|e| CmsError::Database(format!("Store failed: {}", e)))?;

        tree.flush()
            .map_err(|e| CmsError::Database(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    /// Store an item only if `key` is not taken yet.
    ///
    /// Returns `false` without writing anything when the key already exists.
    pub fn insert_new_in_tree<T: Serialize>(
        &self,
        tree: &sled::Tree,
        key: &str,
        item: &T,
    ) -> CmsResult<bool> {
        let bytes = serde_json::to_vec(item)?;

        let swapped = tree
            .compare_and_swap(key.as_bytes(), None as Option<&[u8]>, Some(bytes))
            .map_err(|e| CmsError::Database(format!("Insert failed: {}", e)))?;

        if swapped.is_err() {
            return Ok(false);
        }

        tree.flush()
            .map_err(|e| CmsError::Database(format!("Flush failed: {}", e)))?;

        Ok(true)
    }

    /// Retrieve an item by key
    pub fn get_from_tree<T: DeserializeOwned>(
        &self,
        tree: &sled::Tree,
        key: &str,
    ) -> CmsResult<Option<T>> {
        match tree.get(key.as_bytes()) {
            Ok(Some(bytes)) => {
                let item = serde_json::from_slice(&bytes).map_err(|e| {
                    CmsError::Serialization(format!("Deserialization failed: {}", e))
                })?;
                Ok(Some(item))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(CmsError::Database(format!("Retrieval failed: {}", e))),
        }
    }

    /// List all key-value pairs in a tree
    pub fn list_items_in_tree<T: DeserializeOwned>(
        &self,
        tree: &sled::Tree,
    ) -> CmsResult<Vec<(String, T)>> {
        let mut items = Vec::new();
        for result in tree.iter() {
            let (key, value) =
                result.map_err(|e| CmsError::Database(format!("Tree iteration failed: {}", e)))?;
            let key_str = String::from_utf8_lossy(&key).to_string();
            let item = serde_json::from_slice(&value).map_err(|e| {
                CmsError::Serialization(format!(
                    "Deserialization failed for key '{}': {}",
                    key_str, e
                ))
            })?;
            items.push((key_str, item));
        }
        Ok(items)
    }

    /// List all values in a tree, dropping their keys
    pub fn list_values_in_tree<T: DeserializeOwned>(&self, tree: &sled::Tree) -> CmsResult<Vec<T>> {
        Ok(self
            .list_items_in_tree(tree)?
            .into_iter()
            .map(|(_, item)| item)
            .collect())
    }

    /// Delete an item, reporting whether it existed
    pub fn delete_from_tree(&self, tree: &sled::Tree, key: &str) -> CmsResult<bool> {
        let existed = tree
            .remove(key.as_bytes())
            .map_err(|e| CmsError::Database(format!("Delete failed: {}", e)))?
            .is_some();

        tree.flush()
            .map_err(|e| CmsError::Database(format!("Flush failed: {}", e)))?;

        Ok(existed)
    }

    /// Check if a key exists in a specific tree
    pub fn exists_in_tree(&self, tree: &sled::Tree, key: &str) -> CmsResult<bool> {
        tree.contains_key(key.as_bytes())
            .map_err(|e| CmsError::Database(format!("Existence check failed: {}", e)))
    }
}
