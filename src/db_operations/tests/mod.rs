mod document_store_tests;

use crate::db_operations::DbOperations;
use tempfile::TempDir;

/// Open a throw-away store; keep the directory alive for the test's duration
pub(super) fn temp_db_ops() -> (DbOperations, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = sled::Config::new()
        .path(temp_dir.path())
        .temporary(true)
        .open()
        .unwrap();
    (DbOperations::new(db).unwrap(), temp_dir)
}
