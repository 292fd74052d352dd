use super::temp_db_ops;
use crate::db_operations::{DocumentFilter, Pagination};
use crate::document::{Document, DocumentData, DocumentStatus};
use crate::error::CmsError;
use chrono::{Duration, Utc};
use serde_json::Map;

fn document(uid: &str, title: &str, content_type: &str, status: DocumentStatus, minutes_ago: i64) -> Document {
    let at = Utc::now() - Duration::minutes(minutes_ago);
    Document {
        id: format!("id-{}", uid),
        uid: uid.to_string(),
        title: title.to_string(),
        content_type: content_type.to_string(),
        data: DocumentData {
            title: title.to_string(),
            uid: uid.to_string(),
            body: Vec::new(),
            extra: Map::new(),
        },
        status,
        published_at: (status == DocumentStatus::Published).then_some(at),
        created_at: at,
        updated_at: at,
    }
}

fn seed() -> (crate::db_operations::DbOperations, tempfile::TempDir) {
    let (db_ops, dir) = temp_db_ops();
    for doc in [
        document("home", "Home", "page", DocumentStatus::Published, 5),
        document("about", "About us", "page", DocumentStatus::Draft, 4),
        document("hello-world", "Hello World", "blog_post", DocumentStatus::Published, 3),
        document("draft-post", "Homework", "blog_post", DocumentStatus::Draft, 2),
    ] {
        db_ops.create_document(&doc).unwrap();
    }
    (db_ops, dir)
}

fn uids(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.uid.as_str()).collect()
}

/// Test a duplicate uid fails without touching the stored document
#[test]
fn test_duplicate_uid_conflicts() {
    let (db_ops, _dir) = seed();
    let duplicate = document("home", "Other", "blog_post", DocumentStatus::Draft, 0);

    assert!(matches!(
        db_ops.create_document(&duplicate),
        Err(CmsError::Conflict(_))
    ));
    let stored = db_ops.get_document("home").unwrap().unwrap();
    assert_eq!(stored.title, "Home");
    assert_eq!(stored.content_type, "page");
}

/// Test drafts are excluded unless asked for
#[test]
fn test_filter_drafts_and_types() {
    let (db_ops, _dir) = seed();

    let published = db_ops.find_documents(&DocumentFilter::published()).unwrap();
    assert_eq!(uids(&published), vec!["hello-world", "home"]);

    let all_pages = db_ops
        .find_documents(&DocumentFilter {
            content_type: Some("page".to_string()),
            include_drafts: true,
            search: None,
        })
        .unwrap();
    assert_eq!(uids(&all_pages), vec!["about", "home"]);
}

/// Test search covers title and uid case-insensitively
#[test]
fn test_search_title_and_uid() {
    let (db_ops, _dir) = seed();
    let filter = DocumentFilter {
        content_type: None,
        include_drafts: true,
        search: Some("HOME".to_string()),
    };
    assert_eq!(uids(&db_ops.find_documents(&filter).unwrap()), vec!["draft-post", "home"]);

    let filter = DocumentFilter {
        search: Some("world".to_string()),
        ..DocumentFilter::published()
    };
    assert_eq!(uids(&db_ops.find_documents(&filter).unwrap()), vec!["hello-world"]);
}

/// Test counts, recent previews and paging
#[test]
fn test_counts_recent_and_pages() {
    let (db_ops, _dir) = seed();
    assert_eq!(db_ops.count_documents_of_type("page").unwrap(), 2);
    assert_eq!(db_ops.count_documents_of_type("missing").unwrap(), 0);

    let recent = db_ops.recent_documents_of_type("blog_post", 1).unwrap();
    assert_eq!(uids(&recent), vec!["draft-post"]);

    let filter = DocumentFilter {
        include_drafts: true,
        ..DocumentFilter::default()
    };
    let page = db_ops.list_documents(&filter, Pagination::new(2, 3)).unwrap();
    assert_eq!(uids(&page.data), vec!["home"]);
    assert_eq!(page.meta.total, 4);
    assert_eq!(page.meta.pages, 2);
}
