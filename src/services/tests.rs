use super::*;
use crate::db_operations::Pagination;
use crate::document::DocumentStatus;
use crate::error::CmsError;
use crate::webhook::{SliceEvent, SliceEventPublisher};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Publisher that keeps every event it is handed
#[derive(Default)]
struct RecordingPublisher {
    events: Mutex<Vec<SliceEvent>>,
}

impl RecordingPublisher {
    fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }
}

impl SliceEventPublisher for RecordingPublisher {
    fn publish(&self, event: SliceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

struct Fixture {
    services: CmsServices,
    publisher: Arc<RecordingPublisher>,
    _dir: TempDir,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let db = sled::Config::new()
        .path(dir.path().join("db"))
        .temporary(true)
        .open()
        .unwrap();
    let db_ops = Arc::new(DbOperations::new(db).unwrap());
    let publisher = Arc::new(RecordingPublisher::default());

    let mut config = CmsConfig::new(dir.path().join("db"));
    config.upload_dir = dir.path().join("uploads");
    config.max_file_size = 16;

    let services = CmsServices::new(db_ops, publisher.clone(), &config);
    Fixture {
        services,
        publisher,
        _dir: dir,
    }
}

fn page_schema() -> Value {
    json!({"fields": [{"id": "title", "type": "text", "label": "Title", "required": true}]})
}

fn hero_schema() -> Value {
    json!({"primary": [{"id": "title", "type": "text", "label": "Title", "required": true}]})
}

fn new_document(uid: &str, status: DocumentStatus) -> NewDocument {
    NewDocument {
        uid: uid.to_string(),
        title: uid.to_uppercase(),
        content_type: "page".to_string(),
        data: json!({"title": uid.to_uppercase(), "uid": uid, "body": []}),
        status,
    }
}

fn new_hero() -> NewSlice {
    NewSlice {
        slice_type: "hero".to_string(),
        name: "Hero".to_string(),
        description: String::new(),
        schema: hero_schema(),
        items_schema: None,
    }
}

#[test]
fn test_content_type_rejects_unknown_field_type() {
    let fx = fixture();
    let schema = json!({"fields": [{"id": "x", "type": "rich_text", "label": "X"}]});
    let err = fx
        .services
        .content_types
        .create("page", "", &schema)
        .unwrap_err();
    assert!(matches!(err, CmsError::Schema(_)));
    assert!(fx.services.content_types.list().unwrap().is_empty());
}

#[test]
fn test_content_type_summary_counts_documents() {
    let fx = fixture();
    fx.services
        .content_types
        .create("page", "Pages", &page_schema())
        .unwrap();
    fx.services
        .documents
        .create(new_document("home", DocumentStatus::Draft))
        .unwrap();
    fx.services
        .documents
        .create(new_document("about", DocumentStatus::Published))
        .unwrap();

    let summaries = fx.services.content_types.list().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].document_count, 2);

    let detail = fx.services.content_types.get("page").unwrap();
    assert_eq!(detail.recent_documents.len(), 2);

    let (_, published) = fx
        .services
        .content_types
        .get_with_documents("page", Pagination::first(20))
        .unwrap();
    assert_eq!(published.meta.total, 1);
    assert_eq!(published.data[0].uid, "about");
}

#[test]
fn test_content_type_update_and_delete() {
    let fx = fixture();
    let service = &fx.services.content_types;
    service.create("page", "", &page_schema()).unwrap();

    let updated = service
        .update(
            "page",
            ContentTypeUpdate {
                description: Some("Landing pages".to_string()),
                schema: None,
            },
        )
        .unwrap();
    assert_eq!(updated.description, "Landing pages");
    assert_eq!(updated.schema.fields.len(), 1);

    service.delete("page").unwrap();
    assert!(matches!(service.delete("page"), Err(CmsError::NotFound(_))));
    assert!(matches!(
        service.update("page", ContentTypeUpdate::default()),
        Err(CmsError::NotFound(_))
    ));
}

#[test]
fn test_document_create_requires_existing_content_type() {
    let fx = fixture();
    let err = fx
        .services
        .documents
        .create(new_document("home", DocumentStatus::Draft))
        .unwrap_err();
    assert!(matches!(err, CmsError::Validation(ref msg) if msg.contains("does not exist")));
    assert!(matches!(
        fx.services.documents.get("home", true),
        Err(CmsError::NotFound(_))
    ));
}

#[test]
fn test_document_duplicate_uid_is_conflict() {
    let fx = fixture();
    fx.services
        .content_types
        .create("page", "", &page_schema())
        .unwrap();
    let original = fx
        .services
        .documents
        .create(new_document("home", DocumentStatus::Draft))
        .unwrap();

    let err = fx
        .services
        .documents
        .create(new_document("home", DocumentStatus::Published))
        .unwrap_err();
    assert!(matches!(err, CmsError::Conflict(_)));

    let stored = fx.services.documents.get("home", true).unwrap();
    assert_eq!(stored.id, original.id);
    assert_eq!(stored.status, DocumentStatus::Draft);
}

#[test]
fn test_document_malformed_data_is_rejected_before_lookup() {
    let fx = fixture();
    let mut input = new_document("home", DocumentStatus::Draft);
    input.data = json!({"title": "Home", "uid": "home", "body": [{"primary": {}}]});

    let err = fx.services.documents.create(input).unwrap_err();
    assert!(matches!(err, CmsError::Schema(_)));
}

#[test]
fn test_document_publish_lifecycle() {
    let fx = fixture();
    fx.services
        .content_types
        .create("page", "", &page_schema())
        .unwrap();
    let docs = &fx.services.documents;

    let created = docs
        .create(new_document("home", DocumentStatus::Draft))
        .unwrap();
    assert!(created.published_at.is_none());
    assert!(matches!(docs.get("home", false), Err(CmsError::NotFound(_))));

    let published = docs.publish("home").unwrap();
    let first_published_at = published.published_at.unwrap();
    assert_eq!(published.status, DocumentStatus::Published);

    let again = docs.publish("home").unwrap();
    assert_eq!(again.published_at, Some(first_published_at));

    let draft = docs.unpublish("home").unwrap();
    assert_eq!(draft.status, DocumentStatus::Draft);
    assert!(draft.published_at.is_none());
}

#[test]
fn test_document_created_published_has_timestamp() {
    let fx = fixture();
    fx.services
        .content_types
        .create("page", "", &page_schema())
        .unwrap();
    let document = fx
        .services
        .documents
        .create(new_document("home", DocumentStatus::Published))
        .unwrap();
    assert_eq!(document.published_at, Some(document.created_at));
}

#[test]
fn test_document_search_ignores_draft_flag() {
    let fx = fixture();
    fx.services
        .content_types
        .create("page", "", &page_schema())
        .unwrap();
    let docs = &fx.services.documents;
    docs.create(new_document("home-draft", DocumentStatus::Draft))
        .unwrap();
    docs.create(new_document("home-live", DocumentStatus::Published))
        .unwrap();

    let found = docs
        .list(
            DocumentQuery {
                search: Some("HOME".to_string()),
                content_type: None,
                include_drafts: true,
            },
            Pagination::first(20),
        )
        .unwrap();
    assert_eq!(found.meta.total, 1);
    assert_eq!(found.data[0].uid, "home-live");

    let all = docs
        .list(
            DocumentQuery {
                include_drafts: true,
                ..Default::default()
            },
            Pagination::first(20),
        )
        .unwrap();
    assert_eq!(all.meta.total, 2);
}

#[test]
fn test_document_update_does_not_recheck_content_type() {
    let fx = fixture();
    fx.services
        .content_types
        .create("page", "", &page_schema())
        .unwrap();
    fx.services
        .documents
        .create(new_document("home", DocumentStatus::Draft))
        .unwrap();
    fx.services.content_types.delete("page").unwrap();

    let updated = fx
        .services
        .documents
        .update(
            "home",
            DocumentUpdate {
                title: Some("Welcome".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Welcome");
    assert!(updated.updated_at >= updated.created_at);
}

#[test]
fn test_slice_events_follow_mutations() {
    let fx = fixture();
    let slices = &fx.services.slices;

    slices.create(new_hero()).unwrap();
    slices
        .update(
            "hero",
            SliceUpdate {
                name: Some("Big hero".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    slices.delete("hero").unwrap();

    assert_eq!(
        fx.publisher.names(),
        vec!["slice.created", "slice.updated", "slice.deleted"]
    );
}

#[test]
fn test_failed_slice_mutations_publish_nothing() {
    let fx = fixture();
    let slices = &fx.services.slices;

    assert!(matches!(slices.delete("hero"), Err(CmsError::NotFound(_))));
    assert!(matches!(
        slices.update("hero", SliceUpdate::default()),
        Err(CmsError::NotFound(_))
    ));

    slices.create(new_hero()).unwrap();
    assert!(matches!(slices.create(new_hero()), Err(CmsError::Conflict(_))));

    let mut invalid = new_hero();
    invalid.slice_type = "broken".to_string();
    invalid.schema = json!({"primary": [{"id": "", "type": "text", "label": "X"}]});
    assert!(slices.create(invalid).is_err());

    assert_eq!(fx.publisher.names(), vec!["slice.created"]);
}

#[test]
fn test_slice_update_clears_items_schema() {
    let fx = fixture();
    let slices = &fx.services.slices;
    let mut input = new_hero();
    input.items_schema = Some(json!({"primary": [{"id": "caption", "type": "text", "label": "Caption"}]}));
    assert!(slices.create(input).unwrap().items_schema.is_some());

    let updated = slices
        .update(
            "hero",
            SliceUpdate {
                items_schema: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(updated.items_schema.is_none());
}

#[test]
fn test_slice_validate_data() {
    let fx = fixture();
    let slices = &fx.services.slices;
    slices.create(new_hero()).unwrap();

    assert!(!slices.validate_data("hero", &json!({"primary": {}})).unwrap());
    assert!(slices
        .validate_data("hero", &json!({"primary": {"title": "X"}}))
        .unwrap());
    assert!(matches!(
        slices.validate_data("missing", &json!({})),
        Err(CmsError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_asset_upload_checks_type_and_size() {
    let fx = fixture();
    let assets = &fx.services.assets;

    let text = UploadedFile {
        original_name: "notes.txt".to_string(),
        mime_type: "text/plain".to_string(),
        bytes: b"hi".to_vec(),
    };
    assert!(matches!(
        assets.upload(text, None).await,
        Err(CmsError::Validation(ref msg)) if msg == "Invalid file type"
    ));

    let big = UploadedFile {
        original_name: "big.png".to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![0; 17],
    };
    assert!(matches!(
        assets.upload(big, None).await,
        Err(CmsError::Validation(_))
    ));
}

#[tokio::test]
async fn test_asset_upload_update_delete() {
    let fx = fixture();
    let assets = &fx.services.assets;

    let file = UploadedFile {
        original_name: "My Logo.PNG".to_string(),
        mime_type: "image/png".to_string(),
        bytes: b"png-bytes".to_vec(),
    };
    let asset = assets.upload(file, Some("Logo".to_string())).await.unwrap();
    assert_eq!(asset.filename, "my_logo.png");
    assert_eq!(asset.size, 9);
    assert!(asset.url.starts_with("http://localhost:3001/uploads/my_logo-"));

    let stored = assets.store().path_for(asset.stored_name());
    assert!(stored.exists());

    let updated = assets.update_alt_text(&asset.id, None).unwrap();
    assert!(updated.alt_text.is_none());

    match assets.list(AssetQuery::MimeType("image/".to_string())).unwrap() {
        AssetListing::List(list) => assert_eq!(list.len(), 1),
        AssetListing::Page(_) => panic!("mime type listing is not paginated"),
    }

    assets.delete(&asset.id).await.unwrap();
    assert!(!stored.exists());
    assert!(matches!(assets.get(&asset.id), Err(CmsError::NotFound(_))));
}

fn png(name: &str) -> UploadedFile {
    UploadedFile {
        original_name: name.to_string(),
        mime_type: "image/png".to_string(),
        bytes: b"png-bytes".to_vec(),
    }
}

fn stored_files(assets: &AssetService) -> usize {
    std::fs::read_dir(assets.store().root()).unwrap().count()
}

#[tokio::test]
async fn test_asset_upload_removes_file_when_record_fails() {
    let fx = fixture();
    let assets = &fx.services.assets;

    let first = assets.upload(png("first.png"), None).await.unwrap();
    assert_eq!(stored_files(assets), 1);

    let result = assets
        .upload_as(first.id.clone(), png("second.png"), None)
        .await;
    assert!(matches!(result, Err(CmsError::Conflict(_))));

    assert_eq!(stored_files(assets), 1);
    assert!(assets.store().path_for(first.stored_name()).exists());
    assert_eq!(assets.get(&first.id).unwrap().filename, "first.png");
}

#[tokio::test]
async fn test_asset_delete_reports_vanished_record() {
    let fx = fixture();
    let assets = &fx.services.assets;

    let asset = assets.upload(png("logo.png"), None).await.unwrap();
    assert!(fx.services.db_ops().delete_asset(&asset.id).unwrap());

    assert!(matches!(
        assets.remove_loaded(&asset).await,
        Err(CmsError::NotFound(ref msg)) if msg == "Asset not found"
    ));
    assert_eq!(stored_files(assets), 0);
}

#[test]
fn test_asset_limits_come_from_config() {
    let fx = fixture();
    assert_eq!(fx.services.assets.max_file_size(), 16);
    assert!(fx.services.assets.store().root().ends_with("uploads"));
}
