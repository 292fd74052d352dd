use crate::cms_node::http_helpers::{created, no_content, ok, paginated, ListQuery};
use crate::cms_node::http_server::AppState;
use crate::cms_node::request_validation::parse_asset_update;
use crate::constants::DEFAULT_ASSET_PAGE_SIZE;
use crate::error::{CmsError, CmsResult};
use crate::log_http_warn;
use crate::services::{AssetListing, AssetQuery, UploadedFile};
use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use serde_json::Value;

const FILE_FIELD: &str = "file";
const ALT_TEXT_FIELD: &str = "altText";

fn multipart_error(err: MultipartError) -> CmsError {
    log_http_warn!("Rejected multipart payload: {}", err);
    CmsError::Validation(format!("Invalid multipart payload: {}", err))
}

/// Read a field into memory, failing once it grows past `limit` bytes
async fn read_field(field: &mut Field, limit: u64) -> CmsResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if (bytes.len() + chunk.len()) as u64 > limit {
            return Err(CmsError::Validation(format!(
                "File too large: the limit is {} bytes",
                limit
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Upload one file from the multipart field `file`, with optional `altText`.
pub async fn upload_asset(
    mut payload: Multipart,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let service = &state.services.assets;
    let mut file = None;
    let mut alt_text = None;

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.name().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let original_name = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or("upload")
                    .to_string();
                let mime_type = field
                    .content_type()
                    .map(|mime| mime.essence_str().to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                if !service.accepts(&mime_type) {
                    return Err(CmsError::Validation("Invalid file type".to_string()));
                }
                let bytes = read_field(&mut field, service.max_file_size()).await?;
                file = Some(UploadedFile {
                    original_name,
                    mime_type,
                    bytes,
                });
            }
            ALT_TEXT_FIELD => {
                let bytes = read_field(&mut field, service.max_file_size()).await?;
                alt_text = Some(String::from_utf8_lossy(&bytes).into_owned());
            }
            _ => while field.try_next().await.map_err(multipart_error)?.is_some() {},
        }
    }

    let file = file.ok_or_else(|| CmsError::Validation("No file uploaded".to_string()))?;
    Ok(created(service.upload(file, alt_text).await?))
}

/// List assets by `search`, by `mimeType` prefix, or all of them.
pub async fn list_assets(
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let pagination = query.pagination(DEFAULT_ASSET_PAGE_SIZE);
    let selection = match (query.search(), query.mime_type()) {
        (Some(search), _) => AssetQuery::Search(search, pagination),
        (None, Some(prefix)) => AssetQuery::MimeType(prefix),
        (None, None) => AssetQuery::All(pagination),
    };

    match state.services.assets.list(selection)? {
        AssetListing::Page(page) => Ok(paginated(page)),
        AssetListing::List(assets) => Ok(ok(assets)),
    }
}

pub async fn get_asset(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    Ok(ok(state.services.assets.get(&path.into_inner())?))
}

pub async fn update_asset(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    let alt_text = parse_asset_update(&body)?;
    let asset = state
        .services
        .assets
        .update_alt_text(&path.into_inner(), alt_text)?;
    Ok(ok(asset))
}

pub async fn delete_asset(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> CmsResult<HttpResponse> {
    state.services.assets.delete(&path.into_inner()).await?;
    Ok(no_content())
}
