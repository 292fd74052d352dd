use crate::error::{CmsError, CmsResult};
use crate::log_assets_debug;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use uuid::Uuid;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9.-]").expect("Invalid regex pattern"));
static UNDERSCORE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+").expect("Invalid regex pattern"));

/// Replace every character outside `[a-zA-Z0-9.-]` with `_`, collapse runs
/// of `_` and lowercase the result.
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name, "_");
    UNDERSCORE_RUNS.replace_all(&replaced, "_").to_lowercase()
}

/// `<stem>-<unix ms>-<8 hex uuid chars><ext>`, lowercased.
///
/// The extension is everything from the last `.` of the name, unless the
/// name starts with that dot.
pub fn generate_filename(original: &str) -> String {
    let (stem, ext) = split_extension(original);
    let timestamp = Utc::now().timestamp_millis();
    let fragment: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
    format!("{}-{}-{}{}", stem, timestamp, fragment, ext).to_lowercase()
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}

/// Public URL under which a stored file is served
pub fn public_url(base_url: &str, filename: &str) -> String {
    format!("{}/uploads/{}", base_url.trim_end_matches('/'), filename)
}

/// The upload directory on disk.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Create the directory if it is missing
    pub fn ensure_dir(&self) -> CmsResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            CmsError::Config(format!(
                "Failed to create upload directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    pub async fn write(&self, filename: &str, bytes: &[u8]) -> CmsResult<PathBuf> {
        let path = self.path_for(filename);
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;
        log_assets_debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// Remove a stored file. Returns `false` when there was nothing to remove.
    pub async fn remove(&self, filename: &str) -> CmsResult<bool> {
        let path = self.path_for(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_filename("My Photo (1).JPG"), "my_photo_1_.jpg");
        assert_eq!(sanitize_filename("a  b__c.png"), "a_b_c.png");
        assert_eq!(sanitize_filename("report-2024.pdf"), "report-2024.pdf");
    }

    #[test]
    fn generated_name_keeps_stem_and_extension() {
        let name = generate_filename("hero.PNG");
        assert!(name.starts_with("hero-"));
        assert!(name.ends_with(".png"));

        let middle = &name["hero-".len()..name.len() - ".png".len()];
        let (timestamp, fragment) = middle.split_once('-').unwrap();
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(fragment.len(), 8);
        assert!(fragment.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(split_extension(".env"), (".env", ""));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
    }

    #[test]
    fn builds_public_urls() {
        assert_eq!(
            public_url("http://localhost:3001/", "a.png"),
            "http://localhost:3001/uploads/a.png"
        );
    }

    #[tokio::test]
    async fn writes_and_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"));

        let path = store.write("a.txt", b"hello").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");

        assert!(store.remove("a.txt").await.unwrap());
        assert!(!store.remove("a.txt").await.unwrap());
    }
}
