/// The MIME types accepted for upload. Matching is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeAllowList {
    allowed: Vec<String>,
}

impl MimeAllowList {
    pub fn new(allowed: &[String]) -> Self {
        Self {
            allowed: allowed.iter().map(|m| m.to_ascii_lowercase()).collect(),
        }
    }

    pub fn allows(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.to_ascii_lowercase();
        self.allowed.iter().any(|allowed| *allowed == mime_type)
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms_node::config::default_allowed_mime_types;

    #[test]
    fn default_list_accepts_images_and_pdf_only() {
        let list = MimeAllowList::new(&default_allowed_mime_types());
        for mime in ["image/jpeg", "image/png", "image/svg+xml", "application/pdf", "IMAGE/GIF"] {
            assert!(list.allows(mime), "{} should be accepted", mime);
        }
        for mime in ["text/plain", "application/msword", "image", "image/png; charset=x"] {
            assert!(!list.allows(mime), "{} should be rejected", mime);
        }
    }
}
