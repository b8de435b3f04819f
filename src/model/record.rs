use serde::{Deserialize, Serialize};

use crate::decoder::{sniff_base64_prefix, Signature};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    #[default]
    Pdf,
    Image,
}

impl AttachmentKind {
    pub fn extension(self) -> &'static str {
        match self {
            AttachmentKind::Pdf => "pdf",
            AttachmentKind::Image => "jpg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub patient_name: String,
    pub patient_code: String,
    pub gender: String,
    pub birth_date: String,
    pub department: String,
    #[serde(rename = "date")]
    pub visit_date: String,
    #[serde(default)]
    pub results: Vec<ResultItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub name: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: AttachmentKind,
}

impl ResultItem {
    pub fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::classify(&self.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRef<'a> {
    Inline(&'a str),
    Url(&'a str),
    StoragePath(&'a str),
}

impl<'a> ContentRef<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed
            .get(..8)
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| trimmed.to_ascii_lowercase());

        if lower.starts_with("http://") || lower.starts_with("https://") {
            ContentRef::Url(trimmed)
        } else if trimmed.starts_with('/') && !sniffs_as_document(trimmed) {
            ContentRef::StoragePath(trimmed)
        } else {
            ContentRef::Inline(trimmed)
        }
    }
}

// JPEG payloads start with "/9j/", so a leading slash alone does not make a path.
fn sniffs_as_document(input: &str) -> bool {
    sniff_base64_prefix(input).is_ok_and(|signature| signature != Signature::Unknown)
}
