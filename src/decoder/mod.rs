pub mod blob;
pub mod sniff;

use std::sync::Arc;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::model::{AttachmentKind, ContentRef, ResultItem};

pub use blob::{BlobStore, ObjectUrl};
pub use sniff::{Signature, SNIFF_LEN};

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderSource {
    Remote(String),
    DataUrl(String),
    Object(ObjectUrl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    pub kind: AttachmentKind,
    pub source: RenderSource,
}

impl Renderable {
    pub fn inline_bytes(&self, store: &BlobStore) -> Option<Arc<[u8]>> {
        match &self.source {
            RenderSource::Remote(_) => None,
            RenderSource::DataUrl(url) => {
                let (_, payload) = url.split_once(',')?;
                LENIENT.decode(payload).ok().map(Arc::from)
            }
            RenderSource::Object(url) => store.resolve(url),
        }
    }
}

/// Returns `None` when the payload cannot be decoded; the caller shows a fallback.
pub fn decode_attachment(item: &ResultItem, store: &mut BlobStore) -> Option<Renderable> {
    match item.content_ref() {
        ContentRef::Url(url) | ContentRef::StoragePath(url) => Some(Renderable {
            kind: item.kind,
            source: RenderSource::Remote(url.to_string()),
        }),
        ContentRef::Inline(raw) => decode_inline(raw, store),
    }
}

fn decode_inline(raw: &str, store: &mut BlobStore) -> Option<Renderable> {
    let payload = strip_payload(raw);
    if payload.is_empty() {
        log::warn!("Attachment payload is empty");
        return None;
    }

    let signature = match sniff_base64_prefix(&payload) {
        Ok(signature) => signature,
        Err(err) => {
            log::warn!("Attachment payload is not valid base64: {err}");
            return None;
        }
    };

    let bytes = match LENIENT.decode(payload.as_bytes()) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("Attachment payload is not valid base64: {err}");
            return None;
        }
    };

    match signature.kind() {
        AttachmentKind::Image => Some(Renderable {
            kind: AttachmentKind::Image,
            source: RenderSource::DataUrl(format!(
                "data:{};base64,{payload}",
                signature.mime_type()
            )),
        }),
        AttachmentKind::Pdf => {
            if signature == Signature::Unknown {
                log::info!("Unrecognised attachment signature, treating as PDF");
            }
            let size = bytes.len();
            let url = store.create(bytes);
            log::debug!("Created {url} for a {size} byte PDF");
            Some(Renderable {
                kind: AttachmentKind::Pdf,
                source: RenderSource::Object(url),
            })
        }
    }
}

fn strip_payload(raw: &str) -> String {
    let body = match raw.trim_start().strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, body)| body).unwrap_or(""),
        None => raw,
    };
    body.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn sniff_base64_prefix(payload: &str) -> Result<Signature, base64::DecodeError> {
    // Every 4 base64 characters carry 3 bytes.
    let wanted = SNIFF_LEN.div_ceil(3) * 4;
    let prefix = payload.get(..wanted).unwrap_or(payload);
    let head = LENIENT.decode(prefix.as_bytes())?;
    Ok(Signature::sniff(&head))
}
