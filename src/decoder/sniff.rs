use crate::model::AttachmentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    Pdf,
    Jpeg,
    Png,
    Gif,
    Unknown,
}

const PDF_MAGIC: &[u8] = b"%PDF";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const GIF_MAGIC: &[u8] = b"GIF8";

pub const SNIFF_LEN: usize = 8;

impl Signature {
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(PDF_MAGIC) {
            Signature::Pdf
        } else if bytes.starts_with(JPEG_MAGIC) {
            Signature::Jpeg
        } else if bytes.starts_with(PNG_MAGIC) {
            Signature::Png
        } else if bytes.starts_with(GIF_MAGIC) {
            Signature::Gif
        } else {
            Signature::Unknown
        }
    }

    /// Inconclusive input is treated as a PDF.
    pub fn kind(self) -> AttachmentKind {
        match self {
            Signature::Jpeg | Signature::Png | Signature::Gif => AttachmentKind::Image,
            Signature::Pdf | Signature::Unknown => AttachmentKind::Pdf,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Signature::Jpeg => "image/jpeg",
            Signature::Png => "image/png",
            Signature::Gif => "image/gif",
            Signature::Pdf | Signature::Unknown => "application/pdf",
        }
    }
}
