use std::sync::Arc;

use iced::widget::image::Handle;

use super::{AttachmentKind, ResultItem};
use crate::decoder::Renderable;
use crate::error::ActionError;
use crate::image_pipeline::DecodedImage;
use crate::pdf::ZoomLevel;
use crate::utils::download_file_name;

#[derive(Debug, Clone)]
pub struct PageView {
    pub handle: Handle,
    pub display_width: f32,
    pub display_height: f32,
}

#[derive(Debug, Clone)]
pub enum ItemDisplay {
    Loading,
    Image(DecodedImage),
    Pages(Vec<PageView>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AttachmentView {
    pub name: String,
    pub renderable: Option<Renderable>,
    pub bytes: Option<Arc<[u8]>>,
    pub zoom: ZoomLevel,
    /// Bumped whenever a new fetch or render is started for this item.
    pub generation: u64,
    pub display: ItemDisplay,
}

impl AttachmentView {
    pub fn new(item: &ResultItem, renderable: Option<Renderable>) -> Self {
        let display = if renderable.is_some() {
            ItemDisplay::Loading
        } else {
            ItemDisplay::Failed(String::from("Không thể hiển thị kết quả này"))
        };

        Self {
            name: item.name.clone(),
            renderable,
            bytes: None,
            zoom: ZoomLevel::default(),
            generation: 0,
            display,
        }
    }

    pub fn kind(&self) -> Option<AttachmentKind> {
        self.renderable.as_ref().map(|renderable| renderable.kind)
    }

    pub fn download_name(&self) -> Option<String> {
        self.kind().map(|kind| download_file_name(&self.name, kind))
    }

    pub fn is_printable(&self) -> bool {
        self.kind() == Some(AttachmentKind::Pdf) && self.bytes.is_some()
    }

    pub fn download_payload(&self) -> Result<(String, Arc<[u8]>), ActionError> {
        match (self.download_name(), self.bytes.clone()) {
            (Some(file_name), Some(bytes)) => Ok((file_name, bytes)),
            _ => Err(ActionError::NotLoaded),
        }
    }

    pub fn print_payload(&self) -> Result<(String, Arc<[u8]>), ActionError> {
        if self.kind() != Some(AttachmentKind::Pdf) {
            return Err(ActionError::NotPrintable);
        }
        self.download_payload()
    }
}
