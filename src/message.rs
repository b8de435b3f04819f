use std::path::PathBuf;
use std::sync::Arc;

use crate::model::ResultRecord;
use crate::pdf::RenderedPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub session: u64,
    pub index: usize,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    Reload,
    RecordLoaded { session: u64, result: Result<ResultRecord, String> },
    PixelRatioDetected(f32),
    AttachmentFetched { ticket: Ticket, result: Result<Arc<[u8]>, String> },
    PagesRendered { ticket: Ticket, result: Result<Vec<RenderedPage>, String> },
    ZoomIn(usize),
    ZoomOut(usize),
    Download(usize),
    DownloadFinished(Result<Option<PathBuf>, String>),
    Print(usize),
    PrintFinished(Result<(), String>),
}
