use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use tokio::sync::oneshot;

use super::rasterizer::PageRasterizer;
use crate::error::RenderError;

const MIN_PIXEL_RATIO: f32 = 0.5;
const MAX_PIXEL_RATIO: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub session: u64,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub display_width: f32,
    pub display_height: f32,
    pub rgba: Vec<u8>,
}

type RenderReply = oneshot::Sender<Result<Vec<RenderedPage>, RenderError>>;

enum Command {
    Render {
        key: DocumentKey,
        bytes: Arc<[u8]>,
        scale: f32,
        pixel_ratio: f32,
        reply: RenderReply,
    },
    EvictSession(u64),
}

#[derive(Debug, Clone)]
pub struct RenderWorker {
    commands: mpsc::Sender<Command>,
}

impl RenderWorker {
    /// `connect` runs on the worker thread; a failure there turns every later
    /// render into that error.
    pub fn spawn<R, F>(connect: F) -> Self
    where
        R: PageRasterizer + 'static,
        F: FnOnce() -> Result<R, RenderError> + Send + 'static,
    {
        let (commands, inbox) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("pdf-render".to_string())
            .spawn(move || run(connect, inbox));
        if let Err(err) = spawned {
            log::error!("Unable to start PDF render thread: {err}");
        }
        Self { commands }
    }

    pub async fn render(
        &self,
        key: DocumentKey,
        bytes: Arc<[u8]>,
        scale: f32,
        pixel_ratio: f32,
    ) -> Result<Vec<RenderedPage>, RenderError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Render {
                key,
                bytes,
                scale,
                pixel_ratio,
                reply,
            })
            .map_err(|_| RenderError::WorkerGone)?;
        response.await.map_err(|_| RenderError::WorkerGone)?
    }

    pub fn evict_session(&self, session: u64) {
        if self.commands.send(Command::EvictSession(session)).is_err() {
            log::debug!("Render thread already stopped");
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Render { key, scale, .. } => f
                .debug_struct("Render")
                .field("key", key)
                .field("scale", scale)
                .finish_non_exhaustive(),
            Command::EvictSession(session) => f.debug_tuple("EvictSession").field(session).finish(),
        }
    }
}

fn run<R, F>(connect: F, inbox: mpsc::Receiver<Command>)
where
    R: PageRasterizer,
    F: FnOnce() -> Result<R, RenderError>,
{
    let rasterizer = connect();
    if let Err(err) = &rasterizer {
        log::error!("{err}");
    }

    let mut documents: HashMap<DocumentKey, R::Document> = HashMap::new();

    while let Ok(command) = inbox.recv() {
        match command {
            Command::Render {
                key,
                bytes,
                scale,
                pixel_ratio,
                reply,
            } => {
                let result = match &rasterizer {
                    Ok(rasterizer) => {
                        render_document(rasterizer, &mut documents, key, &bytes, scale, pixel_ratio)
                    }
                    Err(err) => Err(err.clone()),
                };
                if let Err(err) = &result {
                    log::warn!("Rendering attachment {} failed: {err}", key.index + 1);
                }
                // The requester may have been dropped; nothing to do then.
                let _ = reply.send(result);
            }
            Command::EvictSession(session) => {
                let before = documents.len();
                documents.retain(|key, _| key.session != session);
                log::debug!(
                    "Evicted {} cached document(s) of session {session}",
                    before - documents.len()
                );
            }
        }
    }

    log::debug!("PDF render thread stopping");
}

fn render_document<R: PageRasterizer>(
    rasterizer: &R,
    documents: &mut HashMap<DocumentKey, R::Document>,
    key: DocumentKey,
    bytes: &[u8],
    scale: f32,
    pixel_ratio: f32,
) -> Result<Vec<RenderedPage>, RenderError> {
    let document = match documents.entry(key) {
        std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
        std::collections::hash_map::Entry::Vacant(entry) => {
            log::info!("Parsing PDF for attachment {} ({} bytes)", key.index + 1, bytes.len());
            entry.insert(rasterizer.parse(bytes)?)
        }
    };

    let pixel_ratio = pixel_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO);
    let page_count = rasterizer.page_count(document);
    let mut pages = Vec::with_capacity(page_count);

    for page in 0..page_count {
        let size = rasterizer.page_size(document, page)?;
        let display_width = size.width * scale;
        let display_height = size.height * scale;
        let pixel_width = backing_pixels(display_width, pixel_ratio);
        let pixel_height = backing_pixels(display_height, pixel_ratio);

        let rgba = rasterizer.rasterize(document, page, pixel_width, pixel_height)?;
        pages.push(RenderedPage {
            pixel_width,
            pixel_height,
            display_width,
            display_height,
            rgba,
        });
    }

    Ok(pages)
}

fn backing_pixels(logical: f32, pixel_ratio: f32) -> u32 {
    (logical * pixel_ratio).round().max(1.0) as u32
}
