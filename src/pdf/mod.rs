pub mod rasterizer;
pub mod worker;
pub mod zoom;

pub use rasterizer::PdfiumRasterizer;
pub use worker::{DocumentKey, RenderWorker, RenderedPage};
pub use zoom::ZoomLevel;
