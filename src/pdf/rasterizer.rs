use std::path::Path;

use pdfium_render::prelude::*;

use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

pub trait PageRasterizer {
    type Document;

    fn parse(&self, bytes: &[u8]) -> Result<Self::Document, RenderError>;

    fn page_count(&self, document: &Self::Document) -> usize;

    fn page_size(&self, document: &Self::Document, page: usize) -> Result<PageSize, RenderError>;

    /// Returns `width * height` RGBA pixels.
    fn rasterize(
        &self,
        document: &Self::Document,
        page: usize,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError>;
}

pub struct PdfiumRasterizer {
    pdfium: &'static Pdfium,
}

impl PdfiumRasterizer {
    /// Binds Pdfium from `library_dir` when given, otherwise from the system.
    pub fn bind(library_dir: Option<&Path>) -> Result<Self, RenderError> {
        let bindings = match library_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|err| RenderError::Unavailable(err.to_string()))?;

        log::info!("Pdfium bound for PDF rendering");
        let pdfium: &'static Pdfium = Box::leak(Box::new(Pdfium::new(bindings)));
        Ok(Self { pdfium })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    type Document = PdfDocument<'static>;

    fn parse(&self, bytes: &[u8]) -> Result<Self::Document, RenderError> {
        self.pdfium
            .load_pdf_from_byte_vec(bytes.to_vec(), None)
            .map_err(|err| RenderError::Parse(err.to_string()))
    }

    fn page_count(&self, document: &Self::Document) -> usize {
        document.pages().len() as usize
    }

    fn page_size(&self, document: &Self::Document, page: usize) -> Result<PageSize, RenderError> {
        let pdf_page = document
            .pages()
            .get(page_index(page)?)
            .map_err(|err| page_error(page, err))?;
        Ok(PageSize {
            width: pdf_page.width().value,
            height: pdf_page.height().value,
        })
    }

    fn rasterize(
        &self,
        document: &Self::Document,
        page: usize,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let pdf_page = document
            .pages()
            .get(page_index(page)?)
            .map_err(|err| page_error(page, err))?;
        let config = PdfRenderConfig::new().set_target_size(width as Pixels, height as Pixels);

        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|err| RenderError::Rasterize {
                page,
                reason: err.to_string(),
            })?;

        let rgba = bitmap.as_rgba_bytes();
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(RenderError::Rasterize {
                page,
                reason: format!("bitmap has {} bytes, expected {expected}", rgba.len()),
            });
        }
        Ok(rgba)
    }
}

fn page_index(page: usize) -> Result<PdfPageIndex, RenderError> {
    PdfPageIndex::try_from(page).map_err(|_| RenderError::Page {
        page,
        reason: "page index out of range".to_string(),
    })
}

fn page_error(page: usize, err: PdfiumError) -> RenderError {
    RenderError::Page {
        page,
        reason: err.to_string(),
    }
}
