use iced::widget::image::Handle;

#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

impl DecodedImage {
    pub fn display_size(&self, scale: f32) -> (f32, f32) {
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}

pub struct ImagePipeline;

impl ImagePipeline {
    pub fn decode(bytes: &[u8]) -> Result<DecodedImage, String> {
        let image = image::load_from_memory(bytes)
            .map_err(|err| format!("Failed to decode image: {err}"))?;

        let rgba = image.into_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(String::from("Image has no pixels"));
        }

        Ok(DecodedImage {
            width,
            height,
            handle: Handle::from_rgba(width, height, rgba.into_raw()),
        })
    }

    pub fn page_handle(width: u32, height: u32, rgba: Vec<u8>) -> Result<Handle, String> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(format!(
                "RGBA buffer length {} does not match {width}x{height}",
                rgba.len()
            ));
        }
        Ok(Handle::from_rgba(width, height, rgba))
    }
}
