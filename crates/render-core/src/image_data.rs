use crate::error::RenderError;

/// A decoded raster image ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Packed 8-bit RGB samples, row-major.
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples when the source had transparency.
    pub alpha: Option<Vec<u8>>,
}

impl ImageData {
    /// Decodes PNG or JPEG bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, RenderError> {
        let decoded = image::load_from_memory(bytes)?;
        let width = decoded.width();
        let height = decoded.height();
        if width == 0 || height == 0 {
            return Err(RenderError::Image("image has no pixels".to_string()));
        }

        let alpha = if decoded.color().has_alpha() {
            let rgba = decoded.to_rgba8();
            Some(rgba.pixels().map(|p| p.0[3]).collect())
        } else {
            None
        };
        let rgb = decoded.to_rgb8().into_raw();
        log::debug!("decoded {}x{} image (alpha: {})", width, height, alpha.is_some());
        Ok(Self { width, height, rgb, alpha })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
