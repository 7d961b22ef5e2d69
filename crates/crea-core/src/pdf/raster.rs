use crate::error::CreaError;

/// A decoded raster image, flattened to 8-bit RGB on a white background.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

impl RasterImage {
    /// Decode PNG/JPEG/... bytes.
    pub fn decode(bytes: &[u8]) -> Result<RasterImage, CreaError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| CreaError::Render(format!("failed to decode image: {e}")))?;
        let rgba = img.to_rgba8();
        let (width_px, height_px) = rgba.dimensions();
        if width_px == 0 || height_px == 0 {
            return Err(CreaError::Render("image has zero size".into()));
        }

        let mut rgb = Vec::with_capacity(rgb_len(width_px, height_px));
        for px in rgba.pixels() {
            let [r, g, b, a] = px.0;
            let a = a as u16;
            for c in [r, g, b] {
                rgb.push(((c as u16 * a + 255 * (255 - a)) / 255) as u8);
            }
        }

        Ok(RasterImage {
            width_px,
            height_px,
            rgb,
        })
    }

}

fn rgb_len(width_px: u32, height_px: u32) -> usize {
    width_px as usize * height_px as usize * 3
}
