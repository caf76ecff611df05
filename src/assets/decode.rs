use std::sync::Arc;

use crate::foundation::error::{LaminaError, LaminaResult};

#[derive(Clone, Debug)]
/// Decoded raster pixels.
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_bitmap(bytes: &[u8]) -> LaminaResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| LaminaError::load(format!("decode image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Bitmap {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
