use std::io::Cursor;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{BoothError, BoothResult};

/// Decode any format `image` understands into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> BoothResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Lossless PNG encoding of a straight-alpha image.
pub fn encode_png(img: &RgbaImage) -> BoothResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| BoothError::encode(format!("png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
