use std::sync::Arc;

use image::RgbaImage;

use crate::{
    assets::decode::decode_image,
    foundation::{
        core::Canvas,
        error::{BoothError, BoothResult},
    },
};

/// Decoded foreground image composited over each capture.
///
/// Cloning shares the pixels; the bitmap is never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayImage {
    image: Arc<RgbaImage>,
}

impl OverlayImage {
    /// Wrap an already decoded straight-alpha bitmap.
    pub fn from_rgba(image: RgbaImage) -> BoothResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(BoothError::OverlayDecode(format!(
                "overlay has empty dimensions {}x{}",
                image.width(),
                image.height()
            )));
        }
        Ok(Self {
            image: Arc::new(image),
        })
    }

    /// Decode encoded bytes (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> BoothResult<Self> {
        let image = decode_image(bytes).map_err(|e| BoothError::OverlayDecode(e.to_string()))?;
        Self::from_rgba(image)
    }

    /// Native pixel size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Straight-alpha pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/overlay.rs"]
mod tests;
