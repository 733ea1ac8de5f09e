use std::{borrow::Cow, sync::Arc};

use anyhow::anyhow;
use image::RgbaImage;

use crate::{
    assets::decode::{decode_image, encode_png},
    foundation::{core::Canvas, error::BoothResult},
};

/// One captured still, held as lossless PNG bytes.
///
/// Frames are immutable; cloning shares the encoded bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    canvas: Canvas,
    png: Arc<[u8]>,
}

impl Frame {
    /// Encode a straight-alpha bitmap.
    pub fn from_rgba(img: &RgbaImage) -> BoothResult<Self> {
        let canvas = Canvas::new(img.width(), img.height())?;
        Ok(Self {
            canvas,
            png: encode_png(img)?.into(),
        })
    }

    /// Wrap already encoded bytes without decoding them.
    ///
    /// The bytes are only checked when the frame is decoded during assembly.
    pub fn from_encoded(bytes: impl Into<Arc<[u8]>>, canvas: Canvas) -> Self {
        Self {
            canvas,
            png: bytes.into(),
        }
    }

    /// Declared dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Encoded bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Decode back to pixels, checking the declared dimensions.
    pub fn decode(&self) -> BoothResult<RgbaImage> {
        let img = decode_image(&self.png)?;
        if img.dimensions() != (self.canvas.width, self.canvas.height) {
            return Err(anyhow!(
                "decoded {}x{}, expected {}x{}",
                img.width(),
                img.height(),
                self.canvas.width,
                self.canvas.height
            )
            .into());
        }
        Ok(img)
    }
}

/// A live video feed that can be sampled for stills.
pub trait VideoFrameSource {
    /// Native resolution. Either side is zero while the stream is still starting.
    fn native_size(&self) -> (u32, u32);

    /// The frame currently on screen, at native resolution.
    fn current_frame(&self) -> BoothResult<Cow<'_, RgbaImage>>;
}

impl VideoFrameSource for RgbaImage {
    fn native_size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn current_frame(&self) -> BoothResult<Cow<'_, RgbaImage>> {
        Ok(Cow::Borrowed(self))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/frame.rs"]
mod tests;
