use image::{RgbaImage, imageops};

use crate::{
    assets::overlay::OverlayImage,
    compositor::frame::{Frame, VideoFrameSource},
    foundation::{
        core::{Canvas, Rect},
        error::{BoothError, BoothResult},
    },
    render::surface::Surface,
    transform::{
        geometry::{center_crop, overlay_affine},
        tracker::OverlayTransform,
    },
};

/// Renders mirrored, overlay-composited stills at a fixed capture resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCompositor {
    target: Canvas,
}

impl Default for FrameCompositor {
    fn default() -> Self {
        Self {
            target: Canvas {
                width: 640,
                height: 480,
            },
        }
    }
}

impl FrameCompositor {
    /// Compositor producing stills of `target` size.
    pub fn new(target: Canvas) -> Self {
        Self { target }
    }

    /// Output dimensions.
    pub fn target(&self) -> Canvas {
        self.target
    }

    /// Capture one still from `source`.
    ///
    /// The source is centre-cropped to the target aspect and mirrored horizontally. When an
    /// overlay is given it is contain-fit into the target and drawn through `transform`, whose
    /// translation is in preview pixels of a container `preview_width` wide.
    #[tracing::instrument(level = "debug", skip(self, source, overlay), fields(overlay = overlay.is_some()))]
    pub fn capture<S>(
        &self,
        source: &S,
        overlay: Option<&OverlayImage>,
        transform: OverlayTransform,
        preview_width: f64,
    ) -> BoothResult<Frame>
    where
        S: VideoFrameSource + ?Sized,
    {
        let img = self.compose(source, overlay, transform, preview_width)?;
        Frame::from_rgba(&img)
    }

    /// Same as [`capture`](Self::capture) but returns the raw bitmap.
    pub fn compose<S>(
        &self,
        source: &S,
        overlay: Option<&OverlayImage>,
        transform: OverlayTransform,
        preview_width: f64,
    ) -> BoothResult<RgbaImage>
    where
        S: VideoFrameSource + ?Sized,
    {
        check_preview_width(preview_width)?;
        let (width, height) = source.native_size();
        if width == 0 || height == 0 {
            return Err(BoothError::SourceNotReady { width, height });
        }
        let still = source.current_frame()?;
        let (width, height) = still.dimensions();
        if width == 0 || height == 0 {
            return Err(BoothError::SourceNotReady { width, height });
        }

        let mirrored = self.mirrored_crop(&still, Canvas { width, height });
        let mut surface = Surface::from_rgba_image(&mirrored)?;

        if let Some(overlay) = overlay {
            let affine = overlay_affine(transform, self.target, preview_width, overlay.canvas());
            surface.draw_image(overlay.image(), affine)?;
        }
        surface.to_rgba_image()
    }

    /// Bounding box of an `overlay_w`×`overlay_h` overlay in capture space.
    pub fn overlay_bounds(
        &self,
        overlay_w: u32,
        overlay_h: u32,
        transform: OverlayTransform,
        preview_width: f64,
    ) -> BoothResult<Rect> {
        check_preview_width(preview_width)?;
        let image = Canvas::new(overlay_w, overlay_h)?;
        let affine = overlay_affine(transform, self.target, preview_width, image);
        Ok(affine.transform_rect_bbox(image.rect()))
    }

    fn mirrored_crop(&self, still: &RgbaImage, native: Canvas) -> RgbaImage {
        let crop = center_crop(native, self.target);
        let x = crop.x0.round() as u32;
        let y = crop.y0.round() as u32;
        let w = (crop.width().round() as u32).min(native.width - x).max(1);
        let h = (crop.height().round() as u32).min(native.height - y).max(1);

        let cropped = imageops::crop_imm(still, x, y, w, h).to_image();
        let fitted = if (w, h) == (self.target.width, self.target.height) {
            cropped
        } else {
            imageops::resize(
                &cropped,
                self.target.width,
                self.target.height,
                imageops::FilterType::Triangle,
            )
        };
        imageops::flip_horizontal(&fitted)
    }
}

fn check_preview_width(preview_width: f64) -> BoothResult<()> {
    if !preview_width.is_finite() || preview_width <= 0.0 {
        return Err(BoothError::validation(format!(
            "preview width must be finite and > 0, got {preview_width}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/capture.rs"]
mod tests;
