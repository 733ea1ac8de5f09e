use crate::{
    config::LayoutConfig,
    foundation::{
        core::{Canvas, Rect},
        error::{BoothError, BoothResult},
    },
};

/// Geometry of a vertical strip of equally sized photos.
///
/// `width = photo_w + 2·padding`,
/// `height = header + n·photo_h + (n − 1)·gap + footer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripLayout {
    /// Size of each photo.
    pub photo: Canvas,
    /// Margin metrics.
    pub metrics: LayoutConfig,
}

impl StripLayout {
    /// Layout for photos of size `photo`.
    pub fn new(photo: Canvas, metrics: LayoutConfig) -> Self {
        Self { photo, metrics }
    }

    /// Strip width in pixels.
    pub fn width(&self) -> u32 {
        self.photo.width + 2 * self.metrics.padding
    }

    /// Strip height for `n` photos.
    pub fn height(&self, n: usize) -> u32 {
        let n = n as u32;
        let m = &self.metrics;
        m.header_height + n * self.photo.height + n.saturating_sub(1) * m.gap + m.footer_height
    }

    /// Strip canvas for `n` photos; `n` must be at least one.
    pub fn canvas(&self, n: usize) -> BoothResult<Canvas> {
        if n == 0 {
            return Err(BoothError::validation("a strip needs at least one frame"));
        }
        Canvas::new(self.width(), self.height(n))
    }

    /// Top edge of photo `i`.
    pub fn photo_y(&self, i: usize) -> u32 {
        self.metrics.header_height + i as u32 * (self.photo.height + self.metrics.gap)
    }

    /// Area covered by photo `i`.
    pub fn photo_rect(&self, i: usize) -> Rect {
        let x = f64::from(self.metrics.padding);
        let y = f64::from(self.photo_y(i));
        Rect::new(
            x,
            y,
            x + f64::from(self.photo.width),
            y + f64::from(self.photo.height),
        )
    }

    /// Drop shadow behind photo `i`, offset down and right.
    pub fn shadow_rect(&self, i: usize) -> Rect {
        let off = f64::from(self.metrics.shadow_offset);
        self.photo_rect(i) + kurbo::Vec2::new(off, off)
    }
}

impl Default for StripLayout {
    fn default() -> Self {
        Self::new(
            Canvas {
                width: 640,
                height: 480,
            },
            LayoutConfig::default(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip/layout.rs"]
mod tests;
