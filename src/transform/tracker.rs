use crate::{
    config::ScaleConfig,
    foundation::error::{BoothError, BoothResult},
};

/// Pan and zoom of the overlay, in preview pixels relative to the overlay centre.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayTransform {
    /// Horizontal pan in preview pixels.
    pub translate_x: f64,
    /// Vertical pan in preview pixels.
    pub translate_y: f64,
    /// Uniform zoom about the capture centre.
    pub scale: f64,
}

impl OverlayTransform {
    /// No pan, unit zoom.
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An in-progress drag: where the pointer went down and the transform at that moment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Pointer x at pointer-down.
    pub anchor_x: f64,
    /// Pointer y at pointer-down.
    pub anchor_y: f64,
    /// Transform when the drag began.
    pub transform_at_start: OverlayTransform,
}

/// Turns pointer and zoom input into an [`OverlayTransform`].
///
/// Moves are always resolved against the drag anchor, never accumulated, so the live transform
/// is `start + (pointer - anchor)` for whatever sequence of moves came before.
#[derive(Clone, Debug)]
pub struct TransformTracker {
    transform: OverlayTransform,
    drag: Option<DragSession>,
    preview_width: Option<f64>,
    limits: ScaleConfig,
}

impl Default for TransformTracker {
    fn default() -> Self {
        Self::new(ScaleConfig::default())
    }
}

impl TransformTracker {
    /// Identity transform with the given zoom limits.
    pub fn new(limits: ScaleConfig) -> Self {
        Self {
            transform: OverlayTransform::IDENTITY,
            drag: None,
            preview_width: None,
            limits,
        }
    }

    /// Current transform snapshot.
    pub fn transform(&self) -> OverlayTransform {
        self.transform
    }

    /// Active drag, if any.
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Last preview container width recorded with [`resize_preview`](Self::resize_preview).
    pub fn preview_width(&self) -> Option<f64> {
        self.preview_width
    }

    /// Start a drag at `(x, y)`. Returns `false` and does nothing without an overlay.
    pub fn begin(&mut self, x: f64, y: f64, overlay_present: bool) -> bool {
        if !overlay_present {
            return false;
        }
        self.drag = Some(DragSession {
            anchor_x: x,
            anchor_y: y,
            transform_at_start: self.transform,
        });
        true
    }

    /// Move the pointer during a drag; ignored otherwise.
    pub fn update(&mut self, x: f64, y: f64) {
        let Some(drag) = self.drag else {
            return;
        };
        let start = drag.transform_at_start;
        self.transform = OverlayTransform {
            translate_x: start.translate_x + (x - drag.anchor_x),
            translate_y: start.translate_y + (y - drag.anchor_y),
            scale: start.scale,
        };
    }

    /// Finish the drag. Safe to call without one.
    pub fn end(&mut self) {
        self.drag = None;
    }

    /// Set the zoom, clamped to the configured limits. Non-finite values are ignored.
    pub fn set_scale(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.transform.scale = value.clamp(self.limits.min, self.limits.max);
    }

    /// Step the zoom by `steps` increments of the configured step size.
    pub fn zoom_by(&mut self, steps: f64) {
        let next = self.transform.scale + steps * self.limits.step;
        // Snap to the step grid; repeated float steps drift otherwise.
        let snapped = (next / self.limits.step).round() * self.limits.step;
        self.set_scale(snapped);
    }

    /// Back to identity; drops any drag.
    pub fn reset(&mut self) {
        self.transform = OverlayTransform::IDENTITY;
        self.drag = None;
    }

    /// Record a new preview container width.
    ///
    /// When a previous width is known the translation is rescaled by `new / old`, keeping the
    /// overlay at the same relative position in the preview. An active drag is rebased so the
    /// pointer, which does not move with the resize, keeps steering from the rescaled position.
    pub fn resize_preview(&mut self, width: f64) -> BoothResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(BoothError::validation(format!(
                "preview width must be finite and > 0, got {width}"
            )));
        }
        if let Some(old) = self.preview_width {
            let k = width / old;
            let before = self.transform;
            self.transform.translate_x *= k;
            self.transform.translate_y *= k;
            if let Some(drag) = self.drag.as_mut() {
                // `start + (pointer - anchor)` must land on the rescaled live transform.
                let start = &mut drag.transform_at_start;
                start.translate_x =
                    self.transform.translate_x - (before.translate_x - start.translate_x);
                start.translate_y =
                    self.transform.translate_y - (before.translate_y - start.translate_y);
            }
        }
        self.preview_width = Some(width);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/tracker.rs"]
mod tests;
