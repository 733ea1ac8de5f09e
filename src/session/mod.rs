//! The capture session: countdown, frame list, overlay and strip result.

mod countdown;

use std::sync::Arc;

use crate::{
    assets::overlay::OverlayImage,
    color::Rgb8,
    compositor::{
        capture::FrameCompositor,
        frame::{Frame, VideoFrameSource},
    },
    config::BoothConfig,
    foundation::error::{BoothError, BoothResult},
    strip::assembler::{AssemblyGeneration, AssemblyJob, Strip, StripAssembler},
    theme::{DecorationContext, Theme},
    transform::tracker::{OverlayTransform, TransformTracker},
};

pub use countdown::{Countdown, TickOutcome};

#[derive(Clone, Debug)]
struct CachedStrip {
    theme: Theme,
    background: Rgb8,
    frames_version: u64,
    strip: Arc<Strip>,
}

/// Owns everything a photo-booth run mutates.
///
/// The session is driven from one control thread: pointer input moves the overlay, a repeating
/// one-second [`tick`](Self::tick) runs the countdown and captures, and [`strip`](Self::strip)
/// assembles the result once frames exist.
#[derive(Debug)]
pub struct CaptureSession {
    config: BoothConfig,
    compositor: FrameCompositor,
    assembler: StripAssembler,
    generation: AssemblyGeneration,
    tracker: TransformTracker,
    overlay: Option<OverlayImage>,
    frames: Vec<Frame>,
    frames_version: u64,
    countdown: Option<Countdown>,
    ready_signalled: bool,
    cached: Option<CachedStrip>,
}

impl CaptureSession {
    /// New empty session.
    pub fn new(config: BoothConfig) -> BoothResult<Self> {
        config.validate()?;
        let generation = AssemblyGeneration::new();
        let assembler = StripAssembler::new(&config)?.with_generation(generation.clone());
        Ok(Self {
            compositor: FrameCompositor::new(config.capture.canvas()?),
            tracker: TransformTracker::new(config.scale),
            assembler,
            generation,
            overlay: None,
            frames: Vec::with_capacity(config.capture.target_frames),
            frames_version: 0,
            countdown: None,
            ready_signalled: false,
            cached: None,
            config,
        })
    }

    /// Pin the date and ink rules used when decorating strips.
    pub fn with_decoration(mut self, ctx: DecorationContext) -> Self {
        self.assembler = self.assembler.with_decoration(ctx);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &BoothConfig {
        &self.config
    }

    /// Captured frames in capture order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frames per strip.
    pub fn target_frames(&self) -> usize {
        self.config.capture.target_frames
    }

    /// `true` once the frame list holds the target count.
    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.target_frames()
    }

    /// `true` when a countdown may be started.
    pub fn can_shoot(&self) -> bool {
        !self.is_full() && self.countdown.is_none()
    }

    /// Remaining countdown seconds, if one is armed.
    pub fn countdown(&self) -> Option<u32> {
        self.countdown.map(|c| c.remaining())
    }

    /// Live overlay transform.
    pub fn transform(&self) -> OverlayTransform {
        self.tracker.transform()
    }

    /// Overlay transform state machine.
    pub fn tracker(&self) -> &TransformTracker {
        &self.tracker
    }

    /// Current overlay.
    pub fn overlay(&self) -> Option<&OverlayImage> {
        self.overlay.as_ref()
    }

    /// Shared generation counter; bumped by [`reset`](Self::reset) and every assembly.
    pub fn generation(&self) -> &AssemblyGeneration {
        &self.generation
    }

    /// Drop frames, countdown, overlay and transform, and invalidate in-flight assemblies.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.frames_version += 1;
        self.countdown = None;
        self.overlay = None;
        self.tracker.reset();
        self.ready_signalled = false;
        self.cached = None;
        self.assembler.invalidate();
        tracing::debug!("session reset");
    }

    /// Arm the countdown with the configured length.
    pub fn start_countdown(&mut self) -> BoothResult<()> {
        self.start_countdown_secs(self.config.capture.countdown_secs)
    }

    /// Arm a countdown of `seconds` ticks.
    pub fn start_countdown_secs(&mut self, seconds: u32) -> BoothResult<()> {
        if self.is_full() {
            return Err(BoothError::capture(format!(
                "frame list is full ({}/{})",
                self.frames.len(),
                self.target_frames()
            )));
        }
        if self.countdown.is_some() {
            return Err(BoothError::capture("countdown already running"));
        }
        self.countdown = Some(Countdown::new(seconds)?);
        tracing::debug!(seconds, "countdown started");
        Ok(())
    }

    /// Advance the countdown by one second, capturing from `source` when it reaches zero.
    ///
    /// A source that is not ready leaves the countdown armed at zero; the error is returned and
    /// the next tick tries again.
    ///
    /// The overlay pan is interpreted against the width last passed to
    /// [`resize_preview`](Self::resize_preview). Without one, the preview is assumed to be as wide
    /// as the capture target, and a warning is logged if the overlay has been moved.
    pub fn tick<S>(&mut self, source: &S) -> BoothResult<TickOutcome>
    where
        S: VideoFrameSource + ?Sized,
    {
        let Some(countdown) = self.countdown.as_mut() else {
            return Ok(TickOutcome::Idle);
        };
        let remaining = countdown.tick();
        tracing::debug!(remaining, "countdown tick");
        if remaining > 0 {
            return Ok(TickOutcome::Counting { remaining });
        }

        let frame = self.compositor.capture(
            source,
            self.overlay.as_ref(),
            self.tracker.transform(),
            self.preview_width(),
        )?;
        self.countdown = None;
        self.frames.push(frame);
        self.frames_version += 1;

        let index = self.frames.len() - 1;
        let ready_to_assemble = self.is_full() && !self.ready_signalled;
        if ready_to_assemble {
            self.ready_signalled = true;
        }
        tracing::debug!(index, ready_to_assemble, "frame captured");
        Ok(TickOutcome::Captured {
            index,
            ready_to_assemble,
        })
    }

    /// Replace the overlay; the transform returns to identity.
    pub fn set_overlay(&mut self, overlay: OverlayImage) {
        self.overlay = Some(overlay);
        self.tracker.reset();
    }

    /// Decode and install an overlay.
    pub fn load_overlay(&mut self, bytes: &[u8]) -> BoothResult<()> {
        let overlay = OverlayImage::decode(bytes)?;
        self.set_overlay(overlay);
        Ok(())
    }

    /// Remove the overlay.
    pub fn clear_overlay(&mut self) {
        self.overlay = None;
        self.tracker.reset();
    }

    /// Pointer pressed over the preview. Returns `true` if a drag started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.tracker.begin(x, y, self.overlay.is_some())
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.tracker.update(x, y);
    }

    /// Pointer released or left the preview.
    pub fn pointer_up(&mut self) {
        self.tracker.end();
    }

    /// Set the overlay zoom (clamped).
    pub fn set_scale(&mut self, value: f64) {
        self.tracker.set_scale(value);
    }

    /// Step the overlay zoom.
    pub fn zoom_by(&mut self, steps: f64) {
        self.tracker.zoom_by(steps);
    }

    /// The preview container changed width.
    pub fn resize_preview(&mut self, width: f64) -> BoothResult<()> {
        self.tracker.resize_preview(width)
    }

    /// Prepare an assembly of the current frames without running it.
    pub fn prepare_strip(&self, theme: Theme, background: Rgb8) -> BoothResult<AssemblyJob> {
        self.assembler.prepare(theme, background, &self.frames)
    }

    /// Assembled strip for `theme` and `background`, rebuilt only when an input changed.
    pub fn strip(&mut self, theme: Theme, background: Rgb8) -> BoothResult<Arc<Strip>> {
        if let Some(c) = &self.cached
            && c.theme == theme
            && c.background == background
            && c.frames_version == self.frames_version
        {
            return Ok(Arc::clone(&c.strip));
        }
        let strip = Arc::new(self.prepare_strip(theme, background)?.run()?);
        self.cached = Some(CachedStrip {
            theme,
            background,
            frames_version: self.frames_version,
            strip: Arc::clone(&strip),
        });
        Ok(strip)
    }

    fn preview_width(&self) -> f64 {
        if let Some(width) = self.tracker.preview_width() {
            return width;
        }
        let assumed = f64::from(self.compositor.target().width);
        if self.overlay.is_some() && self.tracker.transform() != OverlayTransform::IDENTITY {
            tracing::warn!(
                assumed_width = assumed,
                "overlay moved without a recorded preview width, assuming the capture width"
            );
        }
        assumed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/mod.rs"]
mod tests;
