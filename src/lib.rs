//! Photostrip is a photo-booth compositing engine.
//!
//! The pipeline has three stages:
//!
//! - Capture: a [`FrameCompositor`] crops a live [`VideoFrameSource`] to 4:3, mirrors it and
//!   draws a user overlay through the [`OverlayTransform`] produced by a [`TransformTracker`].
//! - Session: a [`CaptureSession`] runs the countdown and collects [`Frame`]s.
//! - Assembly: a [`StripAssembler`] decodes the frames in parallel, lays them out on a themed
//!   background and exports the [`Strip`] as PNG.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod assets;
pub mod color;
pub mod compositor;
pub mod config;
pub mod render;
pub mod session;
pub mod strip;
pub mod theme;
pub mod transform;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{BoothError, BoothResult};

pub use crate::assets::overlay::OverlayImage;
pub use crate::color::{ColorRules, DEFAULT_PALETTE, Rgb8};
pub use crate::compositor::capture::FrameCompositor;
pub use crate::compositor::frame::{Frame, VideoFrameSource};
pub use crate::config::BoothConfig;
pub use crate::render::blend::{BlendMode, BlendPass};
pub use crate::session::{CaptureSession, Countdown, TickOutcome};
pub use crate::strip::assembler::{AssemblyGeneration, AssemblyJob, Strip, StripAssembler};
pub use crate::strip::barrier::CompletionBarrier;
pub use crate::strip::layout::StripLayout;
pub use crate::theme::{DecorationContext, Theme, ThemeDecorator};
pub use crate::transform::tracker::{DragSession, OverlayTransform, TransformTracker};
