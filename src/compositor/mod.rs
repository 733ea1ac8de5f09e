//! Single-still capture: crop, mirror and overlay.

/// The compositor itself.
pub mod capture;
/// Captured frames and the video source interface.
pub mod frame;
