//! Overlay transform state and the geometry that maps it into capture space.

/// Crop, contain-fit and preview-to-capture mapping.
pub mod geometry;
/// Pointer and zoom state machine.
pub mod tracker;
