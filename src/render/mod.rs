//! CPU raster primitives shared by capture and strip assembly.

/// Solid-colour blend passes.
pub mod blend;
pub mod glyphs;
/// Premultiplied RGBA8 surface.
pub mod surface;
pub mod text;
