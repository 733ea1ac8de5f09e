//! Image decoding and the overlay bitmap.

/// Encode and decode helpers over the `image` crate.
pub mod decode;
/// The user-supplied foreground image.
pub mod overlay;
