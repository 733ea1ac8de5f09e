//! Shaped decoration text.
//!
//! Text is laid out with `parley` from caller-supplied font bytes and rendered as `vello_cpu`
//! glyph runs (see [`Surface::fill_text`](crate::render::surface::Surface::fill_text)). No system
//! fonts are consulted, so the same bytes always produce the same pixels.

use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Point, Rgba8},
        error::{BoothError, BoothResult},
    },
    render::glyphs::{TextAlign, TextStyle},
};

/// RGBA8 brush carried through `parley` layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A font file used for decoration text.
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    family: String,
    data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl PartialEq for FontFace {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes) || self.bytes == other.bytes
    }
}

impl FontFace {
    /// Parse TrueType/OpenType bytes. Fails if no font family can be read from them.
    pub fn from_bytes(bytes: Vec<u8>) -> BoothResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            BoothError::validation("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BoothError::validation("registered font family has no name"))?
            .to_string();

        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes: Arc::new(bytes),
            family,
            data,
        })
    }

    /// Read and parse a font file.
    pub fn load(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Family name found in the font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

/// Stateful helper for building `parley` layouts from a [`FontFace`].
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Fresh `parley` contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape a single line of `text` in `font` at `style.size` pixels.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font: &FontFace,
        style: TextStyle,
        brush: TextBrush,
    ) -> BoothResult<parley::Layout<TextBrush>> {
        let size_px = style.size as f32;
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BoothError::validation("text size must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let mut family_name = font.family().to_string();
        if let Some((id, _)) = families.first()
            && let Some(name) = self.font_ctx.collection.family_name(*id)
        {
            family_name = name.to_string();
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if style.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Top-left corner at which to draw `layout` so its first baseline passes through `anchor`,
/// horizontally anchored per `align`.
pub fn layout_origin(
    layout: &parley::Layout<TextBrush>,
    anchor: Point,
    align: TextAlign,
) -> Point {
    let baseline = layout
        .lines()
        .next()
        .map(|line| f64::from(line.metrics().baseline))
        .unwrap_or(0.0);
    let x = match align {
        TextAlign::Start => anchor.x,
        TextAlign::Center => anchor.x - f64::from(layout.width()) / 2.0,
    };
    Point::new(x, anchor.y - baseline)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
