//! Strip themes: decorations drawn into the margins and per-photo finishing passes.

mod cute;
mod film;
mod simple;

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::{
    color::{ColorRules, Rgb8},
    foundation::{
        core::{Point, Rect},
        error::{BoothError, BoothResult},
    },
    render::{
        blend::BlendPass,
        glyphs::{TextStyle, text_path},
        surface::Surface,
        text::{FontFace, TextLayoutEngine, layout_origin},
    },
};

pub use cute::CuteDecorator;
pub use film::FilmDecorator;
pub use simple::SimpleDecorator;

/// Selectable strip theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Title and date in the footer.
    #[default]
    Simple,
    /// Hearts in opposite corners and a playful title.
    Cute,
    /// Sprocket holes down both sides, a date stamp and a warm tint over every photo.
    Film,
}

impl Theme {
    /// Every theme, in display order.
    pub const ALL: [Theme; 3] = [Theme::Simple, Theme::Cute, Theme::Film];

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Theme::Simple => "simple",
            Theme::Cute => "cute",
            Theme::Film => "film",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Simple => "Minimal",
            Theme::Cute => "Cute",
            Theme::Film => "Film",
        }
    }

    /// Decorator implementing this theme.
    pub fn decorator(self) -> &'static dyn ThemeDecorator {
        match self {
            Theme::Simple => &SimpleDecorator,
            Theme::Cute => &CuteDecorator,
            Theme::Film => &FilmDecorator,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Theme {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                BoothError::validation(format!(
                    "unknown theme '{s}' (expected one of: simple, cute, film)"
                ))
            })
    }
}

/// Inputs a decorator may read besides the surface and background.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorationContext {
    /// Date printed by themes that stamp one.
    pub date: NaiveDate,
    /// Ink selection rules.
    pub rules: ColorRules,
    /// Font for titles and dates. `None` falls back to the built-in stroke font.
    pub font: Option<FontFace>,
}

impl DecorationContext {
    /// Context stamping `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            rules: ColorRules::default(),
            font: None,
        }
    }

    /// Draw text in `font`.
    pub fn with_font(mut self, font: FontFace) -> Self {
        self.font = Some(font);
        self
    }

    /// Context stamping today's local date.
    pub fn today() -> Self {
        Self::on(chrono::Local::now().date_naive())
    }
}

impl Default for DecorationContext {
    fn default() -> Self {
        Self::today()
    }
}

/// Draws a theme's decorations.
///
/// `decorate` must only touch the header, footer and side margins; photos are drawn on top
/// afterwards. `photo_passes` lists the blend passes to run over each photo once it is drawn.
pub trait ThemeDecorator: Send + Sync {
    /// Paint decorations onto `surface`, which is already filled with `background`.
    fn decorate(
        &self,
        surface: &mut Surface,
        background: Rgb8,
        ctx: &DecorationContext,
    ) -> BoothResult<()>;

    /// Finishing passes for the photo occupying `photo`.
    fn photo_passes(&self, photo: Rect) -> Vec<BlendPass> {
        let _ = photo;
        Vec::new()
    }
}

/// Draw `text` with its baseline through `origin`, in the context font when one is set.
pub(crate) fn draw_text(
    surface: &mut Surface,
    ctx: &DecorationContext,
    text: &str,
    origin: Point,
    style: TextStyle,
    ink: Rgb8,
) -> BoothResult<()> {
    let Some(font) = &ctx.font else {
        return draw_stroked(surface, text, origin, style, ink);
    };
    let mut engine = TextLayoutEngine::new();
    let layout = engine.layout_plain(text, font, style, ink.to_rgba8().into())?;
    surface.fill_text(&layout, font, layout_origin(&layout, origin, style.align))
}

pub(crate) fn draw_stroked(
    surface: &mut Surface,
    text: &str,
    origin: Point,
    style: TextStyle,
    ink: Rgb8,
) -> BoothResult<()> {
    surface.fill_path(&text_path(text, origin, style), ink.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/theme/mod.rs"]
mod tests;
