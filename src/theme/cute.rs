use crate::{
    color::Rgb8,
    foundation::{core::Point, error::BoothResult},
    render::{glyphs::TextStyle, surface::Surface},
    theme::{DecorationContext, ThemeDecorator, draw_stroked, draw_text},
};

const ROSE: Rgb8 = Rgb8::new(0xe1, 0x1d, 0x48);
const LIGHT_PINK: Rgb8 = Rgb8::new(0xfd, 0xa4, 0xaf);

/// Hearts in the top-left and bottom-right corners plus `SWEET MEMORY` in the footer.
#[derive(Clone, Copy, Debug, Default)]
pub struct CuteDecorator;

impl ThemeDecorator for CuteDecorator {
    fn decorate(
        &self,
        surface: &mut Surface,
        background: Rgb8,
        ctx: &DecorationContext,
    ) -> BoothResult<()> {
        let ink = ctx.rules.ink_over_dark(background, ROSE, LIGHT_PINK);
        let w = f64::from(surface.width());
        let h = f64::from(surface.height());

        let heart = TextStyle::new(30.0);
        // Hearts always use the built-in outline.
        draw_stroked(surface, "♥", Point::new(30.0, 40.0), heart, ink)?;
        draw_stroked(surface, "♥", Point::new(w - 40.0, h - 40.0), heart, ink)?;

        draw_text(
            surface,
            ctx,
            "SWEET MEMORY",
            Point::new(w / 2.0, h - 35.0),
            TextStyle::new(28.0).bold().centered(),
            ink,
        )
    }
}
