use crate::{
    color::Rgb8,
    foundation::{core::Point, error::BoothResult},
    render::{glyphs::TextStyle, surface::Surface},
    theme::{DecorationContext, ThemeDecorator, draw_text},
};

/// Centred `PHOTO BOOTH` title over a short date line.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleDecorator;

impl ThemeDecorator for SimpleDecorator {
    fn decorate(
        &self,
        surface: &mut Surface,
        background: Rgb8,
        ctx: &DecorationContext,
    ) -> BoothResult<()> {
        let ink = ctx.rules.ink_over_dark(background, Rgb8::BLACK, Rgb8::WHITE);
        let cx = f64::from(surface.width()) / 2.0;
        let h = f64::from(surface.height());

        draw_text(
            surface,
            ctx,
            "PHOTO BOOTH",
            Point::new(cx, h - 30.0),
            TextStyle::new(24.0).bold().centered(),
            ink,
        )?;
        let date = ctx.date.format("%-m/%-d/%Y").to_string();
        draw_text(
            surface,
            ctx,
            &date,
            Point::new(cx, h - 12.0),
            TextStyle::new(14.0).centered(),
            ink,
        )
    }
}
