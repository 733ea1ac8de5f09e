use crate::{
    color::Rgb8,
    foundation::{
        core::{Point, Rect, Rgba8},
        error::BoothResult,
    },
    render::{
        blend::{BlendMode, BlendPass},
        glyphs::TextStyle,
        surface::Surface,
    },
    theme::{DecorationContext, ThemeDecorator, draw_text},
};

const AMBER: Rgb8 = Rgb8::new(0xfb, 0xbf, 0x24);

const HOLE_W: f64 = 15.0;
const HOLE_H: f64 = 10.0;
const HOLE_INSET: f64 = 10.0;
const HOLE_PITCH: f64 = 40.0;
const FIRST_HOLE_Y: f64 = 20.0;

/// Sprocket holes down both edges, an ISO date stamp and a warm, contrasty photo finish.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilmDecorator;

impl ThemeDecorator for FilmDecorator {
    fn decorate(
        &self,
        surface: &mut Surface,
        background: Rgb8,
        ctx: &DecorationContext,
    ) -> BoothResult<()> {
        let hole = ctx
            .rules
            .ink_over_light(background, Rgb8::WHITE, Rgb8::BLACK)
            .to_rgba8();
        let w = f64::from(surface.width());
        let h = f64::from(surface.height());

        let right = w - HOLE_INSET - HOLE_W;
        let mut y = FIRST_HOLE_Y;
        while y < h {
            surface.fill_rect(Rect::new(HOLE_INSET, y, HOLE_INSET + HOLE_W, y + HOLE_H), hole);
            surface.fill_rect(Rect::new(right, y, right + HOLE_W, y + HOLE_H), hole);
            y += HOLE_PITCH;
        }

        let date = ctx.date.format("%Y-%m-%d").to_string();
        draw_text(
            surface,
            ctx,
            &date,
            Point::new(w / 2.0, h - 20.0),
            TextStyle::new(20.0).bold().centered(),
            AMBER,
        )
    }

    fn photo_passes(&self, photo: Rect) -> Vec<BlendPass> {
        vec![
            BlendPass::new(
                BlendMode::Color,
                Rgba8::with_opacity(255, 200, 100, 0.2),
                photo,
            ),
            BlendPass::new(BlendMode::Overlay, Rgba8::with_opacity(0, 0, 0, 0.3), photo),
        ]
    }
}
