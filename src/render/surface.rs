use std::sync::Arc;

use image::RgbaImage;

use crate::{
    foundation::{
        core::{Affine, BezPath, Canvas, Point, Rect, Rgba8},
        error::{BoothError, BoothResult},
        math::{
            premul_over_in_place, premul_over_px, premultiply_rgba8_in_place,
            unpremultiply_rgba8_in_place,
        },
    },
    render::text::{FontFace, TextBrush},
};

/// Premultiplied RGBA8 raster, row-major and tightly packed.
///
/// Pixel-aligned operations (fills, rect fills, blits) run directly on the buffer. Anti-aliased
/// geometry and transformed images go through `vello_cpu`, which renders into a fresh pixmap that
/// is then composited source-over onto this surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0; canvas.rgba8_len()],
        }
    }

    /// Surface filled with `color`.
    pub fn filled(canvas: Canvas, color: Rgba8) -> Self {
        let mut out = Self::new(canvas);
        out.fill(color);
        out
    }

    /// Wrap a straight-alpha image.
    pub fn from_rgba_image(img: &RgbaImage) -> BoothResult<Self> {
        let canvas = Canvas::new(img.width(), img.height())?;
        let mut data = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut data);
        Ok(Self { canvas, data })
    }

    /// Dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Straight-alpha colour at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = self.offset(x, y);
        let mut px = [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ];
        unpremultiply_rgba8_in_place(&mut px);
        Some(Rgba8::new(px[0], px[1], px[2], px[3]))
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let premul = color.to_premul();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Source-over `color` onto the pixels covered by `rect`.
    ///
    /// Edges snap to whole pixels and the rect is clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let src = color.to_premul();
        let stride = self.canvas.width as usize * 4;
        for y in y0..y1 {
            let row = y * stride;
            for x in x0..x1 {
                let i = row + x * 4;
                let dst = [
                    self.data[i],
                    self.data[i + 1],
                    self.data[i + 2],
                    self.data[i + 3],
                ];
                self.data[i..i + 4].copy_from_slice(&premul_over_px(dst, src));
            }
        }
    }

    /// Source-over `img` at its native size with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, img: &RgbaImage, x: i64, y: i64) {
        let (w, h) = (i64::from(self.canvas.width), i64::from(self.canvas.height));
        let stride = self.canvas.width as usize * 4;
        for (sx, sy, p) in img.enumerate_pixels() {
            let dx = x + i64::from(sx);
            let dy = y + i64::from(sy);
            if dx < 0 || dy < 0 || dx >= w || dy >= h {
                continue;
            }
            let mut src = p.0;
            premultiply_rgba8_in_place(&mut src);
            let i = dy as usize * stride + dx as usize * 4;
            let dst = [
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ];
            self.data[i..i + 4].copy_from_slice(&premul_over_px(dst, src));
        }
    }

    /// Fill `path` (non-zero winding, anti-aliased) with `color`.
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) -> BoothResult<()> {
        let cpu_path = bezpath_to_cpu(path);
        self.paint_with(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, color.a,
            ));
            ctx.fill_path(&cpu_path);
        })
    }

    /// Draw the `0..w × 0..h` rectangle of `img` through `transform`, bilinear sampled.
    pub fn draw_image(&mut self, img: &RgbaImage, transform: Affine) -> BoothResult<()> {
        let (w, h) = (f64::from(img.width()), f64::from(img.height()));
        let paint = rgba_straight_to_image(img)?;
        self.paint_with(|ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        })
    }

    /// Fill the glyph runs of `layout` with their brushes, the layout's top-left at `origin`.
    pub fn fill_text(
        &mut self,
        layout: &parley::Layout<TextBrush>,
        font: &FontFace,
        origin: Point,
    ) -> BoothResult<()> {
        self.paint_with(|ctx| {
            ctx.set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(font.data())
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        })
    }

    /// Straight-alpha copy, suitable for encoding.
    pub fn to_rgba_image(&self) -> BoothResult<RgbaImage> {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        RgbaImage::from_raw(self.canvas.width, self.canvas.height, data)
            .ok_or_else(|| BoothError::render("surface buffer does not match its dimensions"))
    }

    /// Lossless PNG encoding.
    pub fn encode_png(&self) -> BoothResult<Vec<u8>> {
        crate::assets::decode::encode_png(&self.to_rgba_image()?)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel bounds `(x0, y0, x1, y1)` of `rect` clipped to the surface, or `None` if empty.
    pub(crate) fn clip(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let x0 = rect.x0.min(rect.x1).round().clamp(0.0, w) as usize;
        let x1 = rect.x0.max(rect.x1).round().clamp(0.0, w) as usize;
        let y0 = rect.y0.min(rect.y1).round().clamp(0.0, h) as usize;
        let y1 = rect.y0.max(rect.y1).round().clamp(0.0, h) as usize;
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.canvas.width as usize + x as usize) * 4
    }

    fn paint_with(&mut self, f: impl FnOnce(&mut vello_cpu::RenderContext)) -> BoothResult<()> {
        let (w, h) = self.canvas.to_u16()?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        f(&mut ctx);
        ctx.flush();

        // `vello_cpu` renders into a fresh buffer, so render into a transparent pixmap and
        // premul-over onto our data.
        let mut tmp = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut tmp);
        premul_over_in_place(&mut self.data, tmp.data_as_u8_slice())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_straight_to_image(img: &RgbaImage) -> BoothResult<vello_cpu::Image> {
    let canvas = Canvas::new(img.width(), img.height())?;
    let (w, h) = canvas.to_u16()?;

    let mut premul = img.as_raw().clone();
    premultiply_rgba8_in_place(&mut premul);
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((canvas.width as usize) * (canvas.height as usize));
    for px in premul.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
