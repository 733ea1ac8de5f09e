use crate::{
    foundation::core::{Rect, Rgba8},
    render::surface::Surface,
};

/// Canvas-style compositing operator for a solid-colour pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Plain source-over.
    #[default]
    Normal,
    /// `s * d` per channel.
    Multiply,
    /// Hard-light with source and backdrop swapped.
    Overlay,
    /// Hue and saturation of the source with the luminosity of the backdrop.
    Color,
}

/// A solid colour composited over one rectangle with one operator.
///
/// Passes never leak state: each one is applied on its own and the next draw is plain
/// source-over again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendPass {
    /// Operator.
    pub mode: BlendMode,
    /// Source colour (straight alpha); its alpha is the pass strength.
    pub color: Rgba8,
    /// Affected area, snapped to whole pixels.
    pub rect: Rect,
}

impl BlendPass {
    /// Construct a pass.
    pub fn new(mode: BlendMode, color: Rgba8, rect: Rect) -> Self {
        Self { mode, color, rect }
    }

    /// Composite this pass onto `surface`.
    pub fn apply(&self, surface: &mut Surface) {
        let Some((x0, y0, x1, y1)) = surface.clip(self.rect) else {
            return;
        };
        if self.color.a == 0 {
            return;
        }
        let stride = surface.width() as usize * 4;
        let data = surface.data_mut();
        for y in y0..y1 {
            let row = &mut data[y * stride + x0 * 4..y * stride + x1 * 4];
            match self.mode {
                BlendMode::Normal => blend_solid_rgba8_premul(row, self.color, |s, _| s),
                BlendMode::Multiply => blend_solid_rgba8_premul(row, self.color, |s, d| {
                    [s[0] * d[0], s[1] * d[1], s[2] * d[2]]
                }),
                BlendMode::Overlay => blend_solid_rgba8_premul(row, self.color, |s, d| {
                    [overlay(s[0], d[0]), overlay(s[1], d[1]), overlay(s[2], d[2])]
                }),
                BlendMode::Color => {
                    blend_solid_rgba8_premul(row, self.color, |s, d| set_lum(s, lum(d)))
                }
            }
        }
    }
}

fn overlay(s: f32, d: f32) -> f32 {
    if d <= 0.5 {
        2.0 * s * d
    } else {
        1.0 - 2.0 * (1.0 - s) * (1.0 - d)
    }
}

fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

/// Source-over of a solid straight-alpha colour with `blend_fn` applied to unpremultiplied
/// channels:
///
/// `out_a = sa + da * (1 - sa)`,
/// `out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da`.
fn blend_solid_rgba8_premul<F>(dst: &mut [u8], color: Rgba8, blend_fn: F)
where
    F: Fn([f32; 3], [f32; 3]) -> [f32; 3],
{
    let sa = color.opacity();
    let sc = [
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
    ];
    let sp = [sc[0] * sa, sc[1] * sa, sc[2] * sa];
    let inv_sa = 1.0 - sa;

    for d in dst.chunks_exact_mut(4) {
        let da = f32::from(d[3]) / 255.0;
        let dp = [
            f32::from(d[0]) / 255.0,
            f32::from(d[1]) / 255.0,
            f32::from(d[2]) / 255.0,
        ];
        let dc = if da > 0.0 {
            [
                (dp[0] / da).clamp(0.0, 1.0),
                (dp[1] / da).clamp(0.0, 1.0),
                (dp[2] / da).clamp(0.0, 1.0),
            ]
        } else {
            [0.0; 3]
        };

        let b = blend_fn(sc, dc);
        for c in 0..3 {
            let bc = b[c].clamp(0.0, 1.0);
            let out = (sp[c] * (1.0 - da) + dp[c] * inv_sa + bc * sa * da).clamp(0.0, 1.0);
            d[c] = (out * 255.0).round() as u8;
        }
        let out_a = (sa + da * inv_sa).clamp(0.0, 1.0);
        d[3] = (out_a * 255.0).round() as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
