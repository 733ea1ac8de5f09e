//! Built-in stroke font for decoration text.
//!
//! Glyphs are polylines on an 8×12 grid (origin top-left, baseline at `y = 12`). A string is
//! laid out on a fixed advance, each polyline is stroked with round caps and joins, and the
//! resulting outlines are collected into one path ready to fill. The heart is a filled outline
//! instead of strokes.

use kurbo::{Cap, Join, Stroke, StrokeOpts};

use crate::foundation::core::{Affine, BezPath, Point};

type Strokes = &'static [&'static [(i8, i8)]];

const GRID_W: f64 = 8.0;
const GRID_H: f64 = 12.0;
const SPACING: f64 = 4.0;
const HEART_W: f64 = 12.0;

/// Cap height as a fraction of the nominal font size in pixels.
const CAP_HEIGHT: f64 = 0.7;

const TOLERANCE: f64 = 0.05;

/// Horizontal anchoring of a text run relative to its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Origin is the left edge.
    #[default]
    Start,
    /// Origin is the horizontal centre.
    Center,
}

/// Size and weight of a text run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Nominal font size in pixels.
    pub size: f64,
    /// Heavier strokes.
    pub bold: bool,
    /// Anchoring.
    pub align: TextAlign,
}

impl TextStyle {
    /// Regular weight, start-aligned.
    pub fn new(size: f64) -> Self {
        Self {
            size,
            bold: false,
            align: TextAlign::Start,
        }
    }

    /// Bold weight.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Centre on the origin.
    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    fn unit(&self) -> f64 {
        self.size * CAP_HEIGHT / GRID_H
    }

    fn stroke_width(&self) -> f64 {
        let unit = self.unit();
        if self.bold { unit * 1.6 } else { unit * 1.1 }
    }
}

enum Glyph {
    Strokes(Strokes),
    Heart,
    Blank,
}

impl Glyph {
    fn advance(&self) -> f64 {
        match self {
            Glyph::Heart => HEART_W + SPACING,
            Glyph::Strokes(_) | Glyph::Blank => GRID_W + SPACING,
        }
    }
}

/// Total advance width of `text` in pixels, without trailing spacing.
pub fn measure(text: &str, style: TextStyle) -> f64 {
    let units: f64 = text.chars().map(|c| glyph_for(c).advance()).sum();
    if units == 0.0 {
        return 0.0;
    }
    (units - SPACING) * style.unit()
}

/// Fillable outline of `text` with its baseline at `origin.y`.
pub fn text_path(text: &str, origin: Point, style: TextStyle) -> BezPath {
    let unit = style.unit();
    let x0 = match style.align {
        TextAlign::Start => origin.x,
        TextAlign::Center => origin.x - measure(text, style) / 2.0,
    };
    let stroke = Stroke::new(style.stroke_width() / unit)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    let opts = StrokeOpts::default();

    let mut out = BezPath::new();
    let mut pen = 0.0;
    for c in text.chars() {
        let glyph = glyph_for(c);
        let to_canvas = Affine::translate((x0, origin.y - GRID_H * unit))
            * Affine::scale(unit)
            * Affine::translate((pen, 0.0));
        match glyph {
            Glyph::Strokes(polylines) => {
                for line in polylines {
                    let mut poly = BezPath::new();
                    for (i, &(x, y)) in line.iter().enumerate() {
                        let p = Point::new(f64::from(x), f64::from(y));
                        if i == 0 {
                            poly.move_to(p);
                        } else {
                            poly.line_to(p);
                        }
                    }
                    let outline = kurbo::stroke(poly.iter(), &stroke, &opts, TOLERANCE / unit);
                    let placed = to_canvas * outline;
                    out.extend(placed.elements().iter().copied());
                }
            }
            Glyph::Heart => {
                let placed = to_canvas * heart();
                out.extend(placed.elements().iter().copied());
            }
            Glyph::Blank => {}
        }
        pen += glyph.advance();
    }
    out
}

fn heart() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((6.0, 12.0));
    p.curve_to((2.4, 9.2), (0.0, 6.4), (0.0, 3.6));
    p.curve_to((0.0, 1.2), (1.8, 0.0), (3.2, 0.0));
    p.curve_to((4.6, 0.0), (5.6, 1.0), (6.0, 2.2));
    p.curve_to((6.4, 1.0), (7.4, 0.0), (8.8, 0.0));
    p.curve_to((10.2, 0.0), (12.0, 1.2), (12.0, 3.6));
    p.curve_to((12.0, 6.4), (9.6, 9.2), (6.0, 12.0));
    p.close_path();
    p
}

fn glyph_for(c: char) -> Glyph {
    let strokes: Strokes = match c.to_ascii_uppercase() {
        '♥' => return Glyph::Heart,
        'A' => &[&[(0, 12), (4, 0), (8, 12)], &[(2, 7), (6, 7)]],
        'B' => &[
            &[(0, 0), (0, 12), (6, 12), (8, 10), (8, 8), (6, 6), (0, 6)],
            &[(0, 0), (6, 0), (8, 2), (8, 4), (6, 6)],
        ],
        'C' => &[&[(8, 2), (6, 0), (2, 0), (0, 2), (0, 10), (2, 12), (6, 12), (8, 10)]],
        'D' => &[&[(0, 0), (0, 12), (5, 12), (8, 9), (8, 3), (5, 0), (0, 0)]],
        'E' => &[&[(8, 0), (0, 0), (0, 12), (8, 12)], &[(0, 6), (6, 6)]],
        'F' => &[&[(8, 0), (0, 0), (0, 12)], &[(0, 6), (6, 6)]],
        'G' => &[&[
            (8, 2),
            (6, 0),
            (2, 0),
            (0, 2),
            (0, 10),
            (2, 12),
            (6, 12),
            (8, 10),
            (8, 6),
            (4, 6),
        ]],
        'H' => &[&[(0, 0), (0, 12)], &[(8, 0), (8, 12)], &[(0, 6), (8, 6)]],
        'I' => &[&[(2, 0), (6, 0)], &[(4, 0), (4, 12)], &[(2, 12), (6, 12)]],
        'J' => &[&[(8, 0), (8, 10), (6, 12), (2, 12), (0, 10)]],
        'K' => &[&[(0, 0), (0, 12)], &[(8, 0), (0, 7)], &[(3, 5), (8, 12)]],
        'L' => &[&[(0, 0), (0, 12), (8, 12)]],
        'M' => &[&[(0, 12), (0, 0), (4, 6), (8, 0), (8, 12)]],
        'N' => &[&[(0, 12), (0, 0), (8, 12), (8, 0)]],
        'O' => &[RING],
        'P' => &[BOWL],
        'Q' => &[RING, &[(5, 9), (8, 12)]],
        'R' => &[BOWL, &[(4, 6), (8, 12)]],
        'S' => &[&[
            (8, 2),
            (6, 0),
            (2, 0),
            (0, 2),
            (0, 4),
            (2, 6),
            (6, 6),
            (8, 8),
            (8, 10),
            (6, 12),
            (2, 12),
            (0, 10),
        ]],
        'T' => &[&[(0, 0), (8, 0)], &[(4, 0), (4, 12)]],
        'U' => &[&[(0, 0), (0, 10), (2, 12), (6, 12), (8, 10), (8, 0)]],
        'V' => &[&[(0, 0), (4, 12), (8, 0)]],
        'W' => &[&[(0, 0), (2, 12), (4, 6), (6, 12), (8, 0)]],
        'X' => &[&[(0, 0), (8, 12)], &[(8, 0), (0, 12)]],
        'Y' => &[&[(0, 0), (4, 6), (8, 0)], &[(4, 6), (4, 12)]],
        'Z' => &[&[(0, 0), (8, 0), (0, 12), (8, 12)]],
        '0' => &[RING, &[(8, 2), (0, 10)]],
        '1' => &[&[(2, 2), (4, 0), (4, 12)], &[(2, 12), (6, 12)]],
        '2' => &[&[(0, 2), (2, 0), (6, 0), (8, 2), (8, 4), (0, 12), (8, 12)]],
        '3' => &[
            &[
                (0, 2),
                (2, 0),
                (6, 0),
                (8, 2),
                (8, 4),
                (6, 6),
                (8, 8),
                (8, 10),
                (6, 12),
                (2, 12),
                (0, 10),
            ],
            &[(3, 6), (6, 6)],
        ],
        '4' => &[&[(6, 12), (6, 0), (0, 8), (8, 8)]],
        '5' => &[&[
            (8, 0),
            (0, 0),
            (0, 6),
            (6, 6),
            (8, 8),
            (8, 10),
            (6, 12),
            (2, 12),
            (0, 10),
        ]],
        '6' => &[&[
            (7, 0),
            (2, 0),
            (0, 2),
            (0, 10),
            (2, 12),
            (6, 12),
            (8, 10),
            (8, 8),
            (6, 6),
            (0, 6),
        ]],
        '7' => &[&[(0, 0), (8, 0), (3, 12)]],
        '8' => &[
            &[(2, 0), (6, 0), (8, 2), (8, 4), (6, 6), (2, 6), (0, 4), (0, 2), (2, 0)],
            &[(2, 6), (0, 8), (0, 10), (2, 12), (6, 12), (8, 10), (8, 8), (6, 6)],
        ],
        '9' => &[&[
            (8, 6),
            (2, 6),
            (0, 4),
            (0, 2),
            (2, 0),
            (6, 0),
            (8, 2),
            (8, 10),
            (6, 12),
            (1, 12),
        ]],
        '-' => &[&[(2, 6), (6, 6)]],
        '/' => &[&[(0, 12), (8, 0)]],
        '.' => &[&[(4, 11), (4, 12)]],
        ':' => &[&[(4, 3), (4, 4)], &[(4, 11), (4, 12)]],
        _ => return Glyph::Blank,
    };
    Glyph::Strokes(strokes)
}

const RING: &[(i8, i8)] = &[
    (2, 0),
    (6, 0),
    (8, 2),
    (8, 10),
    (6, 12),
    (2, 12),
    (0, 10),
    (0, 2),
    (2, 0),
];

const BOWL: &[(i8, i8)] = &[(0, 12), (0, 0), (6, 0), (8, 2), (8, 4), (6, 6), (0, 6)];

#[cfg(test)]
#[path = "../../tests/unit/render/glyphs.rs"]
mod tests;
