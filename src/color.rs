//! Background colours and the ink rules that keep decorations readable on them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Rgba8,
    error::{BoothError, BoothResult},
};

/// Opaque 8-bit sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    /// Pure black.
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque paint colour.
    pub fn to_rgba8(self) -> Rgba8 {
        Rgba8::opaque(self.r, self.g, self.b)
    }

    /// Relative luminance on gamma-encoded channels (Rec. 709 weights), `0..=1`.
    pub fn luma(self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = BoothError;

    fn from_str(s: &str) -> BoothResult<Self> {
        parse_hex(s).map_err(BoothError::validation)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) => Ok(Self::new(r, g, b)),
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex colour \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        6 => Ok(Rgb8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        3 => {
            let nibble = |i: usize| -> Result<u8, String> {
                let v = hex_byte(&s[i..i + 1])?;
                Ok(v * 17)
            };
            Ok(Rgb8::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => Err("hex colour must be #RRGGBB or #RGB (case-insensitive)".to_owned()),
    }
}

/// Suggested strip backgrounds, in display order.
pub const DEFAULT_PALETTE: [Rgb8; 8] = [
    Rgb8::new(0xff, 0xff, 0xff),
    Rgb8::new(0x00, 0x00, 0x00),
    Rgb8::new(0xfc, 0xe7, 0xf3),
    Rgb8::new(0xdb, 0xea, 0xfe),
    Rgb8::new(0xfe, 0xf3, 0xc7),
    Rgb8::new(0xd1, 0xfa, 0xe5),
    Rgb8::new(0xe5, 0xe7, 0xeb),
    Rgb8::new(0xc0, 0x84, 0xfc),
];

/// How a background reads against decoration ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backdrop {
    /// Black or nearly so (`#000000`, `#171717`).
    NearBlack,
    /// White or nearly so.
    NearWhite,
    /// Anything in between; themes keep their default ink.
    Mid,
}

/// Ink selection for decorations drawn over a strip background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRules {
    /// Luma at or below which a background counts as near-black.
    pub near_black_max: f64,
    /// Luma at or above which a background counts as near-white.
    pub near_white_min: f64,
}

impl Default for ColorRules {
    fn default() -> Self {
        Self {
            near_black_max: 24.0 / 255.0,
            near_white_min: 245.0 / 255.0,
        }
    }
}

impl ColorRules {
    /// Classify `background`.
    pub fn classify(&self, background: Rgb8) -> Backdrop {
        let luma = background.luma();
        if luma <= self.near_black_max {
            Backdrop::NearBlack
        } else if luma >= self.near_white_min {
            Backdrop::NearWhite
        } else {
            Backdrop::Mid
        }
    }

    /// `light` on near-black backgrounds, `default_ink` otherwise.
    pub fn ink_over_dark(&self, background: Rgb8, default_ink: Rgb8, light: Rgb8) -> Rgb8 {
        match self.classify(background) {
            Backdrop::NearBlack => light,
            Backdrop::NearWhite | Backdrop::Mid => default_ink,
        }
    }

    /// `dark` on near-white backgrounds, `default_ink` otherwise.
    pub fn ink_over_light(&self, background: Rgb8, default_ink: Rgb8, dark: Rgb8) -> Rgb8 {
        match self.classify(background) {
            Backdrop::NearWhite => dark,
            Backdrop::NearBlack | Backdrop::Mid => default_ink,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/color.rs"]
mod tests;
