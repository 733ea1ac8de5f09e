//! Booth configuration.
//!
//! Every field has a default matching the stock photo-booth behaviour, so an empty JSON object
//! (`{}`) is a valid configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    color::{DEFAULT_PALETTE, Rgb8},
    foundation::{
        core::Canvas,
        error::{BoothError, BoothResult},
    },
};

/// Environment variable overriding [`BoothConfig::threads`].
pub const THREADS_ENV: &str = "PHOTOSTRIP_THREADS";

/// Largest strip the assembler accepts.
pub const MAX_TARGET_FRAMES: usize = 16;

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoothConfig {
    /// Capture resolution and shutter behaviour.
    pub capture: CaptureConfig,
    /// Strip layout metrics.
    pub layout: LayoutConfig,
    /// Overlay scale limits.
    pub scale: ScaleConfig,
    /// Suggested background colours.
    pub palette: Vec<Rgb8>,
    /// Worker threads for strip decoding. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// TrueType/OpenType file for decoration text. `None` uses the built-in stroke font.
    pub font: Option<PathBuf>,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            layout: LayoutConfig::default(),
            scale: ScaleConfig::default(),
            palette: DEFAULT_PALETTE.to_vec(),
            threads: None,
            font: None,
        }
    }
}

/// Capture resolution and shutter behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Captured frame width in pixels.
    pub width: u32,
    /// Captured frame height in pixels.
    pub height: u32,
    /// Frames per strip.
    pub target_frames: usize,
    /// Countdown length in one-second ticks.
    pub countdown_secs: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            target_frames: 4,
            countdown_secs: 3,
        }
    }
}

impl CaptureConfig {
    /// Capture target as a canvas.
    pub fn canvas(&self) -> BoothResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

/// Strip layout metrics in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Left/right margin around photos.
    pub padding: u32,
    /// Space above the first photo.
    pub header_height: u32,
    /// Space below the last photo.
    pub footer_height: u32,
    /// Vertical space between photos.
    pub gap: u32,
    /// Drop-shadow offset on both axes.
    pub shadow_offset: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 40,
            header_height: 80,
            footer_height: 100,
            gap: 20,
            shadow_offset: 5,
        }
    }
}

/// Overlay scale limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleConfig {
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
    /// Increment used by zoom in/out controls.
    pub step: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 2.0,
            step: 0.1,
        }
    }
}

impl BoothConfig {
    /// Parse and validate JSON.
    pub fn from_json_str(s: &str) -> BoothResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| BoothError::config(format!("parse config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> BoothResult<()> {
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(BoothError::config("capture dimensions must be non-zero"));
        }
        if self.capture.target_frames == 0 || self.capture.target_frames > MAX_TARGET_FRAMES {
            return Err(BoothError::config(format!(
                "capture.target_frames must be in 1..={MAX_TARGET_FRAMES}"
            )));
        }
        if self.capture.countdown_secs == 0 {
            return Err(BoothError::config("capture.countdown_secs must be >= 1"));
        }
        let s = self.scale;
        if !(s.min.is_finite() && s.max.is_finite() && s.step.is_finite()) {
            return Err(BoothError::config("scale limits must be finite"));
        }
        if s.min <= 0.0 || s.min > s.max {
            return Err(BoothError::config("scale must satisfy 0 < min <= max"));
        }
        if s.step <= 0.0 {
            return Err(BoothError::config("scale.step must be > 0"));
        }
        if self.layout.shadow_offset > self.layout.gap {
            return Err(BoothError::config(
                "layout.shadow_offset must not exceed layout.gap",
            ));
        }
        if let Some(0) = self.threads {
            return Err(BoothError::config("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Worker thread count, honouring [`THREADS_ENV`] over the configured value.
    pub fn effective_threads(&self) -> Option<usize> {
        std::env::var(THREADS_ENV)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .or(self.threads)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
