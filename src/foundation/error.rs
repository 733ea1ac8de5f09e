/// Crate-wide result alias.
pub type BoothResult<T> = Result<T, BoothError>;

/// Errors produced by the capture and strip pipeline.
///
/// Every variant is scoped to the current capture or assembly attempt. None of them leave a
/// [`CaptureSession`](crate::CaptureSession) unusable.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// The video source reported zero width or height.
    #[error("video source not ready: reported {width}x{height}")]
    SourceNotReady {
        /// Reported native width.
        width: u32,
        /// Reported native height.
        height: u32,
    },

    /// A captured frame could not be decoded during strip assembly.
    #[error("failed to decode frame {index}: {reason}")]
    DecodeFailed {
        /// Position of the frame in the capture list.
        index: usize,
        /// Decoder message.
        reason: String,
    },

    /// The overlay bytes could not be decoded.
    #[error("failed to decode overlay: {0}")]
    OverlayDecode(String),

    /// A newer assembly (or a session reset) superseded this one.
    #[error("assembly superseded by a newer generation")]
    AssemblyStale,

    /// Invalid input or configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Capture was refused (list full, countdown already running).
    #[error("capture error: {0}")]
    Capture(String),

    /// Rasterization or canvas failure.
    #[error("render error: {0}")]
    Render(String),

    /// PNG encoding failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped foreign error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Capture`].
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`BoothError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BoothError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BoothError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BoothError::DecodeFailed`] for the frame at `index`.
    pub fn decode_failed(index: usize, reason: impl std::fmt::Display) -> Self {
        Self::DecodeFailed {
            index,
            reason: reason.to_string(),
        }
    }

    /// `true` for errors the caller recovers from by retrying later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SourceNotReady { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
