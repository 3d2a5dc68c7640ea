//! Error types for dominant color extraction.

/// Result alias used across `huepeak-core`.
pub type Result<T> = std::result::Result<T, HuepeakError>;

#[derive(Debug, thiserror::Error)]
pub enum HuepeakError {
    /// A parameter is outside its accepted range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The pixel buffer has no pixels to average or analyze.
    #[error("pixel buffer is empty ({width}x{height})")]
    EmptyBuffer { width: u32, height: u32 },

    /// Pixel data length disagrees with the declared dimensions.
    #[error("pixel data has {len} entries, expected {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },

    /// A histogram was assembled from the wrong number of buckets.
    #[error("hue histogram needs 361 buckets, got {len}")]
    InvalidHistogram { len: usize },

    #[error("config serialization failed: {0}")]
    Config(#[from] serde_json::Error),
}

impl HuepeakError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// True for errors caused by a caller-supplied value rather than the data.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::DimensionMismatch { .. }
                | Self::InvalidHistogram { .. }
        )
    }
}
