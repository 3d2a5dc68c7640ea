//! Huepeak Core — dominant color extraction from decoded images.
//!
//! The engine builds a 361-bucket hue histogram from the saturated, bright
//! pixels of a [`PixelBuffer`], smooths it with a circular moving average, and
//! renders the peak hue as RGB. A per-channel average is available as an
//! alternate strategy and as the fallback for images without usable hue.
//!
//! ```
//! use huepeak_core::{CalculatorConfig, PixelBuffer, RgbColor, calculate};
//!
//! let pixels = PixelBuffer::filled(4, 4, RgbColor::new(0.9, 0.1, 0.1));
//! let color = calculate(&pixels, &CalculatorConfig::default())?;
//! assert_eq!(color.to_hex(), "#FF0000");
//! # Ok::<(), huepeak_core::HuepeakError>(())
//! ```

pub mod buffer;
pub mod calculator;
pub mod color;
pub mod error;
pub mod histogram;

// Re-exports for convenience.
pub use buffer::PixelBuffer;
pub use calculator::{
    CalculatorConfig, DominantColorCalculator, DominantColorReport, Strategy, calculate,
};
pub use color::{HsvColor, RgbColor};
pub use error::{HuepeakError, Result};
pub use histogram::{BucketWrap, HueHistogram};
