//! Color models and RGB↔HSV conversion.

pub mod conversion;
pub mod model;

pub use conversion::{hsv_to_rgb, hsv_to_rgb_quantized, rgb_to_hsv};
pub use model::{HsvColor, RgbColor};
