//! RGB and HSV color values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color with each channel normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Channels as an `[r, g, b]` array.
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Quantize to 8-bit channels, rounding to nearest and clamping to `0..=255`.
    pub fn to_rgb8(self) -> [u8; 3] {
        self.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// `#RRGGBB` hex string of the 8-bit quantized color.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Largest per-channel absolute difference to `other`.
    pub fn max_channel_delta(self, other: Self) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

impl From<[f32; 3]> for RgbColor {
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<RgbColor> for [f32; 3] {
    fn from(color: RgbColor) -> Self {
        color.to_array()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({:.3}, {:.3}, {:.3})", self.r, self.g, self.b)
    }
}

/// A color in hue/saturation/value form.
///
/// `hue` is in degrees within `[0, 360)`; `saturation` and `value` are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HsvColor {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl HsvColor {
    pub const fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}
