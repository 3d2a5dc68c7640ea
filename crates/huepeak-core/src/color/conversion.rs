//! RGB ↔ HSV conversion.
//!
//! Hue is expressed in degrees on `[0, 360)`. Saturation and value share the
//! `[0, 1]` range of the RGB channels.

use crate::color::model::{HsvColor, RgbColor};

/// Convert an RGB color to HSV.
///
/// Achromatic input (all channels equal, including black) yields
/// `hue = 0` and `saturation = 0`.
pub fn rgb_to_hsv(rgb: RgbColor) -> HsvColor {
    let RgbColor { r, g, b } = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta <= 0.0 || max <= 0.0 {
        return HsvColor::new(0.0, 0.0, max);
    }

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let mut hue = sector * 60.0;
    // rem_euclid can round up to exactly 6.0 for tiny negative inputs
    if hue >= 360.0 {
        hue -= 360.0;
    }

    HsvColor::new(hue, delta / max, max)
}

/// Convert hue/saturation/value to RGB using the six-sector algorithm.
///
/// Hue wraps modulo 360; saturation and value are clamped to `[0, 1]`.
///
/// ```text
/// hi = floor(h / 60) mod 6        f = h / 60 − floor(h / 60)
/// p = v(1 − s)   q = v(1 − f·s)   t = v(1 − (1 − f)·s)
/// ```
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> RgbColor {
    let (hi, f, s, v) = sector_terms(hue, saturation, value);
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    select_sector(hi, v, p, q, t)
}

/// Like [`hsv_to_rgb`], but snaps each intermediate term to an 8-bit level.
///
/// Terms are scaled to `0..=255` and rounded half-to-even before being
/// divided back down, reproducing the output of older 8-bit pipelines.
pub fn hsv_to_rgb_quantized(hue: f32, saturation: f32, value: f32) -> RgbColor {
    let (hi, f, s, v) = sector_terms(hue, saturation, value);
    let scaled = v * 255.0;
    let level = |x: f32| x.round_ties_even() / 255.0;

    let p = level(scaled * (1.0 - s));
    let q = level(scaled * (1.0 - f * s));
    let t = level(scaled * (1.0 - (1.0 - f) * s));
    select_sector(hi, level(scaled), p, q, t)
}

/// Returns `(hi, f, saturation, value)` for the six-sector formulas.
fn sector_terms(hue: f32, saturation: f32, value: f32) -> (i32, f32, f32, f32) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let floor = h.floor();
    let hi = (floor as i32).rem_euclid(6);
    (hi, h - floor, saturation.clamp(0.0, 1.0), value.clamp(0.0, 1.0))
}

fn select_sector(hi: i32, v: f32, p: f32, q: f32, t: f32) -> RgbColor {
    match hi {
        0 => RgbColor::new(v, t, p),
        1 => RgbColor::new(q, v, p),
        2 => RgbColor::new(p, v, t),
        3 => RgbColor::new(p, q, v),
        4 => RgbColor::new(t, p, v),
        _ => RgbColor::new(v, p, q),
    }
}
