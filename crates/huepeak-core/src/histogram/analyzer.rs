//! Peak detection on hue histograms and the average-RGB fallback.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::{RgbColor, hsv_to_rgb};
use crate::error::{HuepeakError, Result};
use crate::histogram::hue::HueHistogram;

/// The most frequent hue bucket of a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HuePeak {
    /// Bucket index in degrees, `0..=360`.
    pub hue: u16,
    /// Count in the peak bucket.
    pub count: u32,
    /// Peak count as a fraction of the histogram total.
    pub share: f32,
}

/// Index of the largest bucket. The lowest index wins ties.
///
/// An all-zero histogram yields 0, which carries no meaning; check
/// [`HueHistogram::is_all_zero`] or use [`find_peak`] to tell the cases apart.
pub fn find_dominant_hue(histogram: &HueHistogram) -> u16 {
    let mut best = 0usize;
    let mut best_count = 0u32;
    for (bucket, &count) in histogram.counts().iter().enumerate() {
        if count > best_count {
            best = bucket;
            best_count = count;
        }
    }
    best as u16
}

/// Dominant hue with its count, or `None` when the histogram is empty.
pub fn find_peak(histogram: &HueHistogram) -> Option<HuePeak> {
    let total = histogram.total();
    if total == 0 {
        return None;
    }
    let hue = find_dominant_hue(histogram);
    let count = histogram.count(usize::from(hue));
    Some(HuePeak {
        hue,
        count,
        share: (count as f64 / total as f64) as f32,
    })
}

/// Render a dominant hue as RGB at the given saturation and value.
pub fn to_rgb(dominant_hue: u16, saturation: f32, value: f32) -> RgbColor {
    hsv_to_rgb(f32::from(dominant_hue), saturation, value)
}

/// Mean of each channel over every pixel, with no filtering.
///
/// # Errors
/// [`HuepeakError::EmptyBuffer`] for a zero-area buffer.
pub fn average_rgb(pixels: &PixelBuffer) -> Result<RgbColor> {
    if pixels.is_empty() {
        return Err(HuepeakError::EmptyBuffer {
            width: pixels.width(),
            height: pixels.height(),
        });
    }

    let count = pixels.len() as f64;
    let mut sum = [0.0_f64; 3];
    for color in pixels.colors() {
        sum[0] += f64::from(color.r);
        sum[1] += f64::from(color.g);
        sum[2] += f64::from(color.b);
    }

    Ok(RgbColor::new(
        (sum[0] / count) as f32,
        (sum[1] / count) as f32,
        (sum[2] / count) as f32,
    ))
}
