//! Circular box-filter smoothing of hue histograms.

use crate::error::{HuepeakError, Result};
use crate::histogram::hue::{BUCKET_COUNT, HueHistogram};

/// Largest accepted smoothing radius.
pub const MAX_SMOOTH_FACTOR: i32 = 360;

/// Smooth a histogram with a circular moving average of radius `smooth_factor`.
///
/// Each output bucket `i` receives the sum of the `2 × smooth_factor + 1`
/// buckets centered on `i`, divided by the window size with truncating
/// integer division. Neighborhoods wrap around the ring defined by the
/// histogram's [`BucketWrap`](crate::histogram::BucketWrap). The input is left
/// untouched.
///
/// # Errors
/// [`HuepeakError::InvalidArgument`] when `smooth_factor` is outside
/// `0..=360`.
pub fn smooth(histogram: &HueHistogram, smooth_factor: i32) -> Result<HueHistogram> {
    if !(0..=MAX_SMOOTH_FACTOR).contains(&smooth_factor) {
        return Err(HuepeakError::invalid_argument(
            "smooth_factor",
            format!("must be within 0..={MAX_SMOOTH_FACTOR}, got {smooth_factor}"),
        ));
    }
    if smooth_factor == 0 {
        return Ok(histogram.clone());
    }

    let radius = i64::from(smooth_factor);
    let ring = histogram.wrap().ring_len() as i64;
    let window = (2 * radius + 1) as u64;
    let counts = histogram.counts();

    let mut smoothed = vec![0u32; BUCKET_COUNT];
    for (i, out) in smoothed.iter_mut().take(ring as usize).enumerate() {
        let center = i as i64;
        let sum: u64 = (center - radius..=center + radius)
            .map(|x| u64::from(counts[x.rem_euclid(ring) as usize]))
            .sum();
        // The average never exceeds the largest input count.
        *out = (sum / window) as u32;
    }

    Ok(histogram.with_counts(smoothed))
}
