//! Hue histogram construction from pixel data.
//!
//! Only pixels that are both saturated and bright enough contribute: near-gray
//! and near-black pixels carry no useful hue. Large buffers are processed row
//! by row in parallel, each worker filling its own partial histogram; partials
//! are summed afterwards, so the result does not depend on scheduling.

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::color::{RgbColor, rgb_to_hsv};
use crate::histogram::hue::{BUCKET_COUNT, BucketWrap, HueHistogram};

/// Sampled pixel count at which rows are processed in parallel (512×512).
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512 * 512;

/// Build a hue histogram with the default sampling options.
///
/// A pixel is counted only if `saturation > saturation_threshold` and
/// `value > brightness_threshold`. Its hue is rounded half-up to a whole
/// degree in `0..=360`.
pub fn build(
    pixels: &PixelBuffer,
    saturation_threshold: f32,
    brightness_threshold: f32,
) -> HueHistogram {
    HistogramBuilder::new(saturation_threshold, brightness_threshold).build(pixels)
}

/// Configurable hue histogram construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBuilder {
    saturation_threshold: f32,
    brightness_threshold: f32,
    wrap: BucketWrap,
    sample_step: u32,
    parallel_threshold: usize,
}

impl HistogramBuilder {
    pub fn new(saturation_threshold: f32, brightness_threshold: f32) -> Self {
        Self {
            saturation_threshold,
            brightness_threshold,
            wrap: BucketWrap::default(),
            sample_step: 1,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Boundary handling for bucket 360.
    pub fn wrap(mut self, wrap: BucketWrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Visit every `step`-th row and column. Values below 1 are treated as 1.
    pub fn sample_step(mut self, step: u32) -> Self {
        self.sample_step = step.max(1);
        self
    }

    /// Sampled pixel count at which the build switches to parallel rows.
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Count hues of every sampled pixel that passes the filter.
    pub fn build(&self, pixels: &PixelBuffer) -> HueHistogram {
        let step = self.sample_step.max(1);
        let rows = pixels.height().div_ceil(step);
        let columns = pixels.width().div_ceil(step);
        let sampled = rows as usize * columns as usize;
        let parallel = sampled > 0 && sampled >= self.parallel_threshold;

        let histogram = if parallel {
            (0..rows)
                .into_par_iter()
                .fold(
                    || HueHistogram::new(self.wrap),
                    |mut partial, i| {
                        self.accumulate_row(pixels, i * step, &mut partial);
                        partial
                    },
                )
                .reduce(
                    || HueHistogram::new(self.wrap),
                    |mut a, b| {
                        a.merge(&b);
                        a
                    },
                )
        } else {
            let mut histogram = HueHistogram::new(self.wrap);
            for i in 0..rows {
                self.accumulate_row(pixels, i * step, &mut histogram);
            }
            histogram
        };

        tracing::trace!(
            "hue histogram: {}/{} sampled pixels passed the filter (parallel={})",
            histogram.total(),
            sampled,
            parallel
        );
        histogram
    }

    fn accumulate_row(&self, pixels: &PixelBuffer, y: u32, histogram: &mut HueHistogram) {
        let Some(row) = pixels.row(y) else {
            return;
        };
        for &px in row.iter().step_by(self.sample_step.max(1) as usize) {
            let hsv = rgb_to_hsv(RgbColor::from(px));
            if hsv.saturation > self.saturation_threshold && hsv.value > self.brightness_threshold {
                histogram.increment(hue_bucket(hsv.hue));
            }
        }
    }
}

/// Round a hue in degrees half-up to a whole degree clamped to `0..=360`.
pub fn hue_bucket(hue: f32) -> usize {
    (hue + 0.5).floor().clamp(0.0, (BUCKET_COUNT - 1) as f32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rainbow(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            let hue = (x * 7 + y * 13) as f32 % 360.0;
            let value = 0.05 + (y % 10) as f32 * 0.1;
            let saturation = (x % 5) as f32 * 0.25;
            crate::color::hsv_to_rgb(hue, saturation, value)
        })
    }

    #[test]
    fn test_hue_bucket_rounds_half_up() {
        assert_eq!(hue_bucket(0.0), 0);
        assert_eq!(hue_bucket(0.49), 0);
        assert_eq!(hue_bucket(0.5), 1);
        assert_eq!(hue_bucket(119.5), 120);
        assert_eq!(hue_bucket(359.6), 360);
        assert_eq!(hue_bucket(-3.0), 0);
    }

    #[test]
    fn test_filtered_pixels_are_excluded() {
        let pixels = PixelBuffer::new(
            3,
            1,
            vec![[1.0, 0.0, 0.0], [0.05, 0.0, 0.0], [0.5, 0.5, 0.5]],
        )
        .unwrap();
        let h = build(&pixels, 0.1, 0.1);
        assert_eq!(h.total(), 1);
        assert_eq!(h.count(0), 1);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let pixels = PixelBuffer::filled(2, 2, RgbColor::new(1.0, 0.0, 0.0));
        assert_eq!(build(&pixels, 1.0, 0.0).total(), 0);
        assert_eq!(build(&pixels, 0.0, 1.0).total(), 0);
        assert_eq!(build(&pixels, 0.99, 0.99).total(), 4);
    }

    #[test]
    fn test_gray_image_builds_empty_histogram() {
        let pixels = PixelBuffer::filled(3, 3, RgbColor::new(0.5, 0.5, 0.5));
        let h = build(&pixels, 0.1, 0.1);
        assert!(h.is_all_zero());
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn test_zero_area_buffer_builds_empty_histogram() {
        let pixels = PixelBuffer::new(0, 0, vec![]).unwrap();
        assert!(build(&pixels, 0.0, 0.0).is_all_zero());
    }

    #[test]
    fn test_folded_wrap_counts_359_7_as_zero() {
        // hue ≈ 359.7°
        let px = crate::color::hsv_to_rgb(359.7, 1.0, 1.0);
        let pixels = PixelBuffer::filled(1, 1, px);
        let duplicate = HistogramBuilder::new(0.1, 0.1).build(&pixels);
        let folded = HistogramBuilder::new(0.1, 0.1).wrap(BucketWrap::Folded).build(&pixels);
        assert_eq!(duplicate.count(360), 1);
        assert_eq!(folded.count(0), 1);
        assert_eq!(folded.count(360), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pixels = rainbow(97, 61);
        let sequential = HistogramBuilder::new(0.2, 0.2)
            .parallel_threshold(usize::MAX)
            .build(&pixels);
        let parallel = HistogramBuilder::new(0.2, 0.2).parallel_threshold(1).build(&pixels);
        assert!(!sequential.is_all_zero());
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_sample_step_visits_grid_subset() {
        let pixels = PixelBuffer::filled(10, 7, RgbColor::new(0.0, 0.0, 1.0));
        let h = HistogramBuilder::new(0.1, 0.1).sample_step(3).build(&pixels);
        // columns 0,3,6,9 × rows 0,3,6
        assert_eq!(h.total(), 12);
        assert_eq!(h.count(240), 12);
    }
}
