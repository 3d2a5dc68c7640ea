//! The dominant color pipeline.
//!
//! # Algorithm (hue histogram strategy)
//! 1. Build a hue histogram from the pixels that pass the saturation and
//!    brightness filter
//! 2. Smooth it with a circular moving average
//! 3. Take the peak bucket as the dominant hue
//! 4. Render that hue at the configured output saturation and value
//!
//! When no pixel passes the filter the histogram is empty and its peak
//! is meaningless; the calculator then falls back to the average RGB
//! (unless disabled in the config). When the histogram has counts but
//! smoothing truncates them all to zero, the unsmoothed peak is used and
//! the report carries the unsmoothed histogram.

use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::calculator::params::{CalculatorConfig, Strategy};
use crate::color::{RgbColor, hsv_to_rgb_quantized};
use crate::error::{HuepeakError, Result};
use crate::histogram::{
    HistogramBuilder, HuePeak, HueHistogram, average_rgb, find_dominant_hue, find_peak, smooth,
    to_rgb,
};

/// Compute the dominant color of `pixels`.
///
/// This is the single entry point for adapters; it validates `config` on
/// every call. Hold a [`DominantColorCalculator`] to validate once.
pub fn calculate(pixels: &PixelBuffer, config: &CalculatorConfig) -> Result<RgbColor> {
    DominantColorCalculator::new(config.clone())?.calculate(pixels)
}

/// Everything the pipeline learned while picking a color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominantColorReport {
    /// The chosen dominant color.
    pub color: RgbColor,
    /// Strategy that produced `color`. Differs from the configured one after a fallback.
    pub strategy: Strategy,
    /// Peak of the hue histogram, when one exists.
    pub peak: Option<HuePeak>,
    /// Histogram `peak` was read from: the smoothed one, or the unsmoothed one
    /// when `smoothing_erased` is set. `None` for the average RGB strategy.
    pub histogram: Option<HueHistogram>,
    /// True when smoothing truncated every bucket to zero and `histogram`
    /// holds the unsmoothed counts instead.
    pub smoothing_erased: bool,
    /// True when the hue histogram was empty and the average RGB was used instead.
    pub fell_back: bool,
}

/// Stateless calculator holding a validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DominantColorCalculator {
    config: CalculatorConfig,
}

impl DominantColorCalculator {
    /// Validate `config` and wrap it.
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Dominant color of `pixels`.
    ///
    /// # Errors
    /// [`HuepeakError::EmptyBuffer`] for a zero-area buffer, whatever the strategy.
    pub fn calculate(&self, pixels: &PixelBuffer) -> Result<RgbColor> {
        self.analyze(pixels).map(|report| report.color)
    }

    /// Build and smooth the hue histogram of `pixels`.
    pub fn histogram(&self, pixels: &PixelBuffer) -> Result<HueHistogram> {
        smooth(&self.raw_histogram(pixels), self.config.smooth_factor)
    }

    /// Run the pipeline and report the intermediate results.
    pub fn analyze(&self, pixels: &PixelBuffer) -> Result<DominantColorReport> {
        if pixels.is_empty() {
            return Err(HuepeakError::EmptyBuffer {
                width: pixels.width(),
                height: pixels.height(),
            });
        }

        let report = match self.config.strategy {
            Strategy::AverageRgb => DominantColorReport {
                color: average_rgb(pixels)?,
                strategy: Strategy::AverageRgb,
                peak: None,
                histogram: None,
                smoothing_erased: false,
                fell_back: false,
            },
            Strategy::HueHistogram => self.analyze_hue(pixels)?,
        };

        tracing::trace!(
            "dominant color {} via {} ({}x{})",
            report.color,
            report.strategy.label(),
            pixels.width(),
            pixels.height()
        );
        Ok(report)
    }

    fn analyze_hue(&self, pixels: &PixelBuffer) -> Result<DominantColorReport> {
        let raw = self.raw_histogram(pixels);
        let smoothed = smooth(&raw, self.config.smooth_factor)?;

        // Truncating division can erase a sparse histogram entirely; the
        // unsmoothed peak is still meaningful in that case.
        let smoothing_erased = smoothed.is_all_zero() && !raw.is_all_zero();
        let histogram = if smoothing_erased {
            tracing::debug!(
                "smoothing radius {} erased all {} counts; using unsmoothed peak",
                self.config.smooth_factor,
                raw.total()
            );
            raw
        } else {
            smoothed
        };

        if let Some(peak) = find_peak(&histogram) {
            return Ok(DominantColorReport {
                color: self.render_hue(peak.hue),
                strategy: Strategy::HueHistogram,
                peak: Some(peak),
                histogram: Some(histogram),
                smoothing_erased,
                fell_back: false,
            });
        }

        if self.config.fallback_to_average {
            tracing::debug!(
                "no pixel passed saturation > {} and brightness > {}; falling back to average RGB",
                self.config.saturation_threshold,
                self.config.brightness_threshold
            );
            return Ok(DominantColorReport {
                color: average_rgb(pixels)?,
                strategy: Strategy::AverageRgb,
                peak: None,
                histogram: Some(histogram),
                smoothing_erased: false,
                fell_back: true,
            });
        }

        Ok(DominantColorReport {
            color: self.render_hue(find_dominant_hue(&histogram)),
            strategy: Strategy::HueHistogram,
            peak: None,
            histogram: Some(histogram),
            smoothing_erased: false,
            fell_back: false,
        })
    }

    fn raw_histogram(&self, pixels: &PixelBuffer) -> HueHistogram {
        HistogramBuilder::new(
            self.config.saturation_threshold,
            self.config.brightness_threshold,
        )
        .wrap(self.config.bucket_wrap)
        .sample_step(self.config.sample_step)
        .parallel_threshold(self.config.parallel_threshold)
        .build(pixels)
    }

    fn render_hue(&self, hue: u16) -> RgbColor {
        let (s, v) = (self.config.output_saturation, self.config.output_value);
        if self.config.quantize_output {
            hsv_to_rgb_quantized(f32::from(hue), s, v)
        } else {
            to_rgb(hue, s, v)
        }
    }
}
