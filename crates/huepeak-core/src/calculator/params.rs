//! Calculator configuration.
//!
//! `CalculatorConfig` carries every tunable of the dominant color pipeline.
//! It round-trips through JSON; fields missing from a document keep their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::{HuepeakError, Result};
use crate::histogram::BucketWrap;
use crate::histogram::builder::DEFAULT_PARALLEL_THRESHOLD;
use crate::histogram::smoothing::MAX_SMOOTH_FACTOR;

/// How the dominant color is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Peak of the smoothed hue histogram, rendered at the output saturation/value.
    #[default]
    HueHistogram,
    /// Per-channel mean of all pixels.
    AverageRgb,
}

impl Strategy {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HueHistogram => "hue histogram",
            Self::AverageRgb => "average RGB",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Pixels need saturation strictly above this to enter the histogram.
    pub saturation_threshold: f32,
    /// Pixels need value strictly above this to enter the histogram.
    pub brightness_threshold: f32,
    /// Radius of the circular moving average, `0..=360`.
    pub smooth_factor: i32,
    pub strategy: Strategy,
    /// Saturation of the rendered dominant hue.
    pub output_saturation: f32,
    /// Value (brightness) of the rendered dominant hue.
    pub output_value: f32,
    /// Return the average RGB when no pixel passes the histogram filter.
    pub fallback_to_average: bool,
    pub bucket_wrap: BucketWrap,
    /// Visit every n-th row and column when building the histogram.
    pub sample_step: u32,
    /// Sampled pixel count at which the histogram is built in parallel.
    pub parallel_threshold: usize,
    /// Snap the rendered color to 8-bit levels.
    pub quantize_output: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            saturation_threshold: 0.1,
            brightness_threshold: 0.1,
            smooth_factor: 5,
            strategy: Strategy::HueHistogram,
            output_saturation: 1.0,
            output_value: 1.0,
            fallback_to_average: true,
            bucket_wrap: BucketWrap::Duplicate,
            sample_step: 1,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            quantize_output: false,
        }
    }
}

impl CalculatorConfig {
    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_SMOOTH_FACTOR).contains(&self.smooth_factor) {
            return Err(HuepeakError::invalid_argument(
                "smooth_factor",
                format!(
                    "must be within 0..={MAX_SMOOTH_FACTOR}, got {}",
                    self.smooth_factor
                ),
            ));
        }
        if !self.saturation_threshold.is_finite() {
            return Err(HuepeakError::invalid_argument(
                "saturation_threshold",
                format!("must be finite, got {}", self.saturation_threshold),
            ));
        }
        if !self.brightness_threshold.is_finite() {
            return Err(HuepeakError::invalid_argument(
                "brightness_threshold",
                format!("must be finite, got {}", self.brightness_threshold),
            ));
        }
        check_unit("output_saturation", self.output_saturation)?;
        check_unit("output_value", self.output_value)?;
        if self.sample_step == 0 {
            return Err(HuepeakError::invalid_argument("sample_step", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse from JSON. Does not validate.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(HuepeakError::invalid_argument(
            name,
            format!("must be within [0, 1], got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CalculatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.strategy, Strategy::HueHistogram);
        assert_eq!(config.smooth_factor, 5);
    }

    #[test]
    fn test_validate_rejects_smooth_factor_out_of_range() {
        for smooth_factor in [-1, 361] {
            let config = CalculatorConfig {
                smooth_factor,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err,
                HuepeakError::InvalidArgument { name: "smooth_factor", .. }
            ));
        }
    }

    #[test]
    fn test_validate_rejects_bad_output_and_step() {
        let config = CalculatorConfig {
            output_value: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CalculatorConfig {
            sample_step: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CalculatorConfig {
            saturation_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = CalculatorConfig {
            smooth_factor: 12,
            strategy: Strategy::AverageRgb,
            bucket_wrap: BucketWrap::Folded,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"average_rgb\""));
        assert_eq!(CalculatorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "smooth_factor": 8, "bucket_wrap": "folded" }"#;
        let config = CalculatorConfig::from_json(json).unwrap();
        assert_eq!(config.smooth_factor, 8);
        assert_eq!(config.bucket_wrap, BucketWrap::Folded);
        assert_eq!(config.saturation_threshold, 0.1);
        assert!(config.fallback_to_average);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = CalculatorConfig::from_json("{ smooth_factor: }").unwrap_err();
        assert!(matches!(err, HuepeakError::Config(_)));
    }
}
