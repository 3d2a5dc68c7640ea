//! Hue histogram construction, circular smoothing, and peak analysis.

pub mod analyzer;
pub mod builder;
pub mod hue;
pub mod smoothing;

pub use analyzer::{HuePeak, average_rgb, find_dominant_hue, find_peak, to_rgb};
pub use builder::{HistogramBuilder, build};
pub use hue::{BUCKET_COUNT, BucketWrap, HueHistogram};
pub use smoothing::{MAX_SMOOTH_FACTOR, smooth};
