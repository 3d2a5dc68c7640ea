//! Dominant color calculation — configuration and the end-to-end pipeline.

pub mod calculate;
pub mod params;

pub use calculate::{DominantColorCalculator, DominantColorReport, calculate};
pub use params::{CalculatorConfig, Strategy};
