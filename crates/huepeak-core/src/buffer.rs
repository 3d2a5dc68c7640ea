//! Pixel buffer handed to the dominant color pipeline.

use crate::color::RgbColor;
use crate::error::{HuepeakError, Result};

/// Immutable row-major grid of RGB pixels, each channel normalized to `[0, 1]`.
///
/// The buffer is produced by the caller from an already decoded image; the
/// pipeline only ever reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl PixelBuffer {
    /// Wrap row-major pixel data. Fails if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 3]>) -> Result<Self> {
        if pixels.len() != area(width, height) {
            return Err(HuepeakError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Buffer where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: RgbColor) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.to_array(); area(width, height)],
        }
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> RgbColor) -> Self {
        let mut pixels = Vec::with_capacity(area(width, height));
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y).to_array());
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Copy from interleaved `r, g, b, r, g, b, ...` samples.
    pub fn from_flat(width: u32, height: u32, data: &[f32]) -> Result<Self> {
        let pixels: &[[f32; 3]] = bytemuck::try_cast_slice(data).map_err(|e| {
            HuepeakError::invalid_argument(
                "data",
                format!("{} samples cannot form RGB triples: {e}", data.len()),
            )
        })?;
        Self::new(width, height, pixels.to_vec())
    }

    /// Convert a decoded image of any color type to normalized RGB.
    ///
    /// Integer formats are scaled into `[0, 1]`; alpha is dropped.
    pub fn from_dynamic_image(image: &image::DynamicImage) -> Self {
        Self::from(&image.to_rgb32f())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True for a zero-area buffer.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<RgbColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().map(RgbColor::from)
    }

    /// Raw row-major pixel data.
    pub fn pixels(&self) -> &[[f32; 3]] {
        &self.pixels
    }

    /// One row of pixels, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[[f32; 3]]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.pixels.get(start..start + self.width as usize)
    }

    /// Iterate over all pixels as colors.
    pub fn colors(&self) -> impl Iterator<Item = RgbColor> + '_ {
        self.pixels.iter().copied().map(RgbColor::from)
    }
}

impl From<&image::Rgb32FImage> for PixelBuffer {
    fn from(image: &image::Rgb32FImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
