//! Feature extraction from raster images.
//!
//! This module computes the fixed feature vector that is the sole input to
//! classification: four color-mask ratios, average brightness, grayscale
//! texture variance, and edge density. All quantities are exact statistics
//! of the pixel grid; rounding happens only when features are rendered into
//! diagnostic details.

use image::RgbImage;

/// Perceptual luminance weights (ITU-R BT.601).
///
/// These must match the reference outputs exactly, so they are spelled out
/// rather than delegated to a grayscale conversion routine.
const LUMA_R: f64 = 0.2989;
const LUMA_G: f64 = 0.5870;
const LUMA_B: f64 = 0.1140;

/// Fixed-size numeric summary of an image's color/texture/edge statistics.
///
/// Produced once per image by [`extract_features`] and consumed by the
/// classification engine; optionally retained in a prediction's diagnostic
/// details.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Fraction of pixels satisfying the green (vegetation) mask.
    pub green_ratio: f64,
    /// Fraction of pixels satisfying the brown (bare soil) mask.
    pub brown_ratio: f64,
    /// Fraction of pixels satisfying the blue (water) mask.
    pub blue_ratio: f64,
    /// Fraction of pixels satisfying the gray (artificial surface) mask.
    pub gray_ratio: f64,
    /// Mean of (R+G+B)/3 over all pixels, on a 0-255 scale.
    pub average_brightness: f64,
    /// Population variance of the per-pixel luminance field.
    pub texture_variance: f64,
    /// Mean of |d(luminance)/dx| + |d(luminance)/dy| over all pixels.
    pub edge_density: f64,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Computes the feature vector for an RGB image.
///
/// Channel values are promoted to `i32` before mask comparisons (so the
/// threshold arithmetic can never wrap) and to `f64` before the ratio, mean,
/// and variance computations.
pub fn extract_features(img: &RgbImage) -> FeatureVector {
    let (width, height) = img.dimensions();
    let total = (width as usize) * (height as usize);

    let mut green_count = 0usize;
    let mut brown_count = 0usize;
    let mut blue_count = 0usize;
    let mut gray_count = 0usize;
    let mut brightness_sum = 0.0f64;

    // Row-major luminance field, reused for variance and gradients.
    let mut luminance = Vec::with_capacity(total);

    for pixel in img.pixels() {
        let r = pixel.0[0] as i32;
        let g = pixel.0[1] as i32;
        let b = pixel.0[2] as i32;

        if g > r + 20 && g > b + 10 && g > 80 {
            green_count += 1;
        }
        if r > 100 && g > 60 && b < 80 && r > g && g > b {
            brown_count += 1;
        }
        if b > r + 15 && b > g + 10 && b > 60 {
            blue_count += 1;
        }
        if (r - g).abs() < 20 && (g - b).abs() < 20 && (r - b).abs() < 20 {
            gray_count += 1;
        }

        brightness_sum += (r + g + b) as f64 / 3.0;
        luminance.push(LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64);
    }

    let total_f = total as f64;

    FeatureVector {
        green_ratio: green_count as f64 / total_f,
        brown_ratio: brown_count as f64 / total_f,
        blue_ratio: blue_count as f64 / total_f,
        gray_ratio: gray_count as f64 / total_f,
        average_brightness: brightness_sum / total_f,
        texture_variance: population_variance(&luminance),
        edge_density: edge_density(&luminance, width as usize, height as usize),
        width,
        height,
    }
}

/// Population variance (mean squared deviation) of a field of values.
fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Mean gradient magnitude of the luminance field.
///
/// Discrete derivatives use central differences in the interior and
/// one-sided differences at the first and last row/column. Axes of length 1
/// contribute a zero derivative.
fn edge_density(luminance: &[f64], width: usize, height: usize) -> f64 {
    if width == 0 || height == 0 {
        return 0.0;
    }

    let at = |x: usize, y: usize| luminance[y * width + x];
    let mut gradient_sum = 0.0f64;

    for y in 0..height {
        for x in 0..width {
            let gx = if width < 2 {
                0.0
            } else if x == 0 {
                at(1, y) - at(0, y)
            } else if x == width - 1 {
                at(width - 1, y) - at(width - 2, y)
            } else {
                (at(x + 1, y) - at(x - 1, y)) / 2.0
            };

            let gy = if height < 2 {
                0.0
            } else if y == 0 {
                at(x, 1) - at(x, 0)
            } else if y == height - 1 {
                at(x, height - 1) - at(x, height - 2)
            } else {
                (at(x, y + 1) - at(x, y - 1)) / 2.0
            };

            gradient_sum += gx.abs() + gy.abs();
        }
    }

    gradient_sum / (width * height) as f64
}
