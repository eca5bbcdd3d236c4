//! Utility functions for image loading.
//!
//! This module provides the loader that decodes an image file and
//! normalizes it to 8-bit RGB before it enters the feature extractor, so
//! downstream code never special-cases channel count.

use crate::core::TriageError;
use image::RgbImage;

/// Loads an image from a file path and converts it to RgbImage.
///
/// Flattens alpha and expands grayscale so that every decoded image reaches
/// the extractor as 3-channel 8-bit RGB. No caching; the only side effect
/// is the file read.
///
/// # Arguments
///
/// * `path` - A reference to the path of the image file to load
///
/// # Returns
///
/// * `Ok(RgbImage)` - The loaded and converted RGB image
/// * `Err(TriageError)` - An error if the image could not be decoded
///
/// # Errors
///
/// Returns `TriageError::ImageLoad` if the file cannot be decoded as an
/// image in any format supported by the image crate.
pub fn load_image(path: &std::path::Path) -> Result<RgbImage, TriageError> {
    let img = image::open(path).map_err(TriageError::ImageLoad)?;
    Ok(img.to_rgb8())
}
