//! Image cleanup before OCR.
//!
//! Grayscale conversion, optional upscaling, median denoising and adaptive
//! binarization, driven by [`PreprocessConfig`].

use crate::config::PreprocessConfig;
use crate::error::Result;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use imageproc::contrast::adaptive_threshold;
use imageproc::filter::median_filter;

/// Preprocess a page raster for recognition.
///
/// Returns a binarized grayscale image. The configuration is validated first.
pub fn preprocess(image: &DynamicImage, config: &PreprocessConfig) -> Result<DynamicImage> {
    config.validate()?;

    let mut gray: GrayImage = image.to_luma8();

    if config.upscale_percent != 100 {
        let width = scaled(gray.width(), config.upscale_percent);
        let height = scaled(gray.height(), config.upscale_percent);
        gray = imageops::resize(&gray, width, height, FilterType::Triangle);
    }

    let radius = denoise_radius(config.denoise_strength);
    if radius > 0 {
        gray = median_filter(&gray, radius, radius);
    }

    let binary = adaptive_threshold(&gray, config.block_size / 2);
    log::debug!(
        "Preprocessed {}x{} raster to {}x{}",
        image.width(),
        image.height(),
        binary.width(),
        binary.height()
    );
    Ok(DynamicImage::ImageLuma8(binary))
}

fn scaled(dimension: u32, percent: u32) -> u32 {
    ((dimension as u64 * percent as u64) / 100).max(1) as u32
}

/// Median filter radius for a denoising strength (30 per pixel of radius).
fn denoise_radius(strength: u32) -> u32 {
    (strength + 29) / 30
}
