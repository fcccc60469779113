use image::{GrayImage, Luma};

/// Fraction of the brightest sample below which pixels count as background
pub const THRESHOLD_FRACTION: f64 = 0.05;

/// Threshold level for an image: `0.05 × max(gray)`
pub fn level(gray: &GrayImage) -> f64 {
    let max = gray.pixels().map(|p| p.0[0]).max().unwrap_or(0);
    THRESHOLD_FRACTION * max as f64
}

/// Zero every pixel strictly below the threshold level
/// Pixels at or above the level keep their grayscale value
pub fn apply(gray: &GrayImage) -> GrayImage {
    let level = level(gray);
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y).0[0];
        if (value as f64) < level {
            Luma([0u8])
        } else {
            Luma([value])
        }
    })
}
