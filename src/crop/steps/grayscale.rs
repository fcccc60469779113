use image::{imageops, GrayImage, RgbImage};

/// Convert the raster to single-channel luminance
pub fn apply(raster: &RgbImage) -> GrayImage {
    imageops::grayscale(raster)
}
