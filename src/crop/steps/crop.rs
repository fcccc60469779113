use super::contours::BoundingRect;
use image::{imageops, GrayImage, Rgb, RgbImage};

/// Black out everything outside the mask, then slice to the bounds
pub fn apply(raster: &RgbImage, mask: &GrayImage, bounds: BoundingRect) -> RgbImage {
    let mut masked = raster.clone();
    for (pixel, m) in masked.pixels_mut().zip(mask.pixels()) {
        if m.0[0] == 0 {
            *pixel = Rgb([0, 0, 0]);
        }
    }

    imageops::crop_imm(&masked, bounds.x, bounds.y, bounds.width, bounds.height).to_image()
}
