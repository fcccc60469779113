//! Individual crop steps

pub mod contours;
pub mod crop;
pub mod fill;
pub mod grayscale;
pub mod rasterize;
pub mod threshold;
