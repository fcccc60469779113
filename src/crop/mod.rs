//! SVG rasterize-and-crop pipeline
//!
//! Renders an SVG, thresholds its luminance at a fraction of the brightest
//! sample, and crops the raster to the largest connected bright region.

pub mod pipeline;
pub mod steps;

pub use pipeline::{crop_raster, output_path, CropOutcome, CroppedRaster, Pipeline, StepTiming};
pub use steps::contours::{BoundingRect, ForegroundRegion};
