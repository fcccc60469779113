use crate::error::CropError;
use image::RgbImage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::steps::{self, contours::BoundingRect, contours::ForegroundRegion, rasterize::Rasterizer};

/// Timing information for a single crop step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of cropping one SVG
#[derive(Debug, Clone, Serialize)]
pub struct CropOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Size of the uncropped raster
    pub raster_width: u32,
    pub raster_height: u32,
    /// Bounds of the kept region within the raster
    pub bounds: BoundingRect,
    pub area: f64,
    pub total_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Cropped raster together with the region it was cut to
#[derive(Debug, Clone)]
pub struct CroppedRaster {
    pub image: RgbImage,
    pub region: ForegroundRegion,
}

/// Rasterize-threshold-contour-crop pipeline
pub struct Pipeline {
    rasterizer: Rasterizer,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            rasterizer: Rasterizer::new(),
        }
    }

    /// Crop `source` into `output_dir/<stem>.png`
    ///
    /// The uncropped raster is written first and then overwritten with the
    /// crop. When no foreground is found the uncropped raster stays on disk.
    pub fn process_image(&self, source: &Path, output_dir: &Path) -> Result<CropOutcome, CropError> {
        let start = Instant::now();
        let mut timings = Vec::new();
        let output = output_path(source, output_dir);

        let data = std::fs::read(source)?;
        let raster = run_step("rasterize", &mut timings, || {
            self.rasterizer.apply(&data, source.parent())
        })?;
        run_step("write_raster", &mut timings, || raster.save(&output))?;

        let cropped = crop_with_timings(&raster, &mut timings).ok_or_else(|| {
            CropError::NoForeground {
                path: source.to_path_buf(),
            }
        })?;

        run_step("write_crop", &mut timings, || cropped.image.save(&output))?;

        Ok(CropOutcome {
            source: source.to_path_buf(),
            output,
            raster_width: raster.width(),
            raster_height: raster.height(),
            bounds: cropped.region.bounds,
            area: cropped.region.area,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: timings,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Crop a raster to its largest bright region
/// Returns `None` when the thresholded mask is empty
pub fn crop_raster(raster: &RgbImage) -> Option<CroppedRaster> {
    let mut timings = Vec::new();
    crop_with_timings(raster, &mut timings)
}

fn crop_with_timings(raster: &RgbImage, timings: &mut Vec<StepTiming>) -> Option<CroppedRaster> {
    let gray = timed("grayscale", timings, || steps::grayscale::apply(raster));
    let mask = timed("threshold", timings, || steps::threshold::apply(&gray));
    let contours = timed("contours", timings, || steps::contours::external(&mask));
    let region = timed("select", timings, || steps::contours::select_largest(contours))?;
    let filled = timed("fill", timings, || {
        steps::fill::apply(raster.width(), raster.height(), &region.contour)
    });
    let image = timed("crop", timings, || {
        steps::crop::apply(raster, &filled, region.bounds)
    });

    tracing::debug!(
        "Selected region at ({}, {}) {}x{}, area {}",
        region.bounds.x,
        region.bounds.y,
        region.bounds.width,
        region.bounds.height,
        region.area
    );

    Some(CroppedRaster { image, region })
}

/// `output_dir/<file stem>.png`
pub fn output_path(source: &Path, output_dir: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or(source.as_os_str());
    let mut output = output_dir.join(stem);
    output.set_extension("png");
    output
}

fn timed<T, F>(name: &str, timings: &mut Vec<StepTiming>, step_fn: F) -> T
where
    F: FnOnce() -> T,
{
    let step_start = Instant::now();
    let result = step_fn();
    timings.push(StepTiming {
        name: name.to_string(),
        time_ms: step_start.elapsed().as_millis() as u64,
    });
    result
}

fn run_step<T, E, F>(name: &str, timings: &mut Vec<StepTiming>, step_fn: F) -> Result<T, CropError>
where
    F: FnOnce() -> Result<T, E>,
    CropError: From<E>,
{
    Ok(timed(name, timings, step_fn)?)
}
