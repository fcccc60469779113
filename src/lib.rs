//! Batch tooling for rendered SEEG summary images
//!
//! - [`crop`]: rasterize an SVG and crop it to its largest bright region
//! - [`batch`]: run the crop over every file matched by a glob pattern
//! - [`report`]: assemble the electrode report deck from the implantation workbooks

pub mod batch;
pub mod config;
pub mod crop;
pub mod error;
pub mod report;

pub use batch::{is_excluded, BatchSummary, FailedImage};
pub use config::{Config, ReportConfig};
pub use crop::{crop_raster, CropOutcome, Pipeline};
pub use error::{CropError, ReportError};
