use crate::config::Config;
use crate::crop::{CropOutcome, Pipeline};
use crate::error::CropError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Marker in a file name that excludes it from cropping
const EXCLUDE_MARKER: &str = "_red";

/// A file the batch could not crop
#[derive(Debug, Clone, Serialize)]
pub struct FailedImage {
    pub source: PathBuf,
    pub error: String,
}

/// Everything a batch run did
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub output_dir: PathBuf,
    pub processed: Vec<CropOutcome>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedImage>,
}

/// Whether a file is left out of the batch (`_red` anywhere in its name)
pub fn is_excluded(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().contains(EXCLUDE_MARKER))
        .unwrap_or(false)
}

/// Crop every file matched by the configured glob
///
/// The output directory is created before any file is touched; failing to
/// create it, or an invalid pattern, aborts the batch. Per-file failures are
/// logged and recorded, and the remaining files are still processed.
pub fn run(config: &Config) -> Result<BatchSummary, CropError> {
    std::fs::create_dir_all(&config.output_dir).map_err(|source| CropError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let (inputs, skipped) = collect_inputs(&config.input_glob)?;
    tracing::info!(
        "Cropping {} file(s) into {} ({} excluded)",
        inputs.len(),
        config.output_dir.display(),
        skipped.len()
    );

    let pipeline = Pipeline::new();
    let mut processed = Vec::new();
    let mut failed = Vec::new();

    for source in inputs {
        match pipeline.process_image(&source, &config.output_dir) {
            Ok(outcome) => {
                tracing::info!(
                    "Cropped {} -> {} ({}x{}) in {}ms",
                    source.display(),
                    outcome.output.display(),
                    outcome.bounds.width,
                    outcome.bounds.height,
                    outcome.total_time_ms
                );
                processed.push(outcome);
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", source.display(), e);
                failed.push(FailedImage {
                    source,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(BatchSummary {
        output_dir: config.output_dir.clone(),
        processed,
        skipped,
        failed,
    })
}

/// Expand the pattern into (files to crop, excluded files), both sorted
fn collect_inputs(pattern: &str) -> Result<(Vec<PathBuf>, Vec<PathBuf>), CropError> {
    let mut inputs = Vec::new();
    let mut skipped = Vec::new();

    for entry in glob::glob(pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Unreadable input {}: {}", e.path().display(), e.error());
                continue;
            }
        };

        if !path.is_file() {
            continue;
        }

        if is_excluded(&path) {
            tracing::debug!("Excluding {}", path.display());
            skipped.push(path);
        } else {
            inputs.push(path);
        }
    }

    inputs.sort();
    skipped.sort();
    Ok((inputs, skipped))
}
