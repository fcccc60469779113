use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("Failed to rasterize SVG: {0}")]
    Rasterization(String),

    #[error("No foreground region found in {}", path.display())]
    NoForeground { path: PathBuf },

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CropError {
    /// Errors that stop the whole batch rather than a single file
    pub fn is_fatal(&self) -> bool {
        matches!(self, CropError::OutputDir { .. } | CropError::Pattern(_))
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unrecognized procedure date: {0}")]
    InvalidDate(String),

    #[error("Unrecognized patient name: {0}")]
    InvalidName(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Workbook has no worksheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize deck: {0}")]
    Json(#[from] serde_json::Error),
}
