use crate::error::CropError;
use image::RgbImage;
use resvg::{tiny_skia, usvg};
use std::path::Path;
use std::sync::Arc;

/// Renders SVG documents at their intrinsic size
///
/// System fonts are loaded once, so a single rasterizer should be reused
/// across a batch.
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Rasterizer {
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::debug!("Loaded {} font faces", fontdb.len());
        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    fn options(&self, resources_dir: Option<&Path>) -> usvg::Options<'static> {
        usvg::Options {
            resources_dir: resources_dir.map(Path::to_path_buf),
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        }
    }

    /// Render an SVG document to an RGB raster
    ///
    /// Relative references (e.g. `<image href="plot.png">`) resolve against
    /// `resources_dir`. Transparent areas come out black; alpha is dropped
    /// after demultiplying.
    pub fn apply(&self, data: &[u8], resources_dir: Option<&Path>) -> Result<RgbImage, CropError> {
        let tree = usvg::Tree::from_data(data, &self.options(resources_dir))
            .map_err(|e| CropError::Rasterization(e.to_string()))?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            CropError::Rasterization(format!(
                "Invalid canvas size {}x{}",
                size.width(),
                size.height()
            ))
        })?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let mut buf = Vec::with_capacity(pixmap.pixels().len() * 3);
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            buf.extend_from_slice(&[color.red(), color.green(), color.blue()]);
        }

        RgbImage::from_raw(pixmap.width(), pixmap.height(), buf).ok_or_else(|| {
            CropError::Rasterization("Rendered buffer does not match canvas size".to_string())
        })
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}
