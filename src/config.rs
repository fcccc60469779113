use std::path::{Path, PathBuf};

/// Name of the directory that receives cropped images by default
pub const DEFAULT_OUTPUT_SUBDIR: &str = "cropped";

/// Batch configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Glob pattern selecting the SVG inputs, e.g. `summaries/*.svg`
    pub input_glob: String,
    /// Destination directory for cropped PNGs
    pub output_dir: PathBuf,
}

impl Config {
    /// Build a config whose output directory sits next to the matched files
    pub fn from_glob(input_glob: impl Into<String>) -> Self {
        let input_glob = input_glob.into();
        let output_dir = default_output_dir(&input_glob);
        Self {
            input_glob,
            output_dir,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

/// `<directory of the pattern>/cropped`
pub fn default_output_dir(input_glob: &str) -> PathBuf {
    let parent = Path::new(input_glob)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    parent.join(DEFAULT_OUTPUT_SUBDIR)
}

/// Report assembly configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Glob pattern of the shopping-list workbook; the first match is used
    pub shopping_list: Option<String>,
    /// Error-metrics workbook, used when the file exists
    pub error_metrics: Option<PathBuf>,
    /// Directory that receives the deck
    pub output_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir_is_beside_inputs() {
        let config = Config::from_glob("/data/sub-P159/summaries/*.svg");
        assert_eq!(
            config.output_dir,
            PathBuf::from("/data/sub-P159/summaries/cropped")
        );
    }

    #[test]
    fn test_bare_pattern_uses_current_dir() {
        assert_eq!(default_output_dir("*.svg"), PathBuf::from("./cropped"));
    }

    #[test]
    fn test_explicit_output_dir_wins() {
        let config = Config::from_glob("in/*.svg").with_output_dir("/tmp/out");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.input_glob, "in/*.svg");
    }
}
