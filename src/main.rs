use clap::Parser;
use std::path::PathBuf;
use svgcrop::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "svgcrop")]
#[command(about = "Crop rendered SVG summaries to their largest bright region")]
#[command(version)]
pub struct Args {
    /// Glob pattern of SVG files to crop (files with "_red" in the name are skipped)
    #[arg(long, env = "SVGCROP_INPUT_GLOB")]
    pub input_glob: String,

    /// Output directory (default: "cropped" next to the matched files)
    #[arg(long, env = "SVGCROP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write a JSON summary of the batch to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let config = Config::from_glob(args.input_glob.clone());
        match &args.output_dir {
            Some(dir) => config.with_output_dir(dir),
            None => config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from(&args);

    tracing::info!("Starting svgcrop v{}", env!("CARGO_PKG_VERSION"));

    let summary = svgcrop::batch::run(&config)?;

    tracing::info!(
        "Done: {} cropped, {} failed, {} excluded",
        summary.processed.len(),
        summary.failed.len(),
        summary.skipped.len()
    );

    if let Some(path) = &args.summary {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        tracing::info!("Wrote summary to {}", path.display());
    }

    Ok(())
}
