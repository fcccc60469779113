use clap::Parser;
use std::path::PathBuf;
use svgcrop::ReportConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "svgcrop-report")]
#[command(about = "Assemble the electrode report deck from the shopping list and error metrics")]
#[command(version)]
pub struct Args {
    /// Glob pattern of the shopping-list workbook (first match is used)
    #[arg(long, env = "SVGCROP_SHOPPING_LIST")]
    pub shopping_list: Option<String>,

    /// Error-metrics workbook (skipped when the file does not exist)
    #[arg(long, env = "SVGCROP_ERROR_METRICS")]
    pub error_metrics: Option<PathBuf>,

    /// Directory that receives the deck
    #[arg(long, env = "SVGCROP_REPORT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl From<&Args> for ReportConfig {
    fn from(args: &Args) -> Self {
        Self {
            shopping_list: args.shopping_list.clone(),
            error_metrics: args.error_metrics.clone(),
            output_dir: args.output_dir.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    svgcrop::report::run(&ReportConfig::from(&args))?;

    Ok(())
}
