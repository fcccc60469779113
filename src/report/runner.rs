use super::deck::{assemble, write_deck};
use super::workbook::{find_shopping_list, load_error_metrics, load_shopping_list};
use crate::config::ReportConfig;
use crate::error::ReportError;
use std::path::PathBuf;

/// Assemble the deck from whichever workbooks exist and write it
///
/// A shopping-list pattern with no match, or an error-metrics path that does
/// not exist, just leaves that input out. Returns the deck's path.
pub fn run(config: &ReportConfig) -> Result<PathBuf, ReportError> {
    let shopping_list = match &config.shopping_list {
        Some(pattern) => match find_shopping_list(pattern)? {
            Some(path) => {
                tracing::info!("Reading shopping list {}", path.display());
                Some(load_shopping_list(&path)?)
            }
            None => {
                tracing::warn!("No shopping list matches {}", pattern);
                None
            }
        },
        None => None,
    };

    let metrics = match &config.error_metrics {
        Some(path) if path.is_file() => {
            tracing::info!("Reading error metrics {}", path.display());
            Some(load_error_metrics(path)?)
        }
        Some(path) => {
            tracing::warn!("No error metrics at {}", path.display());
            None
        }
        None => None,
    };

    let deck = assemble(shopping_list.as_ref(), metrics.as_ref());
    let path = write_deck(&deck, &config.output_dir)?;
    tracing::info!("Wrote report to {}", path.display());
    Ok(path)
}
