//! Workbook decoding into cell grids

use super::inputs::{ErrorMetrics, ShoppingList};
use super::sheet::Cell;
use crate::error::ReportError;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// First worksheet of `path`, anchored at A1
///
/// Leading blank rows and columns are kept as empty cells so row and column
/// indices match the sheet.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<Cell>>, ReportError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::EmptyWorkbook(path.to_path_buf()))??;

    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut grid = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(decode_cell));
        grid.push(cells);
    }

    tracing::debug!("Read {} rows from {}", grid.len(), path.display());
    Ok(grid)
}

fn decode_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Integer(*i),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| Cell::Date(d.date()))
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// First file matching `pattern` in path order, if any
pub fn find_shopping_list(pattern: &str) -> Result<Option<PathBuf>, ReportError> {
    let mut matches: Vec<PathBuf> = glob::glob(pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Unreadable match for {}: {}", pattern, e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    matches.sort();
    Ok(matches.into_iter().next())
}

pub fn load_shopping_list(path: &Path) -> Result<ShoppingList, ReportError> {
    ShoppingList::from_grid(&read_grid(path)?)
}

/// Error metrics sheet: first non-blank row holds the headers
pub fn load_error_metrics(path: &Path) -> Result<ErrorMetrics, ReportError> {
    let mut rows = read_grid(path)?
        .into_iter()
        .skip_while(|row| row.iter().all(Cell::is_empty));

    let headers = rows
        .next()
        .unwrap_or_default()
        .iter()
        .map(|c| c.display().trim().to_string())
        .collect();

    ErrorMetrics::new(headers, rows.collect())
}
