//! Shopping-list and error-metrics tables

use super::patient::{parse_name, parse_procedure_date, Patient};
use super::sheet::{compare_cells, Cell, Record};
use crate::error::ReportError;

/// Header row of the shopping list; electrode rows follow it
const HEADER_ROW: usize = 3;

const HEADER_REMAP: &[(&str, &str)] = &[
    ("Electrode label (\"aborted\" if skipped)", "Electrode label"),
    ("Label (6 chr)", "Label"),
];

pub const ELECTRODE_LABEL: &str = "Electrode label";
pub const SERIAL_NUMBER: &str = "Serial Num.";
pub const TARGET: &str = "Target";
const NUMBER: &str = "No.";
const ORDER: &str = "Ord.";
const ABORTED: &str = "aborted";

/// Column of the error-metrics sheet holding the electrode label
pub const METRICS_ELECTRODE: &str = "electrode";

/// Implantation shopping list: patient header plus electrode rows
#[derive(Debug, Clone)]
pub struct ShoppingList {
    pub patient: Patient,
    pub electrodes: Vec<Record>,
}

impl ShoppingList {
    /// Parse a raw sheet (no header inference) laid out as
    ///
    /// ```text
    /// row 0: ... | Name | <patient name> | ...
    /// row 1: ... | PIN  | <identifier>   | ...
    /// row 2: ... | Date | <date>         | ...
    /// row 3: column headers
    /// row 4..: one electrode per row
    /// ```
    pub fn from_grid(grid: &[Vec<Cell>]) -> Result<Self, ReportError> {
        let patient = parse_patient(grid)?;

        let headers: Vec<String> = grid
            .get(HEADER_ROW)
            .map(|row| row.iter().map(|c| remap_header(c.display().trim())).collect())
            .unwrap_or_default();

        let mut rows: Vec<Vec<Cell>> = grid.iter().skip(HEADER_ROW + 1).cloned().collect();
        for row in rows.iter_mut() {
            row.resize(headers.len(), Cell::Empty);
        }
        let column = |name: &str| headers.iter().position(|h| h == name);

        let aborted_column = column(ELECTRODE_LABEL).or_else(|| column(SERIAL_NUMBER));
        if let Some(idx) = aborted_column {
            rows.retain(|row| row[idx].as_text() != Some(ABORTED));
        }

        let target = column(TARGET).ok_or_else(|| ReportError::MissingColumn(TARGET.into()))?;
        let number = column(NUMBER).ok_or_else(|| ReportError::MissingColumn(NUMBER.into()))?;

        // the electrode list ends at the first row without a target
        if let Some(end) = rows.iter().position(|row| row[target].is_empty()) {
            rows.truncate(end);
        }
        rows.retain(|row| !row[number].is_empty() && !row[target].is_empty());

        let kept_columns: Vec<usize> = (0..headers.len())
            .filter(|&idx| !headers[idx].is_empty())
            .filter(|&idx| rows.iter().any(|row| !row[idx].is_empty()))
            .collect();

        if let Some(order) = column(ORDER).filter(|idx| kept_columns.contains(idx)) {
            if rows.iter().all(|row| !row[order].is_empty()) {
                rows.sort_by(|a, b| compare_cells(&a[order], &b[order]));
            }
        }

        let electrodes = rows
            .into_iter()
            .map(|row| {
                Record::new(
                    kept_columns
                        .iter()
                        .map(|&idx| (headers[idx].clone(), row[idx].clone()))
                        .collect(),
                )
            })
            .collect();

        Ok(Self {
            patient,
            electrodes,
        })
    }
}

fn remap_header(raw: &str) -> String {
    HEADER_REMAP
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Cell to the right of the first `key` cell in `row`
fn value_after<'a>(grid: &'a [Vec<Cell>], row: usize, key: &str) -> Option<&'a Cell> {
    let cells = grid.get(row)?;
    let idx = cells.iter().position(|c| c.as_text() == Some(key))?;
    cells.get(idx + 1).filter(|c| !c.is_empty())
}

fn parse_patient(grid: &[Vec<Cell>]) -> Result<Patient, ReportError> {
    let mut patient = Patient::default();

    if let Some(name) = value_after(grid, 0, "Name") {
        let (last, first) = parse_name(&name.display())?;
        patient.lastname = last;
        patient.firstname = first;
    }
    if let Some(pin) = value_after(grid, 1, "PIN") {
        patient.pin = pin.display();
    }
    if let Some(date) = value_after(grid, 2, "Date") {
        patient.procedure_date = parse_procedure_date(date)?;
    }

    Ok(patient)
}

/// Per-electrode placement errors, one row per electrode
#[derive(Debug, Clone)]
pub struct ErrorMetrics {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    electrode_column: usize,
}

impl ErrorMetrics {
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Result<Self, ReportError> {
        let electrode_column = headers
            .iter()
            .position(|h| h == METRICS_ELECTRODE)
            .ok_or_else(|| ReportError::MissingColumn(METRICS_ELECTRODE.to_string()))?;
        for row in rows.iter_mut() {
            row.resize(headers.len(), Cell::Empty);
        }

        Ok(Self {
            headers,
            rows,
            electrode_column,
        })
    }

    /// Electrode label of every row, in row order
    pub fn electrodes(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row[self.electrode_column].display())
            .collect()
    }

    /// Rows as electrode records, used when there is no shopping list
    pub fn as_electrode_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Record::new(
                    self.headers
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned())
                        .collect(),
                );
                record.rename(METRICS_ELECTRODE, ELECTRODE_LABEL);
                record
            })
            .collect()
    }
}
