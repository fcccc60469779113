use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// A decoded spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Integer(i64),
    Date(NaiveDate),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Missing values, NaN and blank text all count as empty
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value of integer cells and of whole-number floats
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            Cell::Number(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(v) if v.is_nan() => String::new(),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", *v as i64),
            Cell::Number(v) => v.to_string(),
            Cell::Integer(i) => i.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Order used when sorting rows by a column: numbers first, then text
pub fn compare_cells(a: &Cell, b: &Cell) -> Ordering {
    fn numeric(c: &Cell) -> Option<f64> {
        match c {
            Cell::Number(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.display().cmp(&b.display()),
    }
}

/// One spreadsheet row keyed by column name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Cell)>,
}

impl Record {
    pub fn new(fields: Vec<(String, Cell)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    /// Lookup ignoring ASCII case of the column name
    pub fn get_ignore_case(&self, column: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, cell)| cell)
    }

    pub fn has_column_ignore_case(&self, column: &str) -> bool {
        self.get_ignore_case(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.fields.iter().map(|(_, cell)| cell)
    }

    pub fn rename(&mut self, from: &str, to: &str) {
        for (name, _) in self.fields.iter_mut().filter(|(name, _)| name == from) {
            *name = to.to_string();
        }
    }
}
