use super::sheet::Cell;
use crate::error::ReportError;
use chrono::NaiveDate;
use serde::Serialize;

/// Patient details shown on the title slide
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub lastname: String,
    pub firstname: String,
    pub pin: String,
    /// `%Y-%m-%d`, or the `yyyy-mm-dd` placeholder when unknown
    pub procedure_date: String,
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            lastname: "lastname".to_string(),
            firstname: "firstname".to_string(),
            pin: "PIN".to_string(),
            procedure_date: "yyyy-mm-dd".to_string(),
        }
    }
}

impl Patient {
    /// `<lastname without spaces>_<firstname>_<date>_maps.json`
    pub fn deck_file_name(&self) -> String {
        format!(
            "{}_{}_{}_maps.json",
            self.lastname.replace(' ', ""),
            self.firstname,
            self.procedure_date
        )
    }
}

/// Split a patient name into `(lastname, firstname)`
///
/// `"Last, First"` splits on the comma, anything else is read as
/// `"First Last"` split on the first space.
pub fn parse_name(raw: &str) -> Result<(String, String), ReportError> {
    let (last, first) = if let Some((last, first)) = raw.split_once(',') {
        (last, first)
    } else if let Some((first, last)) = raw.trim().split_once(' ') {
        (last, first)
    } else {
        return Err(ReportError::InvalidName(raw.to_string()));
    };

    Ok((last.trim().to_string(), first.trim().to_string()))
}

/// Normalize the procedure date cell to `%Y-%m-%d`
///
/// Accepts date cells, `2024_02_26` and `26/Feb/24`.
pub fn parse_procedure_date(cell: &Cell) -> Result<String, ReportError> {
    let date = match cell {
        Cell::Date(d) => *d,
        Cell::Text(s) => {
            let s = s.trim();
            let format = if s.contains('_') { "%Y_%m_%d" } else { "%d/%b/%y" };
            NaiveDate::parse_from_str(s, format)
                .map_err(|_| ReportError::InvalidDate(s.to_string()))?
        }
        other => return Err(ReportError::InvalidDate(other.display())),
    };

    Ok(date.format("%Y-%m-%d").to_string())
}
