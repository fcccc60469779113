//! Associating electrode records with error-metric rows
//!
//! Rules are tried in order and the first rule that finds a row wins; within
//! a rule the first matching row wins. All comparisons ignore case.
//!
//! 1. exact label: the record's `Label` equals the row's electrode
//! 2. parenthesized suffix: the record name contains `(<electrode>)`
//! 3. prefix: the record name starts with the electrode
//!
//! The record name is its `Target`, or its electrode label when it has no
//! target column.

use super::inputs::{ELECTRODE_LABEL, TARGET};
use super::sheet::Record;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchRule {
    ExactLabel,
    ParenthesizedSuffix,
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorMatch {
    pub row: usize,
    pub rule: MatchRule,
}

/// Find the error row for an electrode record
pub fn match_error_row(record: &Record, electrodes: &[String]) -> Option<ErrorMatch> {
    let label = record
        .get_ignore_case("label")
        .map(|c| c.display().trim().to_lowercase())
        .filter(|l| !l.is_empty());
    let name = record_name(record).map(|n| n.trim().to_lowercase());

    let candidates: Vec<(usize, String)> = electrodes
        .iter()
        .enumerate()
        .map(|(i, e)| (i, e.trim().to_lowercase()))
        .filter(|(_, e)| !e.is_empty())
        .collect();

    let first = |rule: MatchRule, pred: &dyn Fn(&str) -> bool| {
        candidates
            .iter()
            .find(|(_, e)| pred(e.as_str()))
            .map(|(row, _)| ErrorMatch { row: *row, rule })
    };

    if let Some(label) = &label {
        if let Some(m) = first(MatchRule::ExactLabel, &|e: &str| e == label.as_str()) {
            return Some(m);
        }
    }

    let name = name?;
    first(MatchRule::ParenthesizedSuffix, &|e: &str| {
        name.contains(&format!("({})", e))
    })
    .or_else(|| first(MatchRule::Prefix, &|e: &str| name.starts_with(e)))
}

fn record_name(record: &Record) -> Option<String> {
    let cell = record.get_ignore_case(TARGET).or_else(|| {
        record
            .columns()
            .find(|c| c.contains(ELECTRODE_LABEL))
            .and_then(|c| record.get(c))
    })?;
    Some(cell.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::sheet::Cell;

    fn record(fields: &[(&str, &str)]) -> Record {
        Record::new(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), Cell::text(*v)))
                .collect(),
        )
    }

    fn electrodes(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_label_wins_over_other_rules() {
        let rec = record(&[("Target", "RAH (RPH)"), ("Label", "rah")]);
        let m = match_error_row(&rec, &electrodes(&["RPH", "RA", "RAH"])).unwrap();
        assert_eq!(
            m,
            ErrorMatch {
                row: 2,
                rule: MatchRule::ExactLabel
            }
        );
    }

    #[test]
    fn test_parenthesized_before_prefix() {
        let rec = record(&[("Target", "Right amygdala (RA)")]);
        let m = match_error_row(&rec, &electrodes(&["Ri", "RA"])).unwrap();
        assert_eq!(m.row, 1);
        assert_eq!(m.rule, MatchRule::ParenthesizedSuffix);
    }

    #[test]
    fn test_prefix_match() {
        let rec = record(&[("Electrode label", "LHc-anterior")]);
        let m = match_error_row(&rec, &electrodes(&["RHc", "lhc"])).unwrap();
        assert_eq!(m.row, 1);
        assert_eq!(m.rule, MatchRule::Prefix);
    }

    #[test]
    fn test_label_without_exact_match_falls_back_to_target() {
        let rec = record(&[("Target", "Insula (LI)"), ("Label", "LINS")]);
        let m = match_error_row(&rec, &electrodes(&["LA", "LI"])).unwrap();
        assert_eq!(m.row, 1);
        assert_eq!(m.rule, MatchRule::ParenthesizedSuffix);
    }

    #[test]
    fn test_first_row_wins_within_rule() {
        let rec = record(&[("Target", "RAH anterior")]);
        let m = match_error_row(&rec, &electrodes(&["RA", "RAH"])).unwrap();
        assert_eq!(m.row, 0);
    }

    #[test]
    fn test_no_match() {
        let rec = record(&[("Target", "Cingulate")]);
        assert!(match_error_row(&rec, &electrodes(&["RA", "", "LH"])).is_none());
    }

    #[test]
    fn test_blank_electrodes_never_match() {
        let rec = record(&[("Target", "Anything")]);
        assert!(match_error_row(&rec, &electrodes(&["", "  "])).is_none());
    }
}
