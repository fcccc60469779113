use super::inputs::{ErrorMetrics, ShoppingList, ELECTRODE_LABEL, TARGET};
use super::matching::{match_error_row, ErrorMatch};
use super::patient::Patient;
use super::sheet::{Cell, Record};
use super::style::{error_band, label_chip, Color, LabelChip};
use crate::error::ReportError;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const SLIDE_WIDTH_IN: f32 = 16.0;
pub const SLIDE_HEIGHT_IN: f32 = 9.0;

const TABLE_WIDTH_IN: f32 = 13.0;
const ERRORS_TABLE_HEIGHT_IN: f32 = 5.0;
const ELECTRODE_TABLE_HEIGHT_IN: f32 = 1.25;
const ERROR_FILL_BRIGHTNESS: f32 = 0.4;
/// Error tables that carry an implanter column have this many columns
const COLUMNS_WITH_IMPLANTER: usize = 8;

const SKIP_MARKERS: &[&str] = &["skipped", "aborted"];

/// Position and size in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

const SLIDE_TITLE: Rect = Rect::new(3.0, 0.5, 10.0, 1.0);
const CHIP: Rect = Rect::new(13.5, 4.5, 2.0, 0.5);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBox {
    pub text: String,
    pub font_size_pt: u32,
    pub color: Color,
    pub position: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chip {
    #[serde(flatten)]
    pub label: LabelChip,
    pub font_size_pt: u32,
    pub border_width_in: f32,
    pub position: Rect,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableCell {
    pub text: String,
    pub bold: bool,
    pub centered: bool,
    pub text_color: Option<Color>,
    pub fill: Option<Color>,
    pub brightness: Option<f32>,
}

impl TableCell {
    fn heading(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
            centered: true,
            text_color: Some(Color::WHITE),
            fill: Some(Color::DARK_GRAY),
            brightness: None,
        }
    }

    fn value(cell: &Cell) -> Self {
        match cell {
            Cell::Text(s) => Self {
                text: s.clone(),
                bold: true,
                text_color: Some(Color::WHITE),
                fill: Some(Color::DARK_GRAY),
                ..Default::default()
            },
            Cell::Number(v) if !v.is_nan() => Self {
                text: format!("{:.2}", v),
                centered: true,
                fill: Some(error_band(*v)),
                brightness: Some(ERROR_FILL_BRIGHTNESS),
                ..Default::default()
            },
            other => Self {
                text: other.display(),
                ..Default::default()
            },
        }
    }
}

/// Cells from `first` to `last` (inclusive, `(row, col)`) render as one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Merge {
    pub first: (usize, usize),
    pub last: (usize, usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideTable {
    pub position: Rect,
    pub rows: Vec<Vec<TableCell>>,
    pub merges: Vec<Merge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub name: String,
    pub background: Color,
    pub text_boxes: Vec<TextBox>,
    pub tables: Vec<SlideTable>,
    pub chip: Option<Chip>,
}

impl Slide {
    fn new(name: impl Into<String>, text_boxes: Vec<TextBox>) -> Self {
        Self {
            name: name.into(),
            background: Color::BLACK,
            text_boxes,
            tables: Vec::new(),
            chip: None,
        }
    }
}

/// The assembled report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    pub file_name: String,
    pub width_in: f32,
    pub height_in: f32,
    pub patient: Patient,
    pub slides: Vec<Slide>,
}

fn title(text: impl Into<String>, font_size_pt: u32, position: Rect) -> TextBox {
    TextBox {
        text: text.into(),
        font_size_pt,
        color: Color::WHITE,
        position,
    }
}

/// Build the report from whichever inputs are available
pub fn assemble(shopping_list: Option<&ShoppingList>, metrics: Option<&ErrorMetrics>) -> Deck {
    let patient = shopping_list
        .map(|list| list.patient.clone())
        .unwrap_or_default();

    let mut slides = vec![title_slide(&patient)];

    if shopping_list.is_some() {
        slides.push(Slide::new("shopping list", Vec::new()));
    }

    if let Some(metrics) = metrics {
        slides.push(errors_slide(metrics));
    }

    let records = match (shopping_list, metrics) {
        (Some(list), _) => list.electrodes.clone(),
        (None, Some(metrics)) => metrics.as_electrode_records(),
        (None, None) => Vec::new(),
    };

    let electrodes = metrics.map(|m| m.electrodes()).unwrap_or_default();
    for record in &records {
        if is_skipped(record) {
            tracing::debug!("Skipping aborted electrode {:?}", slide_title(record));
            continue;
        }
        let error_row = metrics.and_then(|_| match_error_row(record, &electrodes));
        slides.push(electrode_slide(record, metrics.zip(error_row)));
    }

    tracing::info!("Assembled report with {} slides", slides.len());

    Deck {
        file_name: patient.deck_file_name(),
        width_in: SLIDE_WIDTH_IN,
        height_in: SLIDE_HEIGHT_IN,
        patient,
        slides,
    }
}

/// Write the deck as pretty JSON into `dir`, returning the file path
pub fn write_deck(deck: &Deck, dir: &Path) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&deck.file_name);
    let json = serde_json::to_string_pretty(deck)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

fn title_slide(patient: &Patient) -> Slide {
    Slide::new(
        "title slide",
        vec![
            title(
                format!("{}, {}", patient.lastname, patient.firstname),
                52,
                Rect::new(3.0, 2.0, 10.0, 1.0),
            ),
            title(patient.pin.clone(), 36, Rect::new(5.0, 3.0, 6.0, 0.8)),
            title(
                format!("Implantation Date:\n{}", patient.procedure_date),
                36,
                Rect::new(5.0, 4.5, 6.0, 1.5),
            ),
        ],
    )
}

fn errors_slide(metrics: &ErrorMetrics) -> Slide {
    let mut slide = Slide::new("errors", vec![title("Errors", 48, SLIDE_TITLE)]);
    let position = Rect::new(
        (SLIDE_WIDTH_IN - TABLE_WIDTH_IN) / 2.0,
        (SLIDE_HEIGHT_IN - ERRORS_TABLE_HEIGHT_IN) / 2.0,
        TABLE_WIDTH_IN,
        ERRORS_TABLE_HEIGHT_IN,
    );
    slide
        .tables
        .push(error_table(metrics.headers.len(), &metrics.rows, position));
    slide
}

fn electrode_slide(record: &Record, error_row: Option<(&ErrorMetrics, ErrorMatch)>) -> Slide {
    let name = slide_title(record);
    let mut slide = Slide::new(name.clone(), vec![title(name, 48, SLIDE_TITLE)]);

    if let Some((metrics, found)) = error_row {
        tracing::debug!("{} matched error row {} ({:?})", slide.name, found.row, found.rule);
        let top = (SLIDE_HEIGHT_IN - ELECTRODE_TABLE_HEIGHT_IN) / 10.0 * 9.5;
        let position = Rect::new(
            (SLIDE_WIDTH_IN - TABLE_WIDTH_IN) / 2.0,
            top,
            TABLE_WIDTH_IN,
            ELECTRODE_TABLE_HEIGHT_IN,
        );
        let row = std::slice::from_ref(&metrics.rows[found.row]);
        slide
            .tables
            .push(error_table(metrics.headers.len(), row, position));
    }

    slide.chip = label_chip(record).map(|label| Chip {
        label,
        font_size_pt: 24,
        border_width_in: 0.04,
        position: CHIP,
    });

    slide
}

/// `"<Target> (<Label>)"`, `"<Target>"`, or the electrode label
fn slide_title(record: &Record) -> String {
    let target = record.get_ignore_case(TARGET).map(Cell::display);
    let label = record.get_ignore_case("label").map(Cell::display);

    match (target, label) {
        (Some(target), Some(label)) => format!("{} ({})", target, label),
        (Some(target), None) => target,
        (None, _) => record
            .get(ELECTRODE_LABEL)
            .map(Cell::display)
            .unwrap_or_default(),
    }
}

fn is_skipped(record: &Record) -> bool {
    record.cells().any(|cell| {
        cell.as_text()
            .map(|s| SKIP_MARKERS.iter().any(|m| s.trim().eq_ignore_ascii_case(m)))
            .unwrap_or(false)
    })
}

/// Two header rows followed by one row per data row
fn error_table(columns: usize, data: &[Vec<Cell>], position: Rect) -> SlideTable {
    let (mut rows, merges) = error_table_header(columns);
    for data_row in data {
        rows.push(
            (0..columns)
                .map(|col| data_row.get(col).map(TableCell::value).unwrap_or_default())
                .collect(),
        );
    }

    SlideTable {
        position,
        rows,
        merges,
    }
}

fn error_table_header(columns: usize) -> (Vec<Vec<TableCell>>, Vec<Merge>) {
    let mut rows = vec![vec![TableCell::default(); columns]; 2];
    let mut merges = Vec::new();

    let mut spans: Vec<((usize, usize), (usize, usize), &str)> = vec![((0, 0), (1, 0), "Electrode")];
    let mut col = 1;
    if columns == COLUMNS_WITH_IMPLANTER {
        spans.push(((0, 1), (1, 1), "Implanter"));
        col += 1;
    }
    spans.extend([
        ((0, col), (0, col + 1), "Target Error"),
        ((0, col + 2), (0, col + 3), "Entry Error"),
        ((0, col + 4), (1, col + 4), "Radial Angle"),
        ((0, col + 5), (1, col + 5), "Line Angle"),
        ((1, col), (1, col), "Euclidean"),
        ((1, col + 1), (1, col + 1), "Radial"),
        ((1, col + 2), (1, col + 2), "Euclidean"),
        ((1, col + 3), (1, col + 3), "Radial"),
    ]);

    for (first, last, text) in spans {
        if last.1 >= columns {
            continue;
        }
        rows[first.0][first.1] = TableCell::heading(text);
        if first != last {
            for r in first.0..=last.0 {
                for c in first.1..=last.1 {
                    if (r, c) != first {
                        rows[r][c] = TableCell::heading("");
                    }
                }
            }
            merges.push(Merge { first, last });
        }
    }

    (rows, merges)
}
