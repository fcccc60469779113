use super::inputs::{ELECTRODE_LABEL, SERIAL_NUMBER};
use super::sheet::{Cell, Record};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const RED: Color = Color(255, 0, 0);
    /// Header and text-cell fill
    pub const DARK_GRAY: Color = Color(51, 51, 51);
}

/// Error at or below this many millimetres is acceptable
pub const ERROR_OK_MM: f64 = 2.0;
/// Error at or above this many millimetres is flagged
pub const ERROR_BAD_MM: f64 = 3.0;

const ERROR_OK: Color = Color(99, 248, 99);
const ERROR_WARN: Color = Color(255, 255, 0);
const ERROR_BAD: Color = Color(255, 95, 54);

/// Cell fill for an error value
pub fn error_band(value: f64) -> Color {
    if value <= ERROR_OK_MM {
        ERROR_OK
    } else if value < ERROR_BAD_MM {
        ERROR_WARN
    } else {
        ERROR_BAD
    }
}

/// Named electrode colors used on the label chip
pub fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "gray" | "grey" => Color(102, 102, 102),
        "black" => Color::BLACK,
        "red" => Color::RED,
        "blue" => Color(42, 96, 153),
        "purple" => Color(128, 0, 128),
        "orange" => Color(255, 128, 0),
        "yellow" => Color(255, 255, 0),
        "brown" => Color(43, 34, 2),
        "green" => Color(0, 169, 51),
        "white" => Color::WHITE,
        _ => return None,
    };
    Some(color)
}

/// Colored label box shown on each electrode slide
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelChip {
    pub text: String,
    pub text_color: Color,
    pub fill: Color,
    pub border: Color,
}

/// Build the chip for an electrode record
///
/// Numeric labels (and any label under an `Electrode label` column) are
/// zero-padded and drawn in black. Otherwise the label's letters name its
/// color, e.g. `Blue-3` draws `Blue-3` in blue.
pub fn label_chip(record: &Record) -> Option<LabelChip> {
    let column = record
        .columns()
        .find(|c| c.contains(ELECTRODE_LABEL))
        .or_else(|| record.columns().find(|c| *c == SERIAL_NUMBER))?;
    let value = record.get(column)?;

    let numbered = match value {
        Cell::Text(s) => s
            .split_once('-')
            .map(|(head, _)| !head.is_empty() && head.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false),
        other => other.as_integer().is_some(),
    };

    let (text, color_name) = if numbered || column == ELECTRODE_LABEL {
        (zero_pad(&value.display(), 3), "black".to_string())
    } else {
        let text = value.display();
        let name: String = text
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .to_lowercase();
        (text, name)
    };

    let text_color = named_color(&color_name).unwrap_or_else(|| {
        tracing::warn!("Unknown electrode color '{}', using black", color_name);
        Color::BLACK
    });
    // light text needs a dark box
    let fill = match color_name.as_str() {
        "yellow" | "green" | "white" => Color::BLACK,
        _ => Color::WHITE,
    };

    Some(LabelChip {
        text,
        text_color,
        fill,
        border: Color::RED,
    })
}

/// Left-pad with zeros to `width`, keeping a leading sign in front
fn zero_pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let zeros = "0".repeat(width - len);
    match s.chars().next() {
        Some(sign @ ('+' | '-')) => format!("{}{}{}", sign, zeros, &s[1..]),
        _ => format!("{}{}", zeros, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip(column: &str, value: Cell) -> LabelChip {
        label_chip(&Record::new(vec![(column.to_string(), value)])).unwrap()
    }

    #[test]
    fn test_error_band_edges() {
        assert_eq!(error_band(0.5), ERROR_OK);
        assert_eq!(error_band(2.0), ERROR_OK);
        assert_eq!(error_band(2.01), ERROR_WARN);
        assert_eq!(error_band(2.99), ERROR_WARN);
        assert_eq!(error_band(3.0), ERROR_BAD);
        assert_eq!(error_band(7.4), ERROR_BAD);
    }

    #[test]
    fn test_integer_serial_is_padded_black() {
        let c = chip("Serial Num.", Cell::Integer(7));
        assert_eq!(c.text, "007");
        assert_eq!(c.text_color, Color::BLACK);
        assert_eq!(c.fill, Color::WHITE);
        assert_eq!(c.border, Color::RED);
    }

    #[test]
    fn test_numbered_serial_with_dash() {
        let c = chip("Serial Num.", Cell::text("12-3344"));
        assert_eq!(c.text, "12-3344");
        assert_eq!(c.text_color, Color::BLACK);
    }

    #[test]
    fn test_electrode_label_column_is_black() {
        let c = chip("Electrode label", Cell::text("5"));
        assert_eq!(c.text, "005");
        assert_eq!(c.text_color, Color::BLACK);
    }

    #[test]
    fn test_color_named_serial() {
        let c = chip("Serial Num.", Cell::text("Yellow 2"));
        assert_eq!(c.text, "Yellow 2");
        assert_eq!(c.text_color, Color(255, 255, 0));
        assert_eq!(c.fill, Color::BLACK);

        let c = chip("Serial Num.", Cell::text("Blue-1"));
        assert_eq!(c.text_color, Color(42, 96, 153));
        assert_eq!(c.fill, Color::WHITE);
    }

    #[test]
    fn test_unknown_color_falls_back_to_black() {
        let c = chip("Serial Num.", Cell::text("Teal"));
        assert_eq!(c.text_color, Color::BLACK);
    }

    #[test]
    fn test_no_label_column() {
        let record = Record::new(vec![("Target".to_string(), Cell::text("RA"))]);
        assert!(label_chip(&record).is_none());
    }

    #[test]
    fn test_zero_pad() {
        assert_eq!(zero_pad("7", 3), "007");
        assert_eq!(zero_pad("-7", 3), "-07");
        assert_eq!(zero_pad("1234", 3), "1234");
    }
}
