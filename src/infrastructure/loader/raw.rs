// ============================================================
// RAW GRID
// ============================================================
// Untyped rows as they come out of a file, before a header row
// is chosen and column types are assigned

use crate::domain::table::format_number;

/// Field values treated as missing, in addition to the empty field
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Empty field or empty spreadsheet cell
    Empty,

    /// One of [`NA_MARKERS`]; kept so a header cell can still use it as a name
    Na(String),

    /// Numeric value with the text it was read from
    Number { value: f64, text: String },

    Text(String),
}

impl RawCell {
    /// Classify a textual field
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            return RawCell::Empty;
        }
        if NA_MARKERS.contains(&field) {
            return RawCell::Na(field.to_string());
        }
        match field.trim().parse::<f64>() {
            Ok(value) if !value.is_nan() => RawCell::Number {
                value,
                text: field.to_string(),
            },
            _ => RawCell::Text(field.to_string()),
        }
    }

    /// Classify a value already typed as text, e.g. a spreadsheet string
    /// cell. Only missing markers are recognised; digits stay text.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            RawCell::Empty
        } else if NA_MARKERS.contains(&text) {
            RawCell::Na(text.to_string())
        } else {
            RawCell::Text(text.to_string())
        }
    }

    pub fn from_number(value: f64) -> Self {
        RawCell::Number {
            value,
            text: format_number(value),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawCell::Empty | RawCell::Na(_))
    }

    pub fn is_numeric_or_missing(&self) -> bool {
        !matches!(self, RawCell::Text(_))
    }
}

/// One physical record of the input
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line (CSV) or sheet row number, for error messages
    pub line: u64,

    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn new(line: u64, cells: Vec<RawCell>) -> Self {
        Self { line, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_field() {
        assert_eq!(RawCell::from_field(""), RawCell::Empty);
        assert_eq!(RawCell::from_field("N/A"), RawCell::Na("N/A".to_string()));
        assert_eq!(
            RawCell::from_field(" -12.50"),
            RawCell::Number {
                value: -12.5,
                text: " -12.50".to_string()
            }
        );
        assert_eq!(
            RawCell::from_field("1e3"),
            RawCell::Number {
                value: 1000.0,
                text: "1e3".to_string()
            }
        );
        assert_eq!(
            RawCell::from_field("1,000"),
            RawCell::Text("1,000".to_string())
        );
        assert_eq!(
            RawCell::from_field("Cash at bank"),
            RawCell::Text("Cash at bank".to_string())
        );
    }

    #[test]
    fn test_from_text_never_parses_numbers() {
        assert_eq!(RawCell::from_text(""), RawCell::Empty);
        assert_eq!(RawCell::from_text("#N/A"), RawCell::Na("#N/A".to_string()));
        assert_eq!(RawCell::from_text("0100"), RawCell::Text("0100".to_string()));
        assert_eq!(RawCell::from_text("-8000"), RawCell::Text("-8000".to_string()));
    }

    #[test]
    fn test_whitespace_is_text_not_missing() {
        assert_eq!(RawCell::from_field("  "), RawCell::Text("  ".to_string()));
    }

    #[test]
    fn test_missing_classification() {
        assert!(RawCell::Empty.is_missing());
        assert!(RawCell::from_field("null").is_missing());
        assert!(!RawCell::from_field("0").is_missing());
        assert!(RawCell::from_field("0").is_numeric_or_missing());
        assert!(!RawCell::from_field("x").is_numeric_or_missing());
    }
}
