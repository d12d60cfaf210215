// ============================================================
// CELL VALUES
// ============================================================
// A single grid value: missing, numeric or text

use serde::{Serialize, Serializer};

/// One cell of a [`super::Table`]
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value (empty field, NA marker, empty spreadsheet cell)
    Missing,

    /// Numeric value
    Number(f64),

    /// Any other value, kept verbatim
    Text(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text used for this cell in CSV output; missing cells render empty
    pub fn render(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Number(value) => format_number(*value),
            Cell::Text(value) => value.clone(),
        }
    }
}

/// Shortest decimal rendering that parses back to the same `f64`
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Missing => serializer.serialize_none(),
            // JSON has no infinity; fall back to the CSV rendering
            Cell::Number(value) if !value.is_finite() => {
                serializer.serialize_str(&format_number(*value))
            }
            Cell::Number(value) => serializer.serialize_f64(*value),
            Cell::Text(value) => serializer.serialize_str(value),
        }
    }
}
