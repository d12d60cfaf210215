// ============================================================
// CSV PARSER
// ============================================================
// Parse uploaded CSV bytes into raw rows, with encoding fallback

use std::borrow::Cow;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::loader::{RawCell, RawRow};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Comma-separated parser producing untyped rows
#[derive(Default)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode and parse uploaded bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<RawRow>> {
        let content = decode(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content. Every record is kept, including the one that
    /// will later become the header; blank lines are skipped.
    pub fn parse_content(&self, content: &str) -> Result<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .trim(Trim::None)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                AppError::ParseError(format!("Failed to parse CSV line {}: {}", line, e))
            })?;

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let cells = record.iter().map(RawCell::from_field).collect();
            rows.push(RawRow::new(line, cells));
        }

        Ok(rows)
    }
}

/// UTF-8 (BOM stripped) when valid, Windows-1252 otherwise
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(content) => Cow::Borrowed(content),
        Err(_) => {
            debug!("CSV is not valid UTF-8, decoding as Windows-1252");
            encoding_rs::WINDOWS_1252
                .decode_without_bom_handling(bytes)
                .0
        }
    }
}
