// ============================================================
// TABLE LOADER
// ============================================================
// Uploaded bytes -> raw rows -> typed Table

mod header;
mod raw;

pub use header::build_table;
pub use raw::{RawCell, RawRow, NA_MARKERS};

use tracing::debug;

use crate::domain::error::Result;
use crate::domain::file_kind::FileKind;
use crate::domain::table::Table;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::spreadsheet::SpreadsheetParser;

/// Parsed upload, before a header row is chosen. Lets a run build the
/// raw preview and the processed table from a single parse.
#[derive(Debug, Clone)]
pub struct RawSheet {
    kind: FileKind,
    rows: Vec<RawRow>,
}

impl RawSheet {
    /// Parse bytes of the declared kind. Fails only with a parse error.
    pub fn parse(bytes: &[u8], kind: FileKind) -> Result<Self> {
        let rows = if kind.is_spreadsheet() {
            SpreadsheetParser::parse_bytes(bytes, kind)?
        } else {
            CsvParser::new().parse_bytes(bytes)?
        };
        debug!(kind = %kind, rows = rows.len(), "Parsed upload");
        Ok(Self { kind, rows })
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Number of physical records, header candidates included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Typed table using `header_row` as the column-name row
    pub fn to_table(&self, header_row: usize) -> Result<Table> {
        build_table(&self.rows, header_row)
    }

    /// First `n` physical rows with positional column names (`0`, `1`, ...),
    /// so a header row index can be read straight off the preview
    pub fn preview(&self, n: usize) -> Table {
        let rows = &self.rows[..n.min(self.rows.len())];
        let width = rows.iter().map(|row| row.cells.len()).max().unwrap_or(0);

        let mut grid = Vec::with_capacity(rows.len() + 1);
        grid.push(RawRow::new(
            0,
            (0..width).map(|idx| RawCell::Text(idx.to_string())).collect(),
        ));
        grid.extend_from_slice(rows);

        // no row is wider than the synthetic header, so this cannot fail
        build_table(&grid, 0).unwrap_or_default()
    }
}

/// Parse and type a file in one step
pub fn load_table(bytes: &[u8], kind: FileKind, header_row: usize) -> Result<Table> {
    RawSheet::parse(bytes, kind)?.to_table(header_row)
}
