// ============================================================
// CSV WRITER
// ============================================================
// Render a Table as CSV text: header first, no index column

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the whole table. A table without columns renders empty.
    pub fn write_table(&self, table: &Table) -> Result<String> {
        if table.column_count() == 0 {
            return Ok(String::new());
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(table.column_names())
            .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

        for (idx, row) in table.rows().iter().enumerate() {
            writer
                .write_record(row.iter().map(|cell| cell.render()))
                .map_err(|e| {
                    AppError::Internal(format!("Failed to write CSV row {}: {}", idx + 1, e))
                })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("CSV output is not UTF-8: {}", e)))
    }
}
