// ============================================================
// SPREADSHEET PARSER
// ============================================================
// Read the first worksheet of an uploaded workbook into raw rows

use std::io::Cursor;

use calamine::{
    open_workbook_from_rs, Data, ExcelDateTime, Ods, Range, Reader, Xls, Xlsb, Xlsx,
};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::file_kind::FileKind;
use crate::infrastructure::loader::{RawCell, RawRow};

type Upload = Cursor<Vec<u8>>;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct SpreadsheetParser;

impl SpreadsheetParser {
    /// Parse workbook bytes of the given kind; only the first sheet is read
    pub fn parse_bytes(bytes: &[u8], kind: FileKind) -> Result<Vec<RawRow>> {
        let range = match kind {
            FileKind::Xlsx => first_sheet::<Xlsx<Upload>>(bytes)?,
            FileKind::Xls => first_sheet::<Xls<Upload>>(bytes)?,
            FileKind::Xlsb => first_sheet::<Xlsb<Upload>>(bytes)?,
            FileKind::Ods => first_sheet::<Ods<Upload>>(bytes)?,
            FileKind::Csv => {
                return Err(AppError::Internal(
                    "CSV input routed to the spreadsheet parser".to_string(),
                ))
            }
        };

        Ok(Self::range_to_rows(&range))
    }

    /// Convert a sheet range to rows addressed from sheet cell A1, so leading
    /// empty rows and columns keep their positions
    pub fn range_to_rows(range: &Range<Data>) -> Vec<RawRow> {
        let Some((start_row, start_col)) = range.start() else {
            return Vec::new();
        };
        let width = start_col as usize + range.width();

        let mut rows = Vec::with_capacity(start_row as usize + range.height());
        for line in 0..start_row {
            rows.push(RawRow::new(u64::from(line) + 1, vec![RawCell::Empty; width]));
        }

        for (offset, row) in range.rows().enumerate() {
            let mut cells = vec![RawCell::Empty; start_col as usize];
            cells.extend(row.iter().map(raw_cell));
            let line = u64::from(start_row) + offset as u64 + 1;
            rows.push(RawRow::new(line, cells));
        }

        rows
    }
}

fn first_sheet<R>(bytes: &[u8]) -> Result<Range<Data>>
where
    R: Reader<Upload>,
    R::Error: std::fmt::Display,
{
    let mut workbook: R = open_workbook_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AppError::ParseError(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read worksheet: {}", e)))?;

    debug!(
        height = range.height(),
        width = range.width(),
        "Read first worksheet"
    );
    Ok(range)
}

fn raw_cell(data: &Data) -> RawCell {
    match data {
        Data::Empty => RawCell::Empty,
        Data::Int(value) => RawCell::Number {
            value: *value as f64,
            text: value.to_string(),
        },
        Data::Float(value) => RawCell::from_number(*value),
        // typed as text by the workbook; never re-read as a number
        Data::String(value) => RawCell::from_text(value),
        Data::Bool(true) => RawCell::Text("True".to_string()),
        Data::Bool(false) => RawCell::Text("False".to_string()),
        Data::DateTime(value) => RawCell::Text(format_datetime(value)),
        Data::DateTimeIso(value) | Data::DurationIso(value) => RawCell::Text(value.clone()),
        // `#N/A` counts as missing
        Data::Error(err) => RawCell::from_text(&err.to_string()),
    }
}

/// Calendar dates as `YYYY-MM-DD HH:MM:SS`; durations keep their serial value
fn format_datetime(value: &ExcelDateTime) -> String {
    if value.is_datetime() {
        if let Some(datetime) = value.as_datetime() {
            return datetime.format(DATETIME_FORMAT).to_string();
        }
    }
    value.to_string()
}
