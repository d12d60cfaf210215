// ============================================================
// SPREADSHEET INFRASTRUCTURE LAYER
// ============================================================
// Workbook reading (xlsx, xls, xlsb, ods) via calamine

mod sheet_parser;

pub use sheet_parser::SpreadsheetParser;
