// ============================================================
// FILE KIND
// ============================================================
// Upload format, decided by the file name extension

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::error::{AppError, Result};

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Csv,
    Xlsx,
    Xls,
    Xlsb,
    Ods,
}

impl FileKind {
    /// Resolve the kind from a file name, case-insensitively
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name.trim())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "File '{}' has no extension; expected .csv, .xlsx, .xls, .xlsb or .ods",
                    file_name
                ))
            })?;

        match extension.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xlsx" | "xlsm" => Ok(FileKind::Xlsx),
            "xls" => Ok(FileKind::Xls),
            "xlsb" => Ok(FileKind::Xlsb),
            "ods" => Ok(FileKind::Ods),
            other => Err(AppError::ValidationError(format!(
                "Unsupported file type '.{}'; expected .csv, .xlsx, .xls, .xlsb or .ods",
                other
            ))),
        }
    }

    pub fn is_spreadsheet(&self) -> bool {
        !matches!(self, FileKind::Csv)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FileKind::Csv => "csv",
            FileKind::Xlsx => "xlsx",
            FileKind::Xls => "xls",
            FileKind::Xlsb => "xlsb",
            FileKind::Ods => "ods",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name() {
        assert_eq!(FileKind::from_file_name("tb.csv").unwrap(), FileKind::Csv);
        assert_eq!(FileKind::from_file_name("TB_2024.XLSX").unwrap(), FileKind::Xlsx);
        assert_eq!(FileKind::from_file_name("ledger.xlsm").unwrap(), FileKind::Xlsx);
        assert_eq!(FileKind::from_file_name("old.xls").unwrap(), FileKind::Xls);
        assert_eq!(FileKind::from_file_name("q4.ods").unwrap(), FileKind::Ods);
        assert!(FileKind::Xlsb.is_spreadsheet());
        assert!(!FileKind::Csv.is_spreadsheet());
    }

    #[test]
    fn test_rejects_unknown_extensions() {
        let err = FileKind::from_file_name("notes.txt").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref m) if m.contains(".txt")));
        assert!(FileKind::from_file_name("README").is_err());
    }
}
