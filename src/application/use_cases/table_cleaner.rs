// ============================================================
// TABLE CLEANER
// ============================================================
// Structural normalization: carry-forward fill, then drop
// all-missing rows, then drop all-missing columns

use serde::Serialize;

use crate::domain::table::{Cell, Table};

/// What a cleaning pass changed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub filled_cells: usize,
    pub dropped_rows: usize,
    pub dropped_columns: Vec<String>,
}

pub struct TableCleaner;

impl TableCleaner {
    pub fn clean(table: Table) -> Table {
        Self::clean_with_report(table).0
    }

    /// Run the three steps in order. The order matters: filling can rescue
    /// a row from the empty-row rule, and both earlier steps decide which
    /// columns end up entirely missing.
    pub fn clean_with_report(table: Table) -> (Table, CleaningReport) {
        let (columns, mut rows) = table.into_parts();
        let mut report = CleaningReport::default();

        // 1. carry-forward fill, per column
        let mut last_seen: Vec<Option<Cell>> = vec![None; columns.len()];
        for row in rows.iter_mut() {
            for (cell, last) in row.iter_mut().zip(last_seen.iter_mut()) {
                if cell.is_missing() {
                    if let Some(previous) = last {
                        *cell = previous.clone();
                        report.filled_cells += 1;
                    }
                } else {
                    *last = Some(cell.clone());
                }
            }
        }

        // 2. rows with nothing left
        let before = rows.len();
        rows.retain(|row| !row.iter().all(Cell::is_missing));
        report.dropped_rows = before - rows.len();

        // 3. columns with nothing left; vacuously true when no rows remain
        let keep: Vec<bool> = (0..columns.len())
            .map(|col| rows.iter().any(|row| !row[col].is_missing()))
            .collect();

        if keep.iter().all(|k| *k) {
            return (Table::from_parts(columns, rows), report);
        }

        let mut kept_columns = Vec::with_capacity(columns.len());
        for (column, keep) in columns.into_iter().zip(&keep) {
            if *keep {
                kept_columns.push(column);
            } else {
                report.dropped_columns.push(column.name);
            }
        }

        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&keep)
                    .filter_map(|(cell, keep)| keep.then_some(cell))
                    .collect()
            })
            .collect();

        (Table::from_parts(kept_columns, rows), report)
    }
}
