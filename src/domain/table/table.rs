// ============================================================
// TABLE
// ============================================================
// Rectangular grid of cells with typed, uniquely named columns

use serde::Serialize;
use std::collections::HashSet;

use super::{Cell, Column, ColumnKind};
use crate::domain::error::{AppError, Result};

/// Ordered columns and ordered rows; every row holds one cell per column
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Table with no columns and no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table, checking shape, name uniqueness and column kinds
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate column name: {}",
                    column.name
                )));
            }
        }

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(AppError::ValidationError(format!(
                    "Row {} has {} cells, expected {}",
                    row_idx,
                    row.len(),
                    columns.len()
                )));
            }

            for (column, cell) in columns.iter().zip(row) {
                let fits = match (column.kind, cell) {
                    (_, Cell::Missing) => true,
                    (ColumnKind::Numeric, Cell::Number(_)) => true,
                    (ColumnKind::Text, Cell::Text(_)) => true,
                    _ => false,
                };
                if !fits {
                    return Err(AppError::ValidationError(format!(
                        "Row {} holds a value that does not match {} column '{}'",
                        row_idx, column.kind, column.name
                    )));
                }
            }
        }

        Ok(Self { columns, rows })
    }

    /// Reassemble parts taken apart by a shape-preserving transformation
    pub(crate) fn from_parts(columns: Vec<Column>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn into_parts(self) -> (Vec<Column>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Cells of one column, top to bottom
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.get(column))
    }

    /// First `n` rows, same columns
    pub fn head(&self, n: usize) -> Table {
        Self::from_parts(
            self.columns.clone(),
            self.rows.iter().take(n).cloned().collect(),
        )
    }
}
