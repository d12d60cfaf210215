// ============================================================
// HEADER SELECTION AND COLUMN TYPING
// ============================================================
// Turn raw rows into a typed Table: pick the header row, name
// the columns, tag each column numeric or text once

use std::collections::{HashMap, HashSet};

use super::raw::{RawCell, RawRow};
use crate::domain::error::{AppError, Result};
use crate::domain::table::{Cell, Column, ColumnKind, Table};

/// Build a table whose column names come from `rows[header_row]`.
///
/// Rows before the header are discarded. A header index past the end of
/// the input yields an empty table. Data rows wider than the header are a
/// parse error; shorter rows are padded with missing cells.
pub fn build_table(rows: &[RawRow], header_row: usize) -> Result<Table> {
    let Some(header) = rows.get(header_row) else {
        return Ok(Table::empty());
    };
    let data = &rows[header_row + 1..];
    let width = header.cells.len();

    if let Some(wide) = data.iter().find(|row| row.cells.len() > width) {
        return Err(AppError::ParseError(format!(
            "Expected {} fields in line {}, saw {}",
            width,
            wide.line,
            wide.cells.len()
        )));
    }

    let names = column_names(&header.cells);
    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| {
            let all_numeric = data
                .iter()
                .filter_map(|row| row.cells.get(col))
                .all(RawCell::is_numeric_or_missing);
            if all_numeric {
                ColumnKind::Numeric
            } else {
                ColumnKind::Text
            }
        })
        .collect();

    let table_rows = data
        .iter()
        .map(|row| {
            kinds
                .iter()
                .enumerate()
                .map(|(col, kind)| typed_cell(row.cells.get(col), *kind))
                .collect()
        })
        .collect();

    let columns = names
        .into_iter()
        .zip(kinds)
        .map(|(name, kind)| Column::new(name, kind))
        .collect();

    Ok(Table::from_parts(columns, table_rows))
}

fn typed_cell(raw: Option<&RawCell>, kind: ColumnKind) -> Cell {
    match (raw, kind) {
        (None, _) | (Some(RawCell::Empty), _) | (Some(RawCell::Na(_)), _) => Cell::Missing,
        (Some(RawCell::Number { value, .. }), ColumnKind::Numeric) => Cell::Number(*value),
        (Some(RawCell::Number { text, .. }), ColumnKind::Text) => Cell::Text(text.clone()),
        (Some(RawCell::Text(text)), _) => Cell::Text(text.clone()),
    }
}

/// Literal header text; blanks become `Unnamed: i`, repeats get `.1`, `.2`, ...
fn column_names(header: &[RawCell]) -> Vec<String> {
    let literal = header.iter().enumerate().map(|(idx, cell)| match cell {
        RawCell::Empty => format!("Unnamed: {}", idx),
        RawCell::Na(text) | RawCell::Text(text) => text.clone(),
        RawCell::Number { text, .. } => text.clone(),
    });

    let mut taken: HashSet<String> = HashSet::new();
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());

    for name in literal {
        let mut unique = name.clone();
        if taken.contains(&unique) {
            let counter = repeats.entry(name.clone()).or_insert(0);
            loop {
                *counter += 1;
                unique = format!("{}.{}", name, counter);
                if !taken.contains(&unique) {
                    break;
                }
            }
        }
        taken.insert(unique.clone());
        names.push(unique);
    }

    names
}
