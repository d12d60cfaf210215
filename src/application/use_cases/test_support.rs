//! Table builders and proptest strategies shared by use-case tests

use proptest::prelude::*;

use crate::domain::table::{Cell, Column, ColumnKind, Table};

pub fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn num(value: f64) -> Cell {
    Cell::Number(value)
}

fn cell_strategy(kind: ColumnKind) -> BoxedStrategy<Cell> {
    match kind {
        ColumnKind::Numeric => prop_oneof![
            Just(Cell::Missing),
            (-1.0e6f64..1.0e6f64).prop_map(Cell::Number),
        ]
        .boxed(),
        ColumnKind::Text => prop_oneof![
            Just(Cell::Missing),
            "[A-Za-z ,\"]{1,6}".prop_map(Cell::Text),
        ]
        .boxed(),
    }
}

/// Tables of 1-4 typed columns and 0-7 rows, missing cells included
pub fn table_strategy() -> impl Strategy<Value = Table> {
    (1usize..5, 0usize..8).prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<bool>(), width).prop_flat_map(move |numeric| {
            let columns: Vec<Column> = numeric
                .iter()
                .enumerate()
                .map(|(idx, is_numeric)| {
                    let kind = if *is_numeric {
                        ColumnKind::Numeric
                    } else {
                        ColumnKind::Text
                    };
                    Column::new(format!("c{}", idx), kind)
                })
                .collect();
            let row: Vec<BoxedStrategy<Cell>> =
                columns.iter().map(|c| cell_strategy(c.kind)).collect();

            prop::collection::vec(row, height)
                .prop_map(move |rows| Table::new(columns.clone(), rows).unwrap())
        })
    })
}
