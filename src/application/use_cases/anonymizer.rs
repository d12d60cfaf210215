// ============================================================
// ANONYMIZER
// ============================================================
// Scale every value of every numeric column by one factor

use crate::domain::anonymization::AnonymizationFactor;
use crate::domain::table::{Cell, Table};

pub struct Anonymizer;

impl Anonymizer {
    /// Multiply numeric columns by `factor`; text columns and missing cells
    /// are left as they are. Not idempotent: applying twice scales twice.
    pub fn anonymize(table: Table, factor: AnonymizationFactor) -> Table {
        let (columns, mut rows) = table.into_parts();
        let numeric: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.is_numeric())
            .map(|(idx, _)| idx)
            .collect();

        for row in rows.iter_mut() {
            for &col in &numeric {
                if let Cell::Number(value) = &mut row[col] {
                    *value *= factor.value();
                }
            }
        }

        Table::from_parts(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{num, table_strategy, text};
    use crate::domain::table::Column;
    use proptest::prelude::*;

    fn factor(value: f64) -> AnonymizationFactor {
        AnonymizationFactor::new(value).unwrap()
    }

    #[test]
    fn test_scales_numeric_column() {
        let table = Table::new(
            vec![Column::numeric("Val")],
            vec![
                vec![num(10.0)],
                vec![num(20.0)],
                vec![Cell::Missing],
                vec![num(40.0)],
            ],
        )
        .unwrap();

        let scaled = Anonymizer::anonymize(table, factor(2.0));
        let values: Vec<Cell> = scaled.column_cells(0).cloned().collect();
        assert_eq!(
            values,
            vec![num(20.0), num(40.0), Cell::Missing, num(80.0)]
        );
    }

    #[test]
    fn test_text_columns_untouched() {
        let table = Table::new(
            vec![Column::text("Code"), Column::numeric("Balance")],
            vec![
                vec![text("0100"), num(1.5)],
                vec![text("Cash, petty "), num(-3.0)],
            ],
        )
        .unwrap();

        let scaled = Anonymizer::anonymize(table, factor(3.0));
        assert_eq!(scaled.cell(0, 0), Some(&text("0100")));
        assert_eq!(scaled.cell(1, 0), Some(&text("Cash, petty ")));
        assert_eq!(scaled.cell(1, 1), Some(&num(-9.0)));
    }

    #[test]
    fn test_applying_twice_scales_twice() {
        let table = Table::new(vec![Column::numeric("Val")], vec![vec![num(5.0)]]).unwrap();
        let once = Anonymizer::anonymize(table, factor(2.0));
        let twice = Anonymizer::anonymize(once, factor(2.0));
        assert_eq!(twice.cell(0, 0), Some(&num(20.0)));
    }

    #[test]
    fn test_overflow_is_infinity() {
        let table = Table::new(vec![Column::numeric("Val")], vec![vec![num(f64::MAX)]]).unwrap();
        let scaled = Anonymizer::anonymize(table, factor(9.9));
        assert_eq!(scaled.cell(0, 0), Some(&num(f64::INFINITY)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_preserves_shape_and_scales_numbers(
            table in table_strategy(),
            f in 1.1f64..=9.9f64,
        ) {
            let scaled = Anonymizer::anonymize(table.clone(), factor(f));

            prop_assert_eq!(scaled.columns(), table.columns());
            prop_assert_eq!(scaled.row_count(), table.row_count());

            for (before, after) in table.rows().iter().zip(scaled.rows()) {
                for (b, a) in before.iter().zip(after) {
                    match (b, a) {
                        (Cell::Number(x), Cell::Number(y)) => {
                            prop_assert!((x * f - y).abs() <= 1e-9 * (x * f).abs().max(1.0));
                        }
                        (b, a) => prop_assert_eq!(b, a),
                    }
                }
            }
        }
    }
}
