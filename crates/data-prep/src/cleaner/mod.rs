//! Row-level cleaning: missing values and duplicate rows.
//!
//! Both operations only drop rows. Surviving rows keep their order and their
//! cell values, and the table schema is carried over unchanged.

use crate::error::Result;
use crate::table::Table;
use crate::utils::is_float_dtype;
use polars::prelude::*;
use tracing::debug;

/// Removes incomplete and repeated rows.
pub struct DataCleaner;

impl DataCleaner {
    /// Drop every row that holds a null in any column or a NaN in any float column.
    ///
    /// Returns the cleaned table and the number of rows removed.
    pub fn drop_missing(table: &Table) -> Result<(Table, usize)> {
        let frame = table.frame();
        let before = frame.height();
        let mut keep = vec![true; before];

        for col in frame.get_columns() {
            let series = col.as_materialized_series();

            if series.null_count() > 0 {
                let nulls = series.is_null();
                for (idx, is_null) in nulls.into_iter().enumerate() {
                    if is_null.unwrap_or(false) {
                        keep[idx] = false;
                    }
                }
            }

            if is_float_dtype(series.dtype()) {
                let floats = series.cast(&DataType::Float64)?;
                for (idx, value) in floats.f64()?.into_iter().enumerate() {
                    if value.is_some_and(f64::is_nan) {
                        keep[idx] = false;
                    }
                }
            }
        }

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        let cleaned = frame.filter(&mask)?;
        let removed = before - cleaned.height();
        debug!("Dropped {} rows with missing values", removed);

        Ok((table.clone().replace_frame(cleaned)?, removed))
    }

    /// Drop rows that repeat an earlier row across all columns, keeping the first.
    ///
    /// Returns the cleaned table and the number of rows removed.
    pub fn drop_duplicates(table: &Table) -> Result<(Table, usize)> {
        let frame = table.frame();
        let before = frame.height();

        let unique = frame.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = before - unique.height();
        debug!("Dropped {} duplicate rows", removed);

        Ok((table.clone().replace_frame(unique)?, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(frame: &DataFrame, name: &str) -> Vec<Option<String>> {
        frame
            .column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    // ==================== drop_missing tests ====================

    #[test]
    fn test_drop_missing_removes_rows_with_any_null() {
        let table = Table::new(
            df![
                "district" => [Some("Eixample"), None, Some("Sants"), Some("Gracia")],
                "victims" => [Some(1i64), Some(2), None, Some(4)],
            ]
            .unwrap(),
        );

        let (cleaned, removed) = DataCleaner::drop_missing(&table).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(cleaned.shape(), (2, 2));
        assert_eq!(
            strings(cleaned.frame(), "district"),
            vec![Some("Eixample".to_string()), Some("Gracia".to_string())]
        );
    }

    #[test]
    fn test_drop_missing_treats_nan_as_missing() {
        let table = Table::new(
            df![
                "speed" => [30.0, f64::NAN, 50.0],
                "victims" => [1i64, 2, 3],
            ]
            .unwrap(),
        );

        let (cleaned, removed) = DataCleaner::drop_missing(&table).unwrap();
        assert_eq!(removed, 1);
        let speeds: Vec<Option<f64>> = cleaned
            .frame()
            .column("speed")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(speeds, vec![Some(30.0), Some(50.0)]);
    }

    #[test]
    fn test_drop_missing_leaves_no_missing_cells() {
        let table = Table::new(
            df![
                "a" => [Some(1.0), None, Some(f64::NAN), Some(4.0)],
                "b" => [Some("x"), Some("y"), Some("z"), None],
                "c" => [Some(true), Some(false), Some(true), Some(true)],
            ]
            .unwrap(),
        );

        let (cleaned, _) = DataCleaner::drop_missing(&table).unwrap();
        assert_eq!(cleaned.height(), 1);
        for col in cleaned.frame().get_columns() {
            assert_eq!(col.null_count(), 0, "column {} has nulls", col.name());
        }
        assert_eq!(cleaned.width(), table.width());
    }

    #[test]
    fn test_drop_missing_no_missing_is_identity() {
        let table = Table::new(df!["a" => [1i64, 2, 3]].unwrap());
        let (cleaned, removed) = DataCleaner::drop_missing(&table).unwrap();
        assert_eq!(removed, 0);
        assert!(cleaned.frame().equals(table.frame()));
    }

    #[test]
    fn test_drop_missing_empty_table() {
        let table = Table::new(DataFrame::empty());
        let (cleaned, removed) = DataCleaner::drop_missing(&table).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(cleaned.shape(), (0, 0));
    }

    // ==================== drop_duplicates tests ====================

    #[test]
    fn test_drop_duplicates_keeps_first_in_order() {
        let table = Table::new(
            df![
                "district" => ["Sants", "Gracia", "Sants", "Eixample", "Gracia"],
                "victims" => [1i64, 2, 1, 3, 5],
            ]
            .unwrap(),
        );

        let (cleaned, removed) = DataCleaner::drop_duplicates(&table).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(cleaned.shape(), (4, 2));
        assert_eq!(
            strings(cleaned.frame(), "district"),
            vec![
                Some("Sants".to_string()),
                Some("Gracia".to_string()),
                Some("Eixample".to_string()),
                Some("Gracia".to_string()),
            ]
        );
    }

    #[test]
    fn test_drop_duplicates_is_idempotent() {
        let table = Table::new(
            df![
                "a" => [1i64, 1, 2, 2, 3],
                "b" => ["x", "x", "y", "z", "x"],
            ]
            .unwrap(),
        );

        let (once, _) = DataCleaner::drop_duplicates(&table).unwrap();
        let (twice, removed_again) = DataCleaner::drop_duplicates(&once).unwrap();
        assert_eq!(removed_again, 0);
        assert!(once.frame().equals(twice.frame()));
    }

    #[test]
    fn test_drop_duplicates_leaves_distinct_rows() {
        let table = Table::new(
            df![
                "a" => [1i64, 1, 1, 2],
                "b" => [1.5, 1.5, 2.5, 1.5],
            ]
            .unwrap(),
        );

        let (cleaned, _) = DataCleaner::drop_duplicates(&table).unwrap();
        let frame = cleaned.frame();
        let rows: Vec<String> = (0..frame.height())
            .map(|idx| {
                frame
                    .get_columns()
                    .iter()
                    .map(|col| format!("{}", col.get(idx).unwrap()))
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();

        let mut distinct = rows.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), rows.len());
        assert_eq!(frame.height(), 3);
    }
}
