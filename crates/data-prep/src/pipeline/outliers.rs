//! Outlier handling module.
//!
//! Removes rows whose numeric values fall outside the IQR fences of their
//! column. Columns are filtered one after another in table order, and each
//! column's fences are computed from the rows that survived the previous
//! columns, so the result depends on column order.

use crate::config::OutlierConfig;
use crate::error::Result;
use crate::statistics::IqrBounds;
use crate::table::Table;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the filter did to one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub column: String,
    /// `None` when the column had no observable value left.
    pub bounds: Option<IqrBounds>,
    /// Rows present when this column was evaluated.
    pub rows_before: usize,
    pub rows_removed: usize,
}

/// Result of one full outlier pass over a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub shape_before: (usize, usize),
    pub shape_after: (usize, usize),
    pub columns: Vec<ColumnOutliers>,
}

impl OutlierReport {
    pub fn rows_removed(&self) -> usize {
        self.shape_before.0 - self.shape_after.0
    }
}

/// Handles outlier detection and removal.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Remove rows containing outliers using the IQR method.
    ///
    /// Only columns tagged numeric in the table schema are evaluated; other
    /// columns pass through untouched. A row is kept for a column when its
    /// value lies in `[lower, upper]`; missing and NaN values never do.
    pub fn remove_outliers(table: &Table, config: &OutlierConfig) -> Result<(Table, OutlierReport)> {
        let shape_before = table.shape();
        let mut frame = table.frame().clone();
        let mut columns = Vec::new();

        for name in table.numeric_columns() {
            let rows_before = frame.height();
            let values = frame
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            let values = values.f64()?;

            let bounds = IqrBounds::from_values(values.into_iter(), config);
            let mask: Vec<bool> = values
                .into_iter()
                .map(|value| match (value, &bounds) {
                    (Some(v), Some(b)) => b.contains(v),
                    _ => false,
                })
                .collect();

            let mask = BooleanChunked::from_slice("inlier".into(), &mask);
            frame = frame.filter(&mask)?;
            let rows_removed = rows_before - frame.height();

            match &bounds {
                Some(b) => debug!(
                    "{}: Q1={} Q3={} IQR={} bounds=[{}, {}], removed {} rows",
                    name, b.q1, b.q3, b.iqr, b.lower, b.upper, rows_removed
                ),
                None => debug!("{}: no values to bound, removed {} rows", name, rows_removed),
            }

            columns.push(ColumnOutliers {
                column: name.to_string(),
                bounds,
                rows_before,
                rows_removed,
            });
        }

        let cleaned = table.clone().replace_frame(frame)?;
        let report = OutlierReport {
            shape_before,
            shape_after: cleaned.shape(),
            columns,
        };
        debug!("Removed {} outlier rows", report.rows_removed());

        Ok((cleaned, report))
    }
}
