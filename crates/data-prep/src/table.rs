//! The in-memory table the pipeline cleans.
//!
//! A [`Table`] pairs a polars [`DataFrame`] with a schema whose column kinds are
//! fixed when the table is first built. Cleaning stages replace the frame but
//! keep the schema, so later stages select numeric columns by looking at the
//! tag rather than re-inspecting dtypes.

use crate::error::{CleaningError, Result};
use crate::utils::column_kind;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Semantic type of a column, decided once when the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point numbers
    Numeric,
    /// Boolean values
    Boolean,
    /// Date, datetime, time or duration
    Temporal,
    /// String/text type
    Text,
    /// Anything else (e.g. an all-null column)
    Other,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

/// Name and kind of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub kind: ColumnKind,
}

/// A rectangular table of named, typed columns.
#[derive(Debug, Clone)]
pub struct Table {
    schema: Vec<ColumnSchema>,
    frame: DataFrame,
}

impl Table {
    /// Build a table from a frame, deriving each column's kind from its dtype.
    pub fn new(frame: DataFrame) -> Self {
        let schema = frame
            .get_columns()
            .iter()
            .map(|col| ColumnSchema {
                name: col.name().to_string(),
                kind: column_kind(col.dtype()),
            })
            .collect();

        Self { schema, frame }
    }

    pub fn schema(&self) -> &[ColumnSchema] {
        &self.schema
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.schema.iter().map(|col| col.name.clone()).collect()
    }

    /// Names of the numeric columns, in table position order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.schema
            .iter()
            .filter(|col| col.kind.is_numeric())
            .map(|col| col.name.as_str())
            .collect()
    }

    /// Kind of the named column.
    pub fn kind_of(&self, name: &str) -> Result<ColumnKind> {
        self.schema
            .iter()
            .find(|col| col.name == name)
            .map(|col| col.kind)
            .ok_or_else(|| CleaningError::ColumnNotFound(name.to_string()))
    }

    /// Swap in a new frame for the same columns, keeping the schema.
    ///
    /// Stages only ever drop rows, so the replacement must carry exactly the
    /// same column names in the same order.
    pub fn replace_frame(self, frame: DataFrame) -> Result<Self> {
        let actual: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let matches = actual.len() == self.schema.len()
            && self
                .schema
                .iter()
                .zip(&actual)
                .all(|(col, name)| &col.name == name);

        if !matches {
            return Err(CleaningError::SchemaMismatch {
                expected: self.column_names(),
                actual,
            });
        }

        Ok(Self {
            schema: self.schema,
            frame,
        })
    }
}
