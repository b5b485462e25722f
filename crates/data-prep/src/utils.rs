//! Shared helpers for dtype classification and status formatting.

use crate::table::ColumnKind;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a floating point type (the only ones that hold NaN).
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time | DataType::Duration(_)
    )
}

/// Map a DataType onto the column kind carried in a table schema.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else if is_datetime_dtype(dtype) {
        ColumnKind::Temporal
    } else if matches!(dtype, DataType::Boolean) {
        ColumnKind::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        ColumnKind::Text
    } else {
        ColumnKind::Other
    }
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Render a `(rows, columns)` shape the way status lines print it.
pub fn format_shape(shape: (usize, usize)) -> String {
    format!("({}, {})", shape.0, shape.1)
}
