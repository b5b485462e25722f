//! CSV Cleaning Pipeline Library
//!
//! Loads a CSV file, drops rows with missing values, drops duplicate rows,
//! drops rows holding IQR outliers in any numeric column and writes the
//! result to a new CSV file. Built on Polars.
//!
//! # Overview
//!
//! - **Load**: header row required, column kinds fixed at load time
//! - **Drop missing**: any null (or NaN in a float column) removes the row
//! - **Drop duplicates**: exact repeats of an earlier row are removed
//! - **Remove outliers**: numeric columns are filtered one after another with
//!   `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]` fences computed on the rows still present
//! - **Save**: header plus rows, no index column
//!
//! Stages always run in that order. A failed load does not stop the run:
//! the later stages report that no data is loaded and do nothing, and the
//! caller gets a [`RunSummary`] rather than an error.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use data_prep::Pipeline;
//!
//! let summary = Pipeline::builder()
//!     .on_status(|record| println!("{}", record.message))
//!     .build()?
//!     .run("2023_accidents.csv", "cleaned_2023_accidents.csv");
//!
//! println!("Rows: {:?} -> {:?}", summary.rows_before, summary.rows_after);
//! ```
//!
//! # Running stages one at a time
//!
//! ```rust,ignore
//! use data_prep::Pipeline;
//!
//! let pipeline = Pipeline::builder().build()?;
//! let (table, _) = pipeline.load("accidents.csv");
//! let (table, _) = pipeline.drop_missing(table);
//! let (table, _) = pipeline.drop_duplicates(table);
//! let (table, _) = pipeline.remove_outliers(table);
//! let record = pipeline.save(table.as_ref(), "cleaned.csv");
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod statistics;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{ConfigValidationError, OutlierConfig, PipelineConfig, PipelineConfigBuilder};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use io::{default_output_path, read_csv, write_csv};
pub use pipeline::{
    ClosureStatusReporter, ColumnOutliers, OutlierHandler, OutlierReport, Pipeline,
    PipelineBuilder, PipelineStage, SkipReason, StageRecord, StageStatus, StatusReporter,
};
pub use statistics::{IqrBounds, quantile};
pub use table::{ColumnKind, ColumnSchema, Table};
pub use types::{PipelineState, RunSummary};
