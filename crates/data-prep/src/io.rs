//! CSV reading and writing.
//!
//! Parsing, type inference and serialization are delegated to polars; this
//! module only pins the options and wraps every failure as a load or save
//! error carrying the path and the underlying cause.

use crate::config::PipelineConfig;
use crate::error::{CleaningError, Result};
use crate::table::Table;
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a CSV file with a header row into a [`Table`].
///
/// Column kinds are fixed here from the dtypes polars infers.
pub fn read_csv(path: &Path, config: &PipelineConfig) -> Result<Table> {
    let null_values: Vec<PlSmallStr> = config
        .null_values
        .iter()
        .map(|v| PlSmallStr::from(v.as_str()))
        .collect();

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(config.infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(NullValues::AllColumns(null_values))),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| CleaningError::load(path, e))?;

    let table = Table::new(frame);
    for col in table.schema() {
        debug!("  {}: {:?}", col.name, col.kind);
    }

    Ok(table)
}

/// Write a table as CSV: header row plus data rows, no index column.
///
/// Overwrites an existing file. Missing parent directories are an error.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut frame = table.frame().clone();
    let mut file = File::create(path).map_err(|e| CleaningError::save(path, e))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut frame)
        .map_err(|e| CleaningError::save(path, e))?;

    debug!("Wrote {} rows to {}", frame.height(), path.display());
    Ok(())
}

/// Output path used when none is given: `cleaned_<file name>` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("data.csv");

    input.with_file_name(format!("cleaned_{}", file_name))
}
