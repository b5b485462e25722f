//! Error types for the cleaning pipeline.
//!
//! Load and save failures wrap the underlying cause so the pipeline can turn
//! them into a single status line without losing the original error chain.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// The input file was missing, unreadable or malformed.
    #[error("Error loading data from '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<CleaningError>,
    },

    /// The output file could not be written.
    #[error("Error saving data to '{}': {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: Box<CleaningError>,
    },

    /// A stage ran before any table was loaded.
    #[error("Data is not loaded. Please load the data first.")]
    NotLoaded,

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// A replacement frame does not match the table's schema.
    #[error("Schema mismatch: expected columns {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Wrap an error as a load failure for `path`.
    pub fn load(path: impl Into<PathBuf>, source: impl Into<CleaningError>) -> Self {
        CleaningError::Load {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }

    /// Wrap an error as a save failure for `path`.
    pub fn save(path: impl Into<PathBuf>, source: impl Into<CleaningError>) -> Self {
        CleaningError::Save {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Machine-readable error code, carried in run summaries.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load { .. } => "LOAD_ERROR",
            Self::Save { .. } => "SAVE_ERROR",
            Self::NotLoaded => "NOT_LOADED",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether this is the informational "no table yet" signal rather than a fault.
    pub fn is_not_loaded(&self) -> bool {
        match self {
            Self::NotLoaded => true,
            Self::WithContext { source, .. } => source.is_not_loaded(),
            _ => false,
        }
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
