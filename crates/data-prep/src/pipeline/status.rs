//! Per-stage status records and the reporter trait that receives them.
//!
//! Every stage the pipeline runs produces exactly one [`StageRecord`]. The
//! record is handed to the configured [`StatusReporter`] as soon as the stage
//! finishes and is kept in the run summary.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_prep::Pipeline;
//!
//! let summary = Pipeline::builder()
//!     .on_status(|record| println!("{}", record.message))
//!     .build()?
//!     .run("accidents.csv", "cleaned_accidents.csv");
//! ```

use crate::error::CleaningError;
use serde::{Deserialize, Serialize};

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Reading the input CSV
    Load,
    /// Dropping rows with missing values
    DropMissing,
    /// Dropping repeated rows
    DropDuplicates,
    /// Dropping IQR outliers from numeric columns
    RemoveOutliers,
    /// Writing the output CSV
    Save,
}

impl PipelineStage {
    /// All stages in the order the pipeline runs them.
    pub const ALL: [PipelineStage; 5] = [
        Self::Load,
        Self::DropMissing,
        Self::DropDuplicates,
        Self::RemoveOutliers,
        Self::Save,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Load => "Loading Data",
            Self::DropMissing => "Dropping Missing Values",
            Self::DropDuplicates => "Removing Duplicates",
            Self::RemoveOutliers => "Removing Outliers",
            Self::Save => "Saving Data",
        }
    }
}

/// How a stage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Completed,
    Skipped,
    Failed,
}

/// Why a stage was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No table was available; the stage ran its no-op branch.
    NotLoaded,
    /// The stage is turned off in the configuration.
    Disabled,
}

/// Outcome of a single stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: PipelineStage,
    pub status: StageStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,

    /// The one-line status message shown to the user.
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_before: Option<(usize, usize)>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_after: Option<(usize, usize)>,

    /// Machine-readable code of the failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl StageRecord {
    /// A stage that ran to completion.
    pub fn completed(
        stage: PipelineStage,
        message: impl Into<String>,
        shape_before: Option<(usize, usize)>,
        shape_after: Option<(usize, usize)>,
    ) -> Self {
        Self {
            stage,
            status: StageStatus::Completed,
            skip_reason: None,
            message: message.into(),
            shape_before,
            shape_after,
            error_code: None,
        }
    }

    /// A stage invoked before any table was loaded.
    pub fn not_loaded(stage: PipelineStage) -> Self {
        let error = CleaningError::NotLoaded;
        Self {
            stage,
            status: StageStatus::Skipped,
            skip_reason: Some(SkipReason::NotLoaded),
            message: error.to_string(),
            shape_before: None,
            shape_after: None,
            error_code: Some(error.error_code().to_string()),
        }
    }

    /// A stage turned off in the configuration; the table passes through.
    pub fn disabled(stage: PipelineStage, shape: (usize, usize)) -> Self {
        Self {
            stage,
            status: StageStatus::Skipped,
            skip_reason: Some(SkipReason::Disabled),
            message: format!("{} skipped (disabled).", stage.display_name()),
            shape_before: Some(shape),
            shape_after: Some(shape),
            error_code: None,
        }
    }

    /// A stage that hit an error.
    pub fn failed(
        stage: PipelineStage,
        error: &CleaningError,
        shape_before: Option<(usize, usize)>,
    ) -> Self {
        Self {
            stage,
            status: StageStatus::Failed,
            skip_reason: None,
            message: error.to_string(),
            shape_before,
            shape_after: shape_before,
            error_code: Some(error.error_code().to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == StageStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.status == StageStatus::Failed
    }
}

/// Trait for receiving stage records while the pipeline runs.
///
/// Implementations must be `Send + Sync` so a pipeline can be moved to a
/// worker thread together with its reporter.
pub trait StatusReporter: Send + Sync {
    /// Called once per stage, right after the stage finishes.
    fn report(&self, record: &StageRecord);
}

/// Wrapper that implements [`StatusReporter`] using a closure.
pub struct ClosureStatusReporter<F>
where
    F: Fn(&StageRecord) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureStatusReporter<F>
where
    F: Fn(&StageRecord) + Send + Sync,
{
    /// Creates a new closure-based status reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> StatusReporter for ClosureStatusReporter<F>
where
    F: Fn(&StageRecord) + Send + Sync,
{
    fn report(&self, record: &StageRecord) {
        (self.callback)(record);
    }
}

static_assertions::assert_impl_all!(StageRecord: Send, Sync);
