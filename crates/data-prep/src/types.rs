//! Result types for a full pipeline run.

use crate::pipeline::outliers::OutlierReport;
use crate::pipeline::status::{StageRecord, StageStatus};
use crate::table::ColumnSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a run ended up.
///
/// `Empty → Loaded → Cleaned → Saved`. A run whose load failed stays `Empty`
/// through every later stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// No table has been loaded.
    Empty,
    /// A table was loaded but not yet cleaned.
    Loaded,
    /// The table went through the cleaning stages.
    Cleaned,
    /// The cleaned table was written out.
    Saved,
}

/// Summary of one load → clean → save run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,

    /// RFC 3339 timestamp of when the run started.
    pub started_at: String,

    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    pub final_state: PipelineState,

    /// Row count right after loading, if the load succeeded.
    pub rows_before: Option<usize>,

    /// Row count of the table handed to the save stage.
    pub rows_after: Option<usize>,

    /// Schema of the loaded table (empty when nothing was loaded).
    pub columns: Vec<ColumnSchema>,

    /// One record per stage, in execution order.
    pub stages: Vec<StageRecord>,

    /// Per-column detail of the outlier pass, when it ran.
    pub outliers: Option<OutlierReport>,
}

impl RunSummary {
    /// True when the output was written and no stage failed.
    pub fn succeeded(&self) -> bool {
        self.final_state == PipelineState::Saved && self.failures().next().is_none()
    }

    /// Stages that failed.
    pub fn failures(&self) -> impl Iterator<Item = &StageRecord> {
        self.stages
            .iter()
            .filter(|record| record.status == StageStatus::Failed)
    }

    /// Rows removed between load and save.
    pub fn rows_removed(&self) -> Option<usize> {
        Some(self.rows_before?.saturating_sub(self.rows_after?))
    }
}
