//! Pipeline module.
//!
//! This module provides the cleaning pipeline, its stage records and the
//! outlier filter.

mod builder;
pub mod outliers;
pub mod status;

pub use builder::{Pipeline, PipelineBuilder};
pub use outliers::{ColumnOutliers, OutlierHandler, OutlierReport};
pub use status::{
    ClosureStatusReporter, PipelineStage, SkipReason, StageRecord, StageStatus, StatusReporter,
};
