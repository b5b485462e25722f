//! The cleaning pipeline and its builder.
//!
//! Each stage takes the table by value as an `Option<Table>` and hands back
//! the table for the next stage together with a [`StageRecord`]. `None`
//! means nothing was loaded: the stage reports it and does nothing else.
//! Failures never escape a stage. A load or save failure is reported and
//! the run carries on; a cleaning stage that fails reports the error and
//! passes its input table on unchanged.

use crate::cleaner::DataCleaner;
use crate::config::PipelineConfig;
use crate::error::{CleaningError, Result, ResultExt};
use crate::io::{read_csv, write_csv};
use crate::pipeline::outliers::{OutlierHandler, OutlierReport};
use crate::pipeline::status::{
    ClosureStatusReporter, PipelineStage, SkipReason, StageRecord, StageStatus, StatusReporter,
};
use crate::table::Table;
use crate::types::{PipelineState, RunSummary};
use crate::utils::format_shape;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// The cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use data_prep::{Pipeline, PipelineConfig};
///
/// let summary = Pipeline::builder()
///     .config(PipelineConfig::builder().iqr_multiplier(3.0).build()?)
///     .on_status(|record| println!("{}", record.message))
///     .build()?
///     .run("accidents.csv", "cleaned_accidents.csv");
///
/// assert!(summary.succeeded());
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    status_reporter: Option<Arc<dyn StatusReporter>>,
}

static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run load → drop missing → drop duplicates → remove outliers → save.
    ///
    /// Every stage runs, in that order, whatever happened before it. The
    /// summary records the outcome of each one; this never returns an error.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> RunSummary {
        let (input, output) = (input.as_ref(), output.as_ref());
        let started_at = Utc::now().to_rfc3339();
        let start = Instant::now();
        let mut stages = Vec::with_capacity(PipelineStage::ALL.len());

        info!("Starting cleaning pipeline for {}", input.display());

        let (table, record) = self.load(input);
        let mut state = if record.is_completed() {
            PipelineState::Loaded
        } else {
            PipelineState::Empty
        };
        let rows_before = table.as_ref().map(Table::height);
        let columns = table
            .as_ref()
            .map(|t| t.schema().to_vec())
            .unwrap_or_default();
        stages.push(record);

        let (table, record) = self.drop_missing(table);
        stages.push(record);

        let (table, record) = self.drop_duplicates(table);
        stages.push(record);

        let (table, record, outliers) = self.outlier_stage(table);
        stages.push(record);

        if table.is_some() {
            state = PipelineState::Cleaned;
        }

        let record = self.save(table.as_ref(), output);
        if record.is_completed() {
            state = PipelineState::Saved;
        }
        stages.push(record);

        let summary = RunSummary {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            final_state: state,
            rows_before,
            rows_after: table.as_ref().map(Table::height),
            columns,
            stages,
            outliers,
        };

        info!(
            "Pipeline finished in {}ms with state {:?}",
            summary.duration_ms, summary.final_state
        );
        summary
    }

    /// Load the input CSV.
    ///
    /// On failure the returned table is `None` and the record carries the cause.
    pub fn load(&self, path: impl AsRef<Path>) -> (Option<Table>, StageRecord) {
        let path = path.as_ref();
        debug!("Loading {}", path.display());

        match read_csv(path, &self.config) {
            Ok(table) => {
                let shape = table.shape();
                let record = StageRecord::completed(
                    PipelineStage::Load,
                    format!("Data loaded successfully. Shape: {}", format_shape(shape)),
                    None,
                    Some(shape),
                );
                (Some(table), self.emit(record))
            }
            Err(e) => (None, self.emit(StageRecord::failed(PipelineStage::Load, &e, None))),
        }
    }

    /// Drop rows holding a missing value in any column.
    pub fn drop_missing(&self, table: Option<Table>) -> (Option<Table>, StageRecord) {
        self.clean_stage(
            PipelineStage::DropMissing,
            self.config.drop_missing,
            table,
            |table| {
                let (cleaned, removed) = DataCleaner::drop_missing(table)
                    .context("Failed to drop missing values")?;
                let message = format!("Missing values handled. Rows dropped: {}", removed);
                Ok((cleaned, message))
            },
        )
    }

    /// Drop rows repeating an earlier row, keeping the first occurrence.
    pub fn drop_duplicates(&self, table: Option<Table>) -> (Option<Table>, StageRecord) {
        self.clean_stage(
            PipelineStage::DropDuplicates,
            self.config.remove_duplicates,
            table,
            |table| {
                let before = table.shape();
                let (cleaned, _) = DataCleaner::drop_duplicates(table)
                    .context("Failed to remove duplicates")?;
                let message = format!(
                    "Duplicates removed. Shape before: {}, Shape after: {}",
                    format_shape(before),
                    format_shape(cleaned.shape())
                );
                Ok((cleaned, message))
            },
        )
    }

    /// Drop rows holding an IQR outlier in any numeric column.
    pub fn remove_outliers(&self, table: Option<Table>) -> (Option<Table>, StageRecord) {
        let (table, record, _) = self.outlier_stage(table);
        (table, record)
    }

    /// Write the table to `path` as CSV.
    pub fn save(&self, table: Option<&Table>, path: impl AsRef<Path>) -> StageRecord {
        let path = path.as_ref();
        let Some(table) = table else {
            return self.emit(StageRecord::not_loaded(PipelineStage::Save));
        };

        let shape = table.shape();
        let record = match write_csv(table, path) {
            Ok(()) => StageRecord::completed(
                PipelineStage::Save,
                format!("Cleaned data saved to {}", path.display()),
                Some(shape),
                Some(shape),
            ),
            Err(e) => StageRecord::failed(PipelineStage::Save, &e, Some(shape)),
        };
        self.emit(record)
    }

    fn outlier_stage(
        &self,
        table: Option<Table>,
    ) -> (Option<Table>, StageRecord, Option<OutlierReport>) {
        let mut report = None;
        let (table, record) = self.clean_stage(
            PipelineStage::RemoveOutliers,
            self.config.remove_outliers,
            table,
            |table| {
                let (cleaned, outliers) =
                    OutlierHandler::remove_outliers(table, &self.config.outliers)
                        .context("Failed to remove outliers")?;
                let message = format!(
                    "Outliers removed. Shape before: {}, Shape after: {}",
                    format_shape(outliers.shape_before),
                    format_shape(outliers.shape_after)
                );
                report = Some(outliers);
                Ok((cleaned, message))
            },
        );
        (table, record, report)
    }

    /// Shared guard and error policy for the row-dropping stages.
    fn clean_stage<F>(
        &self,
        stage: PipelineStage,
        enabled: bool,
        table: Option<Table>,
        op: F,
    ) -> (Option<Table>, StageRecord)
    where
        F: FnOnce(&Table) -> Result<(Table, String)>,
    {
        let Some(table) = table else {
            return (None, self.emit(StageRecord::not_loaded(stage)));
        };

        let before = table.shape();
        if !enabled {
            return (Some(table), self.emit(StageRecord::disabled(stage, before)));
        }

        match op(&table) {
            Ok((cleaned, message)) => {
                let after = cleaned.shape();
                let record = StageRecord::completed(stage, message, Some(before), Some(after));
                (Some(cleaned), self.emit(record))
            }
            Err(e) => (Some(table), self.emit(StageRecord::failed(stage, &e, Some(before)))),
        }
    }

    /// Log a record and hand it to the reporter, if one is configured.
    fn emit(&self, record: StageRecord) -> StageRecord {
        match (record.status, record.skip_reason) {
            (StageStatus::Completed, _) => {
                debug!("[{}] {}", record.stage.display_name(), record.message)
            }
            (StageStatus::Skipped, Some(SkipReason::Disabled)) => {
                info!("[{}] {}", record.stage.display_name(), record.message)
            }
            (StageStatus::Skipped, _) => {
                warn!("[{}] {}", record.stage.display_name(), record.message)
            }
            (StageStatus::Failed, _) => {
                error!("[{}] {}", record.stage.display_name(), record.message)
            }
        }

        if let Some(reporter) = &self.status_reporter {
            reporter.report(&record);
        }
        record
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    status_reporter: Option<Arc<dyn StatusReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a status reporter.
    pub fn status_reporter(mut self, reporter: Arc<dyn StatusReporter>) -> Self {
        self.status_reporter = Some(reporter);
        self
    }

    /// Receive each stage record through a closure.
    pub fn on_status<F>(mut self, callback: F) -> Self
    where
        F: Fn(&StageRecord) + Send + Sync + 'static,
    {
        self.status_reporter = Some(Arc::new(ClosureStatusReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;

        Ok(Pipeline {
            config,
            status_reporter: self.status_reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutlierConfig;
    use polars::prelude::*;
    use std::sync::Mutex;

    fn pipeline() -> Pipeline {
        Pipeline::builder().build().unwrap()
    }

    fn sample_table() -> Table {
        Table::new(
            df![
                "district" => [Some("a"), Some("b"), Some("b"), None, Some("c"), Some("d"), Some("e"), Some("f")],
                "victims" => [Some(1i64), Some(2), Some(2), Some(3), Some(4), Some(5), Some(3), Some(100)],
            ]
            .unwrap(),
        )
    }

    #[test]
    fn test_stages_without_table_are_noops() {
        let pipeline = pipeline();

        let (table, record) = pipeline.drop_missing(None);
        assert!(table.is_none());
        assert_eq!(record.skip_reason, Some(SkipReason::NotLoaded));

        let (table, record) = pipeline.drop_duplicates(None);
        assert!(table.is_none());
        assert_eq!(record.status, StageStatus::Skipped);

        let (table, record) = pipeline.remove_outliers(None);
        assert!(table.is_none());
        assert_eq!(record.stage, PipelineStage::RemoveOutliers);

        let record = pipeline.save(None, "unused.csv");
        assert_eq!(record.skip_reason, Some(SkipReason::NotLoaded));
        assert!(!Path::new("unused.csv").exists());
    }

    #[test]
    fn test_stage_messages() {
        let pipeline = pipeline();
        let table = Some(sample_table());

        let (table, record) = pipeline.drop_missing(table);
        assert_eq!(record.message, "Missing values handled. Rows dropped: 1");

        let (table, record) = pipeline.drop_duplicates(table);
        assert_eq!(
            record.message,
            "Duplicates removed. Shape before: (7, 2), Shape after: (6, 2)"
        );

        let (table, record) = pipeline.remove_outliers(table);
        assert_eq!(
            record.message,
            "Outliers removed. Shape before: (6, 2), Shape after: (5, 2)"
        );
        assert_eq!(table.unwrap().shape(), (5, 2));
    }

    #[test]
    fn test_disabled_stage_passes_table_through() {
        let pipeline = Pipeline::builder()
            .config(
                PipelineConfig::builder()
                    .remove_duplicates(false)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let (table, record) = pipeline.drop_duplicates(Some(sample_table()));
        assert_eq!(record.skip_reason, Some(SkipReason::Disabled));
        assert_eq!(table.unwrap().height(), 8);
    }

    #[test]
    fn test_reporter_sees_every_record() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let pipeline = Pipeline::builder()
            .on_status(move |record| sink.lock().unwrap().push(record.stage))
            .build()
            .unwrap();

        let (table, _) = pipeline.drop_missing(None);
        pipeline.save(table.as_ref(), "unused.csv");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![PipelineStage::DropMissing, PipelineStage::Save]
        );
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = PipelineConfig::default();
        config.outliers = OutlierConfig {
            iqr_multiplier: -2.0,
            ..OutlierConfig::default()
        };

        let result = Pipeline::builder().config(config).build();
        assert!(matches!(result, Err(CleaningError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_with_missing_input_never_errors() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let summary = pipeline().run(dir.path().join("absent.csv"), &output);

        assert_eq!(summary.final_state, PipelineState::Empty);
        assert_eq!(summary.stages.len(), 5);
        assert!(summary.stages[0].is_failed());
        assert_eq!(summary.stages[0].error_code.as_deref(), Some("LOAD_ERROR"));
        for record in &summary.stages[1..] {
            assert_eq!(record.skip_reason, Some(SkipReason::NotLoaded));
        }
        assert!(!output.exists());
        assert!(!summary.succeeded());
        assert!(summary.outliers.is_none());
    }
}
