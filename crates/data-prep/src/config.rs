//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup. The defaults reproduce the
//! plain load → drop missing → drop duplicates → IQR filter → save run.

use serde::{Deserialize, Serialize};

/// Cells read as missing by default.
///
/// This is the default NA marker set of the dataframe library the cleaning
/// recipe was first written against, so the same input files yield the same
/// missing cells.
pub const DEFAULT_NULL_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parameters of the IQR outlier filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierConfig {
    /// Quantile used as Q1.
    /// Default: 0.25
    pub lower_quantile: f64,

    /// Quantile used as Q3.
    /// Default: 0.75
    pub upper_quantile: f64,

    /// Multiplier applied to the IQR to widen the accepted range.
    /// Default: 1.5
    pub iqr_multiplier: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            lower_quantile: 0.25,
            upper_quantile: 0.75,
            iqr_multiplier: 1.5,
        }
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use data_prep::config::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .iqr_multiplier(3.0)
///     .remove_duplicates(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of rows scanned to infer column types.
    /// `None` scans the whole file.
    /// Default: None
    pub infer_schema_length: Option<usize>,

    /// Cell values read as missing.
    /// Default: [`DEFAULT_NULL_VALUES`]
    pub null_values: Vec<String>,

    /// Whether to drop rows containing missing values.
    /// Default: true
    pub drop_missing: bool,

    /// Whether to remove duplicate rows.
    /// Default: true
    pub remove_duplicates: bool,

    /// Whether to remove IQR outliers from numeric columns.
    /// Default: true
    pub remove_outliers: bool,

    /// Outlier filter parameters.
    pub outliers: OutlierConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            infer_schema_length: None,
            null_values: default_null_values(),
            drop_missing: true,
            remove_duplicates: true,
            remove_outliers: true,
            outliers: OutlierConfig::default(),
        }
    }
}

fn default_null_values() -> Vec<String> {
    DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect()
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let outliers = &self.outliers;

        for (field, value) in [
            ("lower_quantile", outliers.lower_quantile),
            ("upper_quantile", outliers.upper_quantile),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidQuantile {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if outliers.lower_quantile > outliers.upper_quantile {
            return Err(ConfigValidationError::InvertedQuantiles {
                lower: outliers.lower_quantile,
                upper: outliers.upper_quantile,
            });
        }

        if !outliers.iqr_multiplier.is_finite() || outliers.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier(
                outliers.iqr_multiplier,
            ));
        }

        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::ZeroInferSchemaLength);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid quantile for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidQuantile { field: String, value: f64 },

    #[error("Lower quantile {lower} is greater than upper quantile {upper}")]
    InvertedQuantiles { lower: f64, upper: f64 },

    #[error("Invalid IQR multiplier: {0} (must be a finite value >= 0)")]
    InvalidMultiplier(f64),

    #[error("Schema inference length must be at least 1 row")]
    ZeroInferSchemaLength,
}

impl From<ConfigValidationError> for crate::error::CleaningError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::CleaningError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    infer_schema_length: Option<usize>,
    null_values: Option<Vec<String>>,
    drop_missing: Option<bool>,
    remove_duplicates: Option<bool>,
    remove_outliers: Option<bool>,
    lower_quantile: Option<f64>,
    upper_quantile: Option<f64>,
    iqr_multiplier: Option<f64>,
}

impl PipelineConfigBuilder {
    /// Limit type inference to the first `rows` rows.
    pub fn infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Replace the set of cell values read as missing.
    pub fn null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable dropping rows with missing values.
    pub fn drop_missing(mut self, enable: bool) -> Self {
        self.drop_missing = Some(enable);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, enable: bool) -> Self {
        self.remove_duplicates = Some(enable);
        self
    }

    /// Enable or disable IQR outlier removal.
    pub fn remove_outliers(mut self, enable: bool) -> Self {
        self.remove_outliers = Some(enable);
        self
    }

    /// Set the quantiles used as Q1 and Q3.
    ///
    /// # Arguments
    /// * `lower` - Value between 0.0 and 1.0 (e.g., 0.25)
    /// * `upper` - Value between `lower` and 1.0 (e.g., 0.75)
    pub fn quantiles(mut self, lower: f64, upper: f64) -> Self {
        self.lower_quantile = Some(lower);
        self.upper_quantile = Some(upper);
        self
    }

    /// Set the IQR multiplier (1.5 is Tukey's fences).
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = OutlierConfig::default();
        let config = PipelineConfig {
            infer_schema_length: self.infer_schema_length,
            null_values: self.null_values.unwrap_or_else(default_null_values),
            drop_missing: self.drop_missing.unwrap_or(true),
            remove_duplicates: self.remove_duplicates.unwrap_or(true),
            remove_outliers: self.remove_outliers.unwrap_or(true),
            outliers: OutlierConfig {
                lower_quantile: self.lower_quantile.unwrap_or(defaults.lower_quantile),
                upper_quantile: self.upper_quantile.unwrap_or(defaults.upper_quantile),
                iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            },
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.infer_schema_length, None);
        assert_eq!(config.outliers.lower_quantile, 0.25);
        assert_eq!(config.outliers.upper_quantile, 0.75);
        assert_eq!(config.outliers.iqr_multiplier, 1.5);
        assert!(config.drop_missing);
        assert!(config.remove_duplicates);
        assert!(config.remove_outliers);
        assert!(config.null_values.iter().any(|v| v == "NaN"));
        assert!(config.null_values.iter().any(|v| v.is_empty()));
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = PipelineConfig::builder().build().unwrap();
        let default = PipelineConfig::default();
        assert_eq!(built.outliers, default.outliers);
        assert_eq!(built.null_values, default.null_values);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .infer_schema_length(50)
            .null_values(["?", "-"])
            .remove_duplicates(false)
            .quantiles(0.1, 0.9)
            .iqr_multiplier(3.0)
            .build()
            .unwrap();

        assert_eq!(config.infer_schema_length, Some(50));
        assert_eq!(config.null_values, vec!["?".to_string(), "-".to_string()]);
        assert!(!config.remove_duplicates);
        assert!(config.drop_missing);
        assert_eq!(config.outliers.lower_quantile, 0.1);
        assert_eq!(config.outliers.upper_quantile, 0.9);
        assert_eq!(config.outliers.iqr_multiplier, 3.0);
    }

    #[test]
    fn test_validation_invalid_quantile() {
        let result = PipelineConfig::builder().quantiles(-0.1, 0.75).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidQuantile { .. }
        ));
    }

    #[test]
    fn test_validation_inverted_quantiles() {
        let result = PipelineConfig::builder().quantiles(0.8, 0.2).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvertedQuantiles { .. }
        ));
    }

    #[test]
    fn test_validation_invalid_multiplier() {
        assert!(PipelineConfig::builder().iqr_multiplier(-1.0).build().is_err());
        assert!(
            PipelineConfig::builder()
                .iqr_multiplier(f64::NAN)
                .build()
                .is_err()
        );
        assert!(PipelineConfig::builder().iqr_multiplier(0.0).build().is_ok());
    }

    #[test]
    fn test_validation_zero_infer_length() {
        let result = PipelineConfig::builder().infer_schema_length(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ZeroInferSchemaLength
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "infer_schema_length": 200,
            "null_values": ["", "NA"],
            "drop_missing": true,
            "remove_duplicates": false,
            "remove_outliers": true,
            "outliers": {
                "lower_quantile": 0.2,
                "upper_quantile": 0.8,
                "iqr_multiplier": 2.0
            }
        }"#;

        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.infer_schema_length, Some(200));
        assert_eq!(config.null_values.len(), 2);
        assert!(!config.remove_duplicates);
        assert_eq!(config.outliers.iqr_multiplier, 2.0);
        assert!(config.validate().is_ok());
    }
}
