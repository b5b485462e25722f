//! CLI entry point for the CSV cleaning pipeline.

use anyhow::Result;
use clap::Parser;
use data_prep::{Pipeline, PipelineConfig, RunSummary, default_output_path};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author = "Data Prep Team",
    version,
    about = "Clean a CSV file: drop missing values, duplicates and IQR outliers",
    long_about = "Loads a CSV file, drops rows with missing values, drops duplicate rows,\n\
                  drops rows holding IQR outliers in any numeric column and writes the\n\
                  cleaned table to a new CSV file.\n\n\
                  Every stage prints one status line. A failed stage is reported and the\n\
                  remaining stages still run, so the exit code stays 0.\n\n\
                  EXAMPLES:\n  \
                  # Write cleaned_accidents.csv next to the input\n  \
                  data-prep -i accidents.csv\n\n  \
                  # Explicit output, wider outlier fences\n  \
                  data-prep -i accidents.csv -o clean.csv --iqr-multiplier 3\n\n  \
                  # Machine-readable summary\n  \
                  data-prep -i accidents.csv --json | jq .final_state"
)]
struct Args {
    /// Path to the CSV file to clean
    #[arg(short, long)]
    input: PathBuf,

    /// Path of the cleaned CSV file (overwritten if it exists)
    ///
    /// Defaults to "cleaned_<input file name>" in the input's directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Suppress the per-stage status lines
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON instead of status lines
    #[arg(long)]
    json: bool,

    /// Multiplier applied to the IQR when computing outlier fences
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Keep rows with missing values
    #[arg(long)]
    keep_missing: bool,

    /// Keep duplicate rows
    #[arg(long)]
    keep_duplicates: bool,

    /// Keep outlier rows
    #[arg(long)]
    keep_outliers: bool,

    /// Rows scanned to infer column types (default: all rows)
    #[arg(long)]
    infer_schema_length: Option<usize>,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the stage lines or the JSON summary.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = build_config(&args)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let mut builder = Pipeline::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_status(|record| println!("{}", record.message));
    }
    let pipeline = builder.build()?;

    let summary = pipeline.run(&args.input, &output);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    log_outcome(&summary);

    // Stage failures were already reported; they do not change the exit code.
    Ok(())
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder()
        .iqr_multiplier(args.iqr_multiplier)
        .drop_missing(!args.keep_missing)
        .remove_duplicates(!args.keep_duplicates)
        .remove_outliers(!args.keep_outliers);

    if let Some(rows) = args.infer_schema_length {
        builder = builder.infer_schema_length(rows);
    }

    Ok(builder.build()?)
}

fn log_outcome(summary: &RunSummary) {
    match summary.rows_removed() {
        Some(removed) => info!(
            "{} rows removed in {}ms ({:?})",
            removed, summary.duration_ms, summary.final_state
        ),
        None => info!("Nothing cleaned ({:?})", summary.final_state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["data-prep", "-i", "accidents.csv"]);
        assert_eq!(args.input, PathBuf::from("accidents.csv"));
        assert!(args.output.is_none());
        assert_eq!(args.iqr_multiplier, 1.5);
        assert!(!args.json);

        let config = build_config(&args).unwrap();
        assert!(config.drop_missing);
        assert!(config.remove_duplicates);
        assert!(config.remove_outliers);
        assert_eq!(config.infer_schema_length, None);
    }

    #[test]
    fn test_args_toggles() {
        let args = Args::parse_from([
            "data-prep",
            "--input",
            "in.csv",
            "--output",
            "out.csv",
            "--keep-duplicates",
            "--iqr-multiplier",
            "3",
            "--infer-schema-length",
            "500",
        ]);

        let config = build_config(&args).unwrap();
        assert!(!config.remove_duplicates);
        assert_eq!(config.outliers.iqr_multiplier, 3.0);
        assert_eq!(config.infer_schema_length, Some(500));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        let args = Args::parse_from(["data-prep", "-i", "in.csv", "--iqr-multiplier=-1"]);
        assert!(build_config(&args).is_err());
    }
}
