//! CLI entry point for the dataset cleaner.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use vizclean::{
    Cleaner, CleanerConfig, CleanerConfigBuilder, CleaningReport, DataProfiler, Dataset,
    EmptyColumnPolicy, ReportGenerator, RunReport, SummaryRequest, io,
};

/// File name of the cleaned table inside the output directory.
const CLEANED_FILE_NAME: &str = "cleaned_data.csv";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a CSV dataset before charting it",
    long_about = "Normalizes column names, removes duplicate rows, drops sparse columns \
                  and fills missing cells by inferred column type.\n\n\
                  EXAMPLES:\n  \
                  # Clean a file into ./outputs/cleaned_data.csv\n  \
                  vizclean -i sales.csv\n\n  \
                  # Preview the profile without writing anything\n  \
                  vizclean -i sales.csv --dry-run\n\n  \
                  # Stricter sparse-column threshold, JSON report on stdout\n  \
                  vizclean -i sales.csv --missing-col-threshold 0.3 --json"
)]
struct Args {
    /// Path to the CSV file to clean
    #[arg(short, long)]
    input: String,

    /// Output directory for the cleaned CSV and report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// JSON file with cleaner settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Missing column threshold (0.0 - 1.0)
    ///
    /// Columns with a larger share of missing cells are dropped
    #[arg(long)]
    missing_col_threshold: Option<f64>,

    /// Keep duplicate rows
    #[arg(long)]
    keep_duplicates: bool,

    /// Keep column names as they appear in the file
    #[arg(long)]
    no_normalize_names: bool,

    /// Leave columns with no present values unfilled instead of failing
    #[arg(long)]
    keep_empty_columns: bool,

    /// Preview the dataset profile and planned actions without cleaning
    #[arg(long)]
    dry_run: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Print the language-model prompt that would summarize the cleaned data
    #[arg(long)]
    summary_prompt: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    let cleaner = Cleaner::new(config)?;

    let data = io::load_csv(&args.input)?;

    if args.dry_run {
        run_dry_run(&args, &cleaner, &data);
        return Ok(());
    }

    let outcome = cleaner.clean_with_report(&data).map_err(|e| {
        error!("Cleaning failed: {}", e);
        anyhow!("Cleaning failed: {}", e)
    })?;

    let output_path = Path::new(&args.output).join(CLEANED_FILE_NAME);
    io::write_csv(&outcome.dataset, &output_path)?;

    let profile = DataProfiler::profile_dataset(&outcome.dataset);
    let report = ReportGenerator::build_run_report(
        &args.input,
        output_path.to_str(),
        outcome.report,
        profile,
    );

    handle_output(&args, &outcome.dataset, &report, cleaner.config().summary_sample_rows)?;
    Ok(())
}

/// Handle output based on CLI flags.
///
/// The report file is written first so that it is produced whichever
/// stdout mode is selected:
/// - `--emit-report`: write JSON report to file
/// - `--summary-prompt`: print the summary prompt
/// - `--json`: print JSON to stdout only
/// - Default: print human-readable summary
fn handle_output(
    args: &Args,
    cleaned: &Dataset,
    report: &RunReport,
    summary_rows: usize,
) -> Result<Option<PathBuf>> {
    let report_path = if args.emit_report {
        let generator = ReportGenerator::new(PathBuf::from(&args.output));
        let path = generator.write_report_to_file(report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", path.display());
        Some(path)
    } else {
        None
    };

    if args.summary_prompt {
        let request = SummaryRequest::from_dataset(cleaned, summary_rows, 0)?;
        println!("{}", request.prompt);
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_human_readable_summary(report);
    }

    Ok(report_path)
}

/// Merge the optional config file with command-line overrides.
fn build_config(args: &Args) -> Result<CleanerConfig> {
    let base = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            CleanerConfig::from_json_file(path)?
        }
        None => CleanerConfig::default(),
    };

    let mut builder = CleanerConfigBuilder::from_config(&base);
    if let Some(threshold) = args.missing_col_threshold {
        builder = builder.missing_column_threshold(threshold);
    }
    if args.keep_duplicates {
        builder = builder.remove_duplicates(false);
    }
    if args.no_normalize_names {
        builder = builder.normalize_names(false);
    }
    if args.keep_empty_columns {
        builder = builder.empty_column_policy(EmptyColumnPolicy::Keep);
    }

    Ok(builder.build()?)
}

/// Run dry-run mode - show what would happen without cleaning.
///
/// Uses `println!` for user-facing output so the preview is visible
/// regardless of log level.
fn run_dry_run(args: &Args, cleaner: &Cleaner, data: &Dataset) {
    let config = cleaner.config();
    let profile = DataProfiler::profile_dataset(data);

    println!("\n{}", "=".repeat(80));
    println!("DRY RUN - Preview of cleaning actions");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  File: {}", args.input);
    println!("  Rows: {}", profile.shape.0);
    println!("  Columns: {}", profile.shape.1);
    println!();

    println!("COLUMN PROFILES");
    println!("{}", "-".repeat(40));
    println!(
        "{:<24} {:<12} {:<10} {:<8} {}",
        "Column", "Kind", "Missing %", "Unique", "Samples"
    );
    println!("{}", "-".repeat(80));
    for col in &profile.column_profiles {
        println!(
            "{:<24} {:<12} {:<10.1} {:<8} {}",
            truncate_str(&col.name, 23),
            col.kind.map_or("empty", |k| k.as_str()),
            col.missing_percentage,
            col.unique_count,
            col.sample_values.join(", ")
        );
    }
    println!();

    println!("PROPOSED ACTIONS");
    println!("{}", "-".repeat(40));
    if config.normalize_names {
        println!("  1. Normalize column names (spaces/hyphens -> '_', trim, lowercase)");
    } else {
        println!("  1. Keep column names as-is");
    }
    if config.remove_duplicates {
        println!(
            "  2. Remove {} duplicate rows ({:.1}%)",
            profile.duplicate_count, profile.duplicate_percentage
        );
    } else {
        println!("  2. Keep duplicate rows");
    }
    println!(
        "  3. Drop columns with >{:.0}% missing values (measured after step 2)",
        config.missing_column_threshold * 100.0
    );
    println!("  4. Impute missing cells (numeric: median, temporal: earliest, categorical: mode)");
    println!();

    println!("OUTPUT FILES (will be created)");
    println!("{}", "-".repeat(40));
    println!("  - {}/{}", args.output, CLEANED_FILE_NAME);
    if args.emit_report {
        println!("  - {}/{}_report.json", args.output, extract_file_stem(&args.input));
    }
    println!();

    println!("{}", "=".repeat(80));
    println!("To execute this cleaning, run without --dry-run");
    println!("{}", "=".repeat(80));
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the cleaning run.
fn print_human_readable_summary(report: &RunReport) {
    let cleaning: &CleaningReport = &report.cleaning;

    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        report.input_file, cleaning.rows_before, cleaning.columns_before
    );
    if let Some(ref output_file) = report.output_file {
        println!(
            "Output: {} ({} rows x {} columns)",
            output_file, cleaning.rows_after, cleaning.columns_after
        );
    }
    println!();

    println!("Cleaning Summary:");
    println!("  Duration: {}ms", cleaning.duration_ms);
    println!("  Columns renamed: {}", cleaning.renamed_columns.len());
    println!("  Duplicate rows removed: {}", cleaning.duplicates_removed);
    println!("  Sparse columns dropped: {}", cleaning.dropped_columns.len());
    println!("  Cells imputed: {}", cleaning.cells_imputed());
    println!();

    if !cleaning.actions.is_empty() {
        println!("Actions Taken:");
        for action in &cleaning.actions {
            println!("  - {}", action);
        }
        println!();
    }

    let numeric = report.profile.numeric_columns();
    if !numeric.is_empty() {
        println!("Chartable numeric columns: {}", numeric.join(", "));
        println!();
    }

    println!("{}", "=".repeat(80));
}
