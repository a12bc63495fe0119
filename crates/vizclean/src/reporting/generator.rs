use crate::error::Result;
use crate::imputers::ImputationStrategy;
use crate::profiler::DatasetProfile;
use crate::types::ColumnKind;
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Cleaning Report Types
// ============================================================================

/// A column whose name changed during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedColumn {
    pub from: String,
    pub to: String,
}

/// A column removed for having too many missing cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedColumn {
    pub name: String,
    pub missing_count: usize,
}

/// Missing cells filled in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputationRecord {
    pub column: String,
    pub kind: ColumnKind,
    pub strategy: ImputationStrategy,
    /// Text rendering of the fill value.
    pub fill_value: String,
    pub cells_filled: usize,
}

/// Everything one `clean` call did to a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    pub renamed_columns: Vec<RenamedColumn>,
    pub duplicates_removed: usize,
    pub dropped_columns: Vec<DroppedColumn>,
    pub imputations: Vec<ImputationRecord>,
    /// Columns with no present values left untouched by `EmptyColumnPolicy::Keep`.
    pub untouched_columns: Vec<String>,
    /// Human-readable description of each action, in execution order.
    pub actions: Vec<String>,
    pub duration_ms: u64,
}

impl CleaningReport {
    /// Total number of cells filled by imputation.
    pub fn cells_imputed(&self) -> usize {
        self.imputations.iter().map(|r| r.cells_filled).sum()
    }
}

/// Report of a full CLI run, written with `--emit-report` or printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub input_file: String,
    pub output_file: Option<String>,
    pub cleaning: CleaningReport,
    /// Profile of the cleaned dataset
    pub profile: DatasetProfile,
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds and persists [`RunReport`]s.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Assemble a run report stamped with the current local time.
    pub fn build_run_report(
        input_file: &str,
        output_file: Option<&str>,
        cleaning: CleaningReport,
        profile: DatasetProfile,
    ) -> RunReport {
        RunReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            output_file: output_file.map(str::to_string),
            cleaning,
            profile,
        }
    }

    /// Write a report as pretty JSON to `<output_dir>/<base_name>_report.json`.
    pub fn write_report_to_file(&self, report: &RunReport, report_base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
