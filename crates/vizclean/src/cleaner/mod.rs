//! Data cleaning module.
//!
//! [`Cleaner`] runs four passes, each over the whole dataset and each
//! finishing before the next starts:
//! 1. Column name normalization
//! 2. Duplicate row removal
//! 3. Sparse column removal
//! 4. Type-directed imputation of missing cells
//!
//! The input is borrowed and never modified; the cleaned dataset is a new,
//! independent value.

mod duplicates;
mod imputation;
mod names;
mod sparse;

pub use duplicates::{duplicate_row_count, remove_duplicate_rows};
pub use imputation::{ImputationOutcome, impute_missing};
pub use names::{normalize_column_name, normalize_names};
pub use sparse::{drop_sparse_columns, is_sparse};

use crate::config::CleanerConfig;
use crate::error::{CleaningError, Result};
use crate::reporting::CleaningReport;
use crate::types::Dataset;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A cleaned dataset together with the report of how it was produced.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub dataset: Dataset,
    pub report: CleaningReport,
}

/// Stateless dataset cleaner.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// calls from several threads.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    config: CleanerConfig,
}

static_assertions::assert_impl_all!(Cleaner: Send, Sync);

impl Cleaner {
    /// Create a cleaner, validating the configuration.
    pub fn new(config: CleanerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Clean a dataset, discarding the report.
    pub fn clean(&self, dataset: &Dataset) -> Result<Dataset> {
        self.clean_with_report(dataset).map(|outcome| outcome.dataset)
    }

    /// Clean a dataset and describe every action taken.
    ///
    /// Duplicates are removed before imputation only, so rows that become
    /// equal once filled survive until the next call.
    ///
    /// # Errors
    ///
    /// - [`CleaningError::InvalidInput`] if columns have different lengths
    /// - [`CleaningError::DuplicateColumnName`] if two names collide
    /// - [`CleaningError::EmptyColumn`] if a retained column has no present
    ///   values and the policy is `Fail`
    pub fn clean_with_report(&self, dataset: &Dataset) -> Result<CleaningOutcome> {
        let started = Instant::now();
        dataset.validate()?;

        let (rows_before, columns_before) = dataset.shape();
        info!(
            "Cleaning dataset ({} rows x {} columns)...",
            rows_before, columns_before
        );

        let mut report = CleaningReport {
            rows_before,
            columns_before,
            ..Default::default()
        };
        let mut working = dataset.clone();

        // 1. Normalize column names
        report.renamed_columns = normalize_names(&mut working, self.config.normalize_names)?;
        for renamed in &report.renamed_columns {
            debug!("Renamed column '{}' -> '{}'", renamed.from, renamed.to);
        }
        if report.renamed_columns.is_empty() {
            report.actions.push("Column names already normalized".to_string());
        } else {
            report.actions.push(format!(
                "Normalized {} column names",
                report.renamed_columns.len()
            ));
        }

        // 2. Remove duplicate rows
        if self.config.remove_duplicates {
            let (deduped, removed) = remove_duplicate_rows(&working);
            working = deduped;
            report.duplicates_removed = removed;

            if removed > 0 {
                let pct = (removed as f64 / rows_before as f64) * 100.0;
                report
                    .actions
                    .push(format!("Removed {} duplicate rows ({:.1}%)", removed, pct));
                debug!("Removed {} duplicate rows", removed);
            } else {
                report.actions.push("No duplicate rows found".to_string());
            }
        }

        // 3. Drop sparse columns, against the row count after deduplication
        let threshold = self.config.missing_column_threshold;
        let (remaining, dropped) = drop_sparse_columns(working, threshold);
        working = remaining;
        if dropped.is_empty() {
            report.actions.push(format!(
                "No columns with >{:.0}% missing values found",
                threshold * 100.0
            ));
        } else {
            let names: Vec<&str> = dropped.iter().map(|d| d.name.as_str()).collect();
            warn!(
                "Dropping {} columns with >{:.0}% missing values: {:?}",
                dropped.len(),
                threshold * 100.0,
                names
            );
            report.actions.push(format!(
                "Removed {} columns with >{:.0}% missing values: {:?}",
                dropped.len(),
                threshold * 100.0,
                names
            ));
        }
        report.dropped_columns = dropped;

        // 4. Impute remaining missing cells
        let imputed = impute_missing(&mut working, self.config.empty_column_policy)?;
        for record in &imputed.records {
            report.actions.push(format!(
                "Filled {} missing cells in '{}' with {}: {}",
                record.cells_filled, record.column, record.strategy, record.fill_value
            ));
        }
        for name in &imputed.untouched {
            report
                .actions
                .push(format!("Left '{}' unchanged: no present values", name));
        }
        report.imputations = imputed.records;
        report.untouched_columns = imputed.untouched;

        (report.rows_after, report.columns_after) = working.shape();
        report.duration_ms = started.elapsed().as_millis() as u64;

        info!(
            "Cleaning complete: {} rows x {} columns, {} cells imputed",
            report.rows_after,
            report.columns_after,
            report.cells_imputed()
        );

        Ok(CleaningOutcome {
            dataset: working,
            report,
        })
    }
}

/// Clean a dataset with the default configuration.
pub fn clean(dataset: &Dataset) -> Result<Dataset> {
    Cleaner::default().clean(dataset)
}
