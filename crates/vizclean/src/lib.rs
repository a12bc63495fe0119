//! Dataset Cleaning Library
//!
//! Cleans a raw tabular dataset before it is filtered and charted in a
//! dashboard.
//!
//! # Overview
//!
//! [`clean`] runs four passes, each over the whole dataset:
//!
//! - **Name normalization**: spaces and hyphens become `_`, names are trimmed
//!   and lowercased; collisions fail with [`CleaningError::DuplicateColumnName`]
//! - **Duplicate removal**: rows equal in every cell are dropped, keeping the
//!   first occurrence
//! - **Sparse columns**: columns with more than half their cells missing are
//!   dropped
//! - **Imputation**: missing cells are filled with the median (numeric), the
//!   earliest value (temporal) or the mode (categorical)
//!
//! Around the cleaner sit the collaborators a dashboard needs: CSV ingestion
//! and export ([`io`]), row filters ([`filter`]), chart axis validation
//! ([`chart`]) and summary request preparation ([`summary`]).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vizclean::{Cleaner, CleanerConfig, io};
//!
//! let raw = io::load_csv("sales.csv")?;
//!
//! // Default rules
//! let cleaned = vizclean::clean(&raw)?;
//!
//! // Custom threshold, with a report of every action taken
//! let config = CleanerConfig::builder()
//!     .missing_column_threshold(0.7)
//!     .build()?;
//! let outcome = Cleaner::new(config)?.clean_with_report(&raw)?;
//! for action in &outcome.report.actions {
//!     println!("{}", action);
//! }
//!
//! io::write_csv(&outcome.dataset, "outputs/cleaned_data.csv")?;
//! ```
//!
//! # Filtering and Charts
//!
//! ```rust,ignore
//! use vizclean::chart::{AxisOptions, ChartKind, ChartSpec};
//! use vizclean::filter::{CategoryFilter, FilterSet};
//!
//! let view = FilterSet::new()
//!     .with_category(CategoryFilter::new("region", ["north"]))
//!     .apply(&cleaned)?;
//!
//! let axes = AxisOptions::from_dataset(&view);
//! let chart = ChartSpec::new(ChartKind::Bar, "region", axes.y.first().map(String::as_str));
//! chart.validate(&view)?;
//! println!("{}", chart.title());
//! ```

pub mod chart;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod filter;
pub mod frame;
pub mod imputers;
pub mod io;
pub mod profiler;
pub mod reporting;
pub mod summary;
pub mod types;

// Re-exports for convenient access
pub use chart::{AxisOptions, ChartKind, ChartSpec};
pub use cleaner::{Cleaner, CleaningOutcome, clean};
pub use config::{CleanerConfig, CleanerConfigBuilder, ConfigValidationError, EmptyColumnPolicy};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use filter::{CategoryFilter, DateRangeFilter, FilterSet};
pub use imputers::{ImputationStrategy, StatisticalImputer};
pub use profiler::{ColumnProfile, DataProfiler, DatasetProfile};
pub use reporting::{CleaningReport, ReportGenerator, RunReport};
pub use summary::{SummaryProvider, SummaryRequest, summarize_dataset};
pub use types::{Cell, Column, ColumnKind, Dataset};
