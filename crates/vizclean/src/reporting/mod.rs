//! Report generation module.
//!
//! [`CleaningReport`] records what a single `clean` call did. [`RunReport`]
//! wraps it with file paths, a timestamp and a profile of the result for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//!
//! # Example
//!
//! ```rust,ignore
//! use vizclean::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_run_report("data.csv", None, outcome.report, profile);
//! ReportGenerator::new(PathBuf::from("output")).write_report_to_file(&report, "data")?;
//! ```

mod generator;

pub use generator::{
    CleaningReport, DroppedColumn, ImputationRecord, RenamedColumn, ReportGenerator, RunReport,
};
