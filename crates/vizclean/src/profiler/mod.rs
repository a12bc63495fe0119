//! Data profiling module for dataset analysis.
//!
//! This module provides:
//! - Type inference for columns ([`infer_kind`])
//! - Value parsing used by inference, imputation and filters
//! - Per-column profiles for previews ([`DataProfiler`])

mod type_inference;

pub use type_inference::{
    DATE_FORMATS, DATETIME_FORMATS, infer_kind, numeric_value, parse_number, parse_temporal,
    temporal_value,
};

use crate::cleaner::duplicate_row_count;
use crate::types::{Column, ColumnKind, Dataset};
use serde::Serialize;
use std::collections::HashSet;

/// Number of sample values kept per column profile.
const SAMPLE_SIZE: usize = 5;

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    /// `None` when the column has no present values.
    pub kind: Option<ColumnKind>,
    pub missing_count: usize,
    pub missing_percentage: f64,
    pub unique_count: usize,
    /// First few distinct present values, rendered as text.
    pub sample_values: Vec<String>,
}

/// Summary of a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub shape: (usize, usize),
    pub column_profiles: Vec<ColumnProfile>,
    pub duplicate_count: usize,
    pub duplicate_percentage: f64,
}

impl DatasetProfile {
    /// Names of columns inferred as numeric.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.column_profiles
            .iter()
            .filter(|p| p.kind == Some(ColumnKind::Numeric))
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// Data profiler for analyzing dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of a dataset and count duplicate rows.
    pub fn profile_dataset(dataset: &Dataset) -> DatasetProfile {
        let rows = dataset.row_count();
        let column_profiles = dataset
            .columns
            .iter()
            .map(|c| Self::profile_column(c, rows))
            .collect();

        let duplicate_count = duplicate_row_count(dataset);
        let duplicate_percentage = if rows > 0 {
            (duplicate_count as f64 / rows as f64) * 100.0
        } else {
            0.0
        };

        DatasetProfile {
            shape: dataset.shape(),
            column_profiles,
            duplicate_count,
            duplicate_percentage,
        }
    }

    /// Profile a single column.
    pub fn profile_column(column: &Column, rows: usize) -> ColumnProfile {
        let missing_count = column.missing_count();
        let missing_percentage = if rows > 0 {
            (missing_count as f64 / rows as f64) * 100.0
        } else {
            0.0
        };

        let mut seen = HashSet::new();
        let mut sample_values = Vec::new();
        for cell in column.present() {
            if seen.insert(cell) && sample_values.len() < SAMPLE_SIZE {
                sample_values.push(cell.to_string());
            }
        }

        ColumnProfile {
            name: column.name.clone(),
            kind: infer_kind(&column.cells),
            missing_count,
            missing_percentage,
            unique_count: seen.len(),
            sample_values,
        }
    }
}
