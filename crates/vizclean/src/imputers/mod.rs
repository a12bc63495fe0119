//! Imputation module for handling missing values.
//!
//! Each inferred [`ColumnKind`] maps to exactly one strategy:
//! - Numeric → median
//! - Temporal → earliest value
//! - Categorical → mode

mod statistical;

pub use statistical::StatisticalImputer;

use crate::types::ColumnKind;
use serde::Serialize;
use std::fmt;

/// Statistic used to fill a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputationStrategy {
    Median,
    Earliest,
    Mode,
}

impl ImputationStrategy {
    /// Strategy applied to a column of the given kind.
    pub fn for_kind(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Numeric => ImputationStrategy::Median,
            ColumnKind::Temporal => ImputationStrategy::Earliest,
            ColumnKind::Categorical => ImputationStrategy::Mode,
        }
    }
}

impl fmt::Display for ImputationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImputationStrategy::Median => "median",
            ImputationStrategy::Earliest => "earliest",
            ImputationStrategy::Mode => "mode",
        };
        f.write_str(name)
    }
}
