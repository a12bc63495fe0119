//! Type-directed imputation pass.

use crate::config::EmptyColumnPolicy;
use crate::error::{CleaningError, Result};
use crate::imputers::{ImputationStrategy, StatisticalImputer};
use crate::profiler::infer_kind;
use crate::reporting::ImputationRecord;
use crate::types::Dataset;
use tracing::{debug, warn};

/// Result of the imputation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImputationOutcome {
    /// One record per column that had missing cells filled.
    pub records: Vec<ImputationRecord>,
    /// Columns with no present values left as-is under [`EmptyColumnPolicy::Keep`].
    pub untouched: Vec<String>,
}

/// Fill every missing cell of `dataset` in place using the statistic that
/// matches each column's inferred kind.
///
/// Columns without missing cells are left alone. A column with missing cells
/// but no present values is handled by `policy`.
pub fn impute_missing(dataset: &mut Dataset, policy: EmptyColumnPolicy) -> Result<ImputationOutcome> {
    let mut outcome = ImputationOutcome::default();

    for column in &mut dataset.columns {
        if column.missing_count() == 0 {
            continue;
        }

        let fill = infer_kind(&column.cells)
            .and_then(|kind| StatisticalImputer::fill_value(kind, &column.cells).map(|v| (kind, v)));

        let Some((kind, value)) = fill else {
            match policy {
                EmptyColumnPolicy::Fail => {
                    return Err(CleaningError::EmptyColumn(column.name.clone()));
                }
                EmptyColumnPolicy::Keep => {
                    warn!("Column '{}' has no present values; left unchanged", column.name);
                    outcome.untouched.push(column.name.clone());
                    continue;
                }
            }
        };

        let strategy = ImputationStrategy::for_kind(kind);
        let cells_filled = StatisticalImputer::fill_missing(&mut column.cells, &value);
        debug!(
            "Filled {} cells in '{}' ({}) with {}: {}",
            cells_filled, column.name, kind, strategy, value
        );

        outcome.records.push(ImputationRecord {
            column: column.name.clone(),
            kind,
            strategy,
            fill_value: value.to_string(),
            cells_filled,
        });
    }

    Ok(outcome)
}
