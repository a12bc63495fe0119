//! Removal of columns dominated by missing cells.

use crate::reporting::DroppedColumn;
use crate::types::Dataset;

/// Whether a column with `missing` missing cells out of `rows` exceeds the
/// missing fraction `threshold`.
///
/// With `rows == 0` the limit is 0, so only a positive missing count is sparse.
#[inline]
pub fn is_sparse(missing: usize, rows: usize, threshold: f64) -> bool {
    missing as f64 > threshold * rows as f64
}

/// Drop every column whose missing fraction is strictly above `threshold`.
///
/// Returns the remaining dataset and the dropped columns in their original order.
pub fn drop_sparse_columns(dataset: Dataset, threshold: f64) -> (Dataset, Vec<DroppedColumn>) {
    let rows = dataset.row_count();
    let mut dropped = Vec::new();

    let columns = dataset
        .columns
        .into_iter()
        .filter(|column| {
            let missing = column.missing_count();
            if is_sparse(missing, rows, threshold) {
                dropped.push(DroppedColumn {
                    name: column.name.clone(),
                    missing_count: missing,
                });
                false
            } else {
                true
            }
        })
        .collect();

    (Dataset::new(columns), dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    #[test]
    fn test_is_sparse_half_threshold() {
        assert!(is_sparse(3, 4, 0.5));
        assert!(!is_sparse(2, 4, 0.5));
        assert!(is_sparse(2, 3, 0.5));
        assert!(!is_sparse(0, 0, 0.5));
        assert!(!is_sparse(4, 4, 1.0));
        assert!(is_sparse(1, 10, 0.0));
    }

    #[test]
    fn test_drop_column_with_three_of_four_missing() {
        let ds = Dataset::new(vec![
            Column::new("keep", [Some(1i64), None, Some(3), Some(4)]),
            Column::new("drop", [Some(1i64), None, None, None]),
        ]);
        let (result, dropped) = drop_sparse_columns(ds, 0.5);

        assert_eq!(result.column_names(), vec!["keep"]);
        assert_eq!(
            dropped,
            vec![DroppedColumn {
                name: "drop".to_string(),
                missing_count: 3
            }]
        );
    }

    #[test]
    fn test_exactly_half_missing_is_kept() {
        let ds = Dataset::new(vec![Column::new("half", [Some(1i64), None])]);
        let (result, dropped) = drop_sparse_columns(ds, 0.5);
        assert_eq!(result.column_count(), 1);
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_all_missing_column_dropped() {
        let ds = Dataset::new(vec![
            Column::new("a", [1i64, 2]),
            Column::new("empty", [Option::<i64>::None, None]),
        ]);
        let (result, dropped) = drop_sparse_columns(ds, 0.5);
        assert_eq!(result.column_names(), vec!["a"]);
        assert_eq!(dropped[0].missing_count, 2);
    }
}
