//! Exact duplicate row detection.

use crate::types::{Cell, Dataset};
use std::collections::HashSet;

/// Indices of rows that are the first occurrence of their values, in order.
///
/// Two rows are duplicates when every cell is equal, missing-ness included.
pub(crate) fn first_occurrence_indices(dataset: &Dataset) -> Vec<usize> {
    let mut seen: HashSet<Vec<&Cell>> = HashSet::with_capacity(dataset.row_count());
    dataset
        .rows()
        .enumerate()
        .filter_map(|(idx, row)| seen.insert(row).then_some(idx))
        .collect()
}

/// Number of rows that repeat an earlier row.
pub fn duplicate_row_count(dataset: &Dataset) -> usize {
    dataset.row_count() - first_occurrence_indices(dataset).len()
}

/// Remove rows that exactly repeat an earlier row, keeping the first
/// occurrence and the order of survivors.
///
/// Returns the deduplicated dataset and the number of rows removed.
pub fn remove_duplicate_rows(dataset: &Dataset) -> (Dataset, usize) {
    let keep = first_occurrence_indices(dataset);
    let removed = dataset.row_count() - keep.len();
    if removed == 0 {
        return (dataset.clone(), 0);
    }
    (dataset.take_rows(&keep), removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let ds = Dataset::new(vec![
            Column::new("name", ["Alice", "Bob", "Alice", "Carol"]),
            Column::new("age", [Some(30i64), None, Some(30), Some(41)]),
        ]);
        let (deduped, removed) = remove_duplicate_rows(&ds);

        assert_eq!(removed, 1);
        assert_eq!(deduped.row_count(), 3);
        assert_eq!(
            deduped.column("name").unwrap().cells,
            vec![Cell::text("Alice"), Cell::text("Bob"), Cell::text("Carol")]
        );
    }

    #[test]
    fn test_missing_cells_compare_equal() {
        let ds = Dataset::new(vec![
            Column::new("a", [None, None, Some(1i64)]),
            Column::new("b", ["x", "x", "x"]),
        ]);
        assert_eq!(duplicate_row_count(&ds), 1);
    }

    #[test]
    fn test_missing_differs_from_present() {
        let ds = Dataset::new(vec![Column::new("a", [None, Some(1i64)])]);
        let (deduped, removed) = remove_duplicate_rows(&ds);
        assert_eq!(removed, 0);
        assert_eq!(deduped, ds);
    }

    #[test]
    fn test_type_differences_are_not_duplicates() {
        let ds = Dataset::new(vec![Column::new(
            "v",
            [Cell::Integer(1), Cell::Float(1.0), Cell::text("1")],
        )]);
        assert_eq!(duplicate_row_count(&ds), 0);
    }

    #[test]
    fn test_empty_dataset() {
        let (deduped, removed) = remove_duplicate_rows(&Dataset::default());
        assert_eq!(removed, 0);
        assert_eq!(deduped.row_count(), 0);
    }
}
