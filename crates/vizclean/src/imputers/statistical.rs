//! Statistical imputation methods.
//!
//! Provides the median, earliest-value and mode statistics used to fill
//! missing cells, with explicit tie-breaking so results never depend on
//! hash iteration order.

use crate::profiler::{numeric_value, temporal_value};
use crate::types::{Cell, ColumnKind};
use std::collections::HashMap;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Standard median: the middle value, or the mean of the two middle
    /// values for an even count. `None` for an empty slice.
    pub fn median(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Some(sorted[mid])
        }
    }

    /// Fill value for a numeric column: the median of present values.
    ///
    /// The fill keeps the column's representation: `Integer` when every
    /// present value is an integer and the median is whole, `Text` when
    /// every present value is numeric text, `Float` otherwise. Integer
    /// columns are reduced in `i64`, so large values are never rounded
    /// through `f64`.
    pub fn median_fill(cells: &[Cell]) -> Option<Cell> {
        let mut present = cells.iter().filter(|c| c.is_present());
        let all_integer = present.clone().all(|c| matches!(c, Cell::Integer(_)));
        let all_text = present.all(|c| matches!(c, Cell::Text(_)));

        if all_integer {
            let ints: Vec<i64> = cells
                .iter()
                .filter_map(|c| match c {
                    Cell::Integer(v) => Some(*v),
                    _ => None,
                })
                .collect();
            return Self::integer_median(&ints);
        }

        let values: Vec<f64> = cells.iter().filter_map(numeric_value).collect();
        let median = Self::median(&values)?;
        if all_text {
            Some(Cell::Text(median.to_string()))
        } else {
            Some(Cell::Float(median))
        }
    }

    fn integer_median(values: &[i64]) -> Option<Cell> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            return Some(Cell::Integer(sorted[mid]));
        }
        let sum = sorted[mid - 1] as i128 + sorted[mid] as i128;
        if sum % 2 == 0 {
            // the mean of two i64 values always fits in i64
            Some(Cell::Integer((sum / 2) as i64))
        } else {
            Some(Cell::Float(sum as f64 / 2.0))
        }
    }

    /// Fill value for a temporal column: the earliest present value, in its
    /// original representation. Ties keep the first occurrence.
    pub fn earliest_fill(cells: &[Cell]) -> Option<Cell> {
        let mut earliest: Option<(chrono::NaiveDateTime, &Cell)> = None;
        for cell in cells {
            let Some(instant) = temporal_value(cell) else {
                continue;
            };
            match earliest {
                Some((current, _)) if current <= instant => {}
                _ => earliest = Some((instant, cell)),
            }
        }
        earliest.map(|(_, cell)| cell.clone())
    }

    /// Fill value for a categorical column: the most frequent present value.
    ///
    /// Ties go to the value whose text rendering sorts first; values that
    /// render identically are ordered by variant.
    pub fn mode_fill(cells: &[Cell]) -> Option<Cell> {
        let mut counts: HashMap<&Cell, usize> = HashMap::new();
        for cell in cells.iter().filter(|c| c.is_present()) {
            *counts.entry(cell).or_insert(0) += 1;
        }

        let max_count = counts.values().copied().max()?;
        counts
            .into_iter()
            .filter(|(_, count)| *count == max_count)
            .map(|(cell, _)| (cell.to_string(), cell.variant_rank(), cell))
            .min_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)))
            .map(|(_, _, cell)| cell.clone())
    }

    /// Fill value for a column of the given kind.
    pub fn fill_value(kind: ColumnKind, cells: &[Cell]) -> Option<Cell> {
        match kind {
            ColumnKind::Numeric => Self::median_fill(cells),
            ColumnKind::Temporal => Self::earliest_fill(cells),
            ColumnKind::Categorical => Self::mode_fill(cells),
        }
    }

    /// Replace every missing cell with `value`. Returns the number of cells filled.
    pub fn fill_missing(cells: &mut [Cell], value: &Cell) -> usize {
        let mut filled = 0;
        for cell in cells.iter_mut().filter(|c| c.is_missing()) {
            *cell = value.clone();
            filled += 1;
        }
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // ========================================================================
    // median() tests
    // ========================================================================

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(StatisticalImputer::median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(StatisticalImputer::median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(StatisticalImputer::median(&[42.0]), Some(42.0));
        assert_eq!(StatisticalImputer::median(&[]), None);
    }

    // ========================================================================
    // median_fill() tests
    // ========================================================================

    #[test]
    fn test_median_fill_keeps_integers() {
        let cells = vec![Cell::Integer(30), Cell::Missing, Cell::Integer(40), Cell::Integer(10)];
        assert_eq!(StatisticalImputer::median_fill(&cells), Some(Cell::Integer(30)));
    }

    #[test]
    fn test_median_fill_fractional_integer_median_is_float() {
        let cells = vec![Cell::Integer(1), Cell::Integer(2), Cell::Missing];
        assert_eq!(StatisticalImputer::median_fill(&cells), Some(Cell::Float(1.5)));
    }

    #[test]
    fn test_median_fill_large_integers_exact() {
        let big = (1i64 << 53) + 1;
        let cells = vec![Cell::Integer(big), Cell::Missing, Cell::Integer(big), Cell::Integer(1)];
        assert_eq!(StatisticalImputer::median_fill(&cells), Some(Cell::Integer(big)));

        let even = vec![Cell::Integer(big - 2), Cell::Integer(big + 2), Cell::Missing];
        assert_eq!(StatisticalImputer::median_fill(&even), Some(Cell::Integer(big)));
    }

    #[test]
    fn test_median_fill_with_infinity() {
        let cells = vec![
            Cell::Float(1.0),
            Cell::Float(f64::INFINITY),
            Cell::Float(3.0),
            Cell::Missing,
        ];
        assert_eq!(StatisticalImputer::median_fill(&cells), Some(Cell::Float(3.0)));
    }

    #[test]
    fn test_median_fill_mixed_numbers() {
        let cells = vec![Cell::Integer(1), Cell::Float(3.0), Cell::Missing];
        assert_eq!(StatisticalImputer::median_fill(&cells), Some(Cell::Float(2.0)));
    }

    #[test]
    fn test_median_fill_numeric_text() {
        let cells = vec![Cell::text("10"), Cell::text(" 20 "), Cell::Missing];
        assert_eq!(StatisticalImputer::median_fill(&cells), Some(Cell::text("15")));
    }

    #[test]
    fn test_median_fill_all_missing() {
        assert_eq!(StatisticalImputer::median_fill(&[Cell::Missing]), None);
    }

    // ========================================================================
    // earliest_fill() tests
    // ========================================================================

    #[test]
    fn test_earliest_fill_textual_dates() {
        let cells = vec![Cell::text("2020-01-05"), Cell::Missing, Cell::text("2020-01-01")];
        assert_eq!(
            StatisticalImputer::earliest_fill(&cells),
            Some(Cell::text("2020-01-01"))
        );
    }

    #[test]
    fn test_earliest_fill_tie_keeps_first() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let cells = vec![
            Cell::text("2021-06-01"),
            Cell::Date(date),
            Cell::text("2021-07-01"),
        ];
        assert_eq!(
            StatisticalImputer::earliest_fill(&cells),
            Some(Cell::text("2021-06-01"))
        );
    }

    // ========================================================================
    // mode_fill() tests
    // ========================================================================

    #[test]
    fn test_mode_fill_basic() {
        let cells = vec![Cell::text("red"), Cell::text("blue"), Cell::text("red"), Cell::Missing];
        assert_eq!(StatisticalImputer::mode_fill(&cells), Some(Cell::text("red")));
    }

    #[test]
    fn test_mode_fill_tie_breaks_lexicographically() {
        let cells = vec![
            Cell::text("pear"),
            Cell::text("apple"),
            Cell::text("pear"),
            Cell::text("apple"),
            Cell::Missing,
        ];
        assert_eq!(StatisticalImputer::mode_fill(&cells), Some(Cell::text("apple")));
    }

    #[test]
    fn test_mode_fill_tie_is_order_independent() {
        let forward = vec![Cell::text("b"), Cell::text("a"), Cell::text("c")];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(
            StatisticalImputer::mode_fill(&forward),
            StatisticalImputer::mode_fill(&backward)
        );
        assert_eq!(StatisticalImputer::mode_fill(&forward), Some(Cell::text("a")));
    }

    #[test]
    fn test_mode_fill_same_rendering_orders_by_variant() {
        let cells = vec![Cell::text("1"), Cell::Integer(1), Cell::text("x"), Cell::Missing];
        assert_eq!(StatisticalImputer::mode_fill(&cells), Some(Cell::Integer(1)));
    }

    // ========================================================================
    // fill_missing() tests
    // ========================================================================

    #[test]
    fn test_fill_missing_counts_filled_cells() {
        let mut cells = vec![Cell::Missing, Cell::Integer(1), Cell::Missing];
        let filled = StatisticalImputer::fill_missing(&mut cells, &Cell::Integer(7));
        assert_eq!(filled, 2);
        assert_eq!(cells, vec![Cell::Integer(7), Cell::Integer(1), Cell::Integer(7)]);
    }
}
