//! Row filters applied by the dashboard to a cleaned dataset.
//!
//! Filters never mutate their input: [`FilterSet::apply`] returns a new
//! [`Dataset`] with the surviving rows in their original order.

use crate::error::{CleaningError, Result};
use crate::profiler::temporal_value;
use crate::types::{Cell, Dataset};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Keep rows whose cell in `column` renders to one of `selected`.
///
/// An empty selection hides every row. Missing cells never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub column: String,
    pub selected: BTreeSet<String>,
}

impl CategoryFilter {
    pub fn new<I, S>(column: impl Into<String>, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }

    fn matches(&self, cell: &Cell) -> bool {
        cell.is_present() && self.selected.contains(&cell.to_string())
    }
}

/// Keep rows whose date in `column` lies within `[start, end]`.
///
/// Cells that are missing or do not parse as a date are excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeFilter {
    pub column: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRangeFilter {
    pub fn new(column: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            column: column.into(),
            start,
            end,
        }
    }

    fn matches(&self, cell: &Cell) -> bool {
        temporal_value(cell)
            .map(|dt| dt.date())
            .is_some_and(|d| self.start <= d && d <= self.end)
    }
}

/// All filters currently active in the dashboard. Rows must pass every filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub categories: Vec<CategoryFilter>,
    pub date_ranges: Vec<DateRangeFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, filter: CategoryFilter) -> Self {
        self.categories.push(filter);
        self
    }

    pub fn with_date_range(mut self, filter: DateRangeFilter) -> Self {
        self.date_ranges.push(filter);
        self
    }

    /// Returns `true` when no filter is configured.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.date_ranges.is_empty()
    }

    /// Indices of rows passing every filter.
    ///
    /// Fails with [`CleaningError::ColumnNotFound`] if a filter names an
    /// unknown column.
    pub fn matching_rows(&self, dataset: &Dataset) -> Result<Vec<usize>> {
        let categories = self
            .categories
            .iter()
            .map(|f| Ok((f, column_cells(dataset, &f.column)?)))
            .collect::<Result<Vec<_>>>()?;
        let date_ranges = self
            .date_ranges
            .iter()
            .map(|f| Ok((f, column_cells(dataset, &f.column)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok((0..dataset.row_count())
            .filter(|&row| {
                categories.iter().all(|(f, cells)| f.matches(&cells[row]))
                    && date_ranges.iter().all(|(f, cells)| f.matches(&cells[row]))
            })
            .collect())
    }

    /// New dataset containing only the rows passing every filter.
    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset> {
        if self.is_empty() {
            return Ok(dataset.clone());
        }
        let rows = self.matching_rows(dataset)?;
        Ok(dataset.take_rows(&rows))
    }
}

fn column_cells<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a [Cell]> {
    dataset
        .column(name)
        .map(|c| c.cells.as_slice())
        .ok_or_else(|| CleaningError::ColumnNotFound(name.to_string()))
}

/// Distinct present values of a column, rendered as text, in first-seen order.
///
/// These are the options offered by a multiselect filter.
pub fn unique_values(dataset: &Dataset, column: &str) -> Result<Vec<String>> {
    let cells = column_cells(dataset, column)?;
    let mut seen = HashSet::new();
    Ok(cells
        .iter()
        .filter(|c| c.is_present())
        .map(Cell::to_string)
        .filter(|v| seen.insert(v.clone()))
        .collect())
}

/// Names of columns whose name contains "date", ignoring case.
pub fn date_columns(dataset: &Dataset) -> Vec<&str> {
    dataset
        .columns
        .iter()
        .filter(|c| c.name.to_lowercase().contains("date"))
        .map(|c| c.name.as_str())
        .collect()
}

/// Earliest and latest dates found in a column, used as the default range.
pub fn date_bounds(dataset: &Dataset, column: &str) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let cells = column_cells(dataset, column)?;
    let mut dates = cells.iter().filter_map(temporal_value).map(|dt| dt.date());
    let Some(first) = dates.next() else {
        return Ok(None);
    };
    Ok(Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn orders() -> Dataset {
        Dataset::new(vec![
            Column::new("region", ["north", "south", "north", "east"]),
            Column::new("order_date", ["2020-01-01", "2020-02-15", "2020-03-01", "bad"]),
            Column::new("amount", [10i64, 20, 30, 40]),
        ])
    }

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, d).unwrap()
    }

    #[test]
    fn test_category_filter() {
        let filters = FilterSet::new().with_category(CategoryFilter::new("region", ["north"]));
        let result = filters.apply(&orders()).unwrap();

        assert_eq!(result.row_count(), 2);
        assert_eq!(
            result.column("amount").unwrap().cells,
            vec![Cell::Integer(10), Cell::Integer(30)]
        );
    }

    #[test]
    fn test_empty_selection_hides_everything() {
        let filters =
            FilterSet::new().with_category(CategoryFilter::new("region", Vec::<String>::new()));
        assert_eq!(filters.apply(&orders()).unwrap().row_count(), 0);
    }

    #[test]
    fn test_date_range_filter_inclusive() {
        let filters = FilterSet::new().with_date_range(DateRangeFilter::new(
            "order_date",
            day(1, 1),
            day(2, 15),
        ));
        assert_eq!(filters.matching_rows(&orders()).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_filters_combine() {
        let filters = FilterSet::new()
            .with_category(CategoryFilter::new("region", ["north", "south"]))
            .with_date_range(DateRangeFilter::new("order_date", day(2, 1), day(12, 31)));
        assert_eq!(filters.matching_rows(&orders()).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_unknown_column() {
        let filters = FilterSet::new().with_category(CategoryFilter::new("nope", ["x"]));
        let err = filters.apply(&orders()).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let input = orders();
        let filters = FilterSet::new().with_category(CategoryFilter::new("region", ["east"]));
        let _ = filters.apply(&input).unwrap();
        assert_eq!(input, orders());
    }

    #[test]
    fn test_unique_values_first_seen_order() {
        assert_eq!(
            unique_values(&orders(), "region").unwrap(),
            vec!["north", "south", "east"]
        );
    }

    #[test]
    fn test_date_columns_and_bounds() {
        let ds = orders();
        assert_eq!(date_columns(&ds), vec!["order_date"]);
        assert_eq!(
            date_bounds(&ds, "order_date").unwrap(),
            Some((day(1, 1), day(3, 1)))
        );
        assert_eq!(date_bounds(&ds, "region").unwrap(), None);
    }
}
