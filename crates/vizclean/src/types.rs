//! Core data model: [`Dataset`], [`Column`], [`Cell`] and [`ColumnKind`].
//!
//! A dataset is stored column-major. Every column must hold the same number
//! of cells; [`Dataset::validate`] checks this and the cleaner refuses
//! datasets that fail it.

use crate::error::{CleaningError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// Cell
// ============================================================================

/// A single value in a [`Column`].
///
/// Equality is structural and total: values of different variants never
/// compare equal (`Integer(30) != Float(30.0)`), and floats compare by bit
/// pattern so that cells can be hashed for duplicate detection.
#[derive(Debug, Clone)]
pub enum Cell {
    /// No recorded value.
    Missing,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 text.
    Text(String),
    /// Calendar date without time.
    Date(NaiveDate),
    /// Date and time without timezone.
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Convenience constructor for text cells.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Returns `true` if this cell has no recorded value.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Returns `true` if this cell holds a value.
    #[inline]
    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    /// Stable rank of the variant, used to order cells whose renderings coincide.
    pub(crate) fn variant_rank(&self) -> u8 {
        match self {
            Cell::Missing => 0,
            Cell::Integer(_) => 1,
            Cell::Float(_) => 2,
            Cell::Text(_) => 3,
            Cell::Date(_) => 4,
            Cell::DateTime(_) => 5,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Missing, Cell::Missing) => true,
            (Cell::Integer(a), Cell::Integer(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a.to_bits() == b.to_bits(),
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Date(a), Cell::Date(b)) => a == b,
            (Cell::DateTime(a), Cell::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variant_rank().hash(state);
        match self {
            Cell::Missing => {}
            Cell::Integer(v) => v.hash(state),
            Cell::Float(v) => v.to_bits().hash(state),
            Cell::Text(v) => v.hash(state),
            Cell::Date(v) => v.hash(state),
            Cell::DateTime(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(v) => f.write_str(v),
            Cell::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Cell::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Cells serialize as JSON scalars; temporal values use their display form.
impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Missing => serializer.serialize_none(),
            Cell::Integer(v) => serializer.serialize_i64(*v),
            Cell::Float(v) => serializer.serialize_f64(*v),
            Cell::Text(v) => serializer.serialize_str(v),
            Cell::Date(_) | Cell::DateTime(_) => serializer.collect_str(self),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::DateTime(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

// ============================================================================
// ColumnKind
// ============================================================================

/// Type inferred for a column from its present values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every present value is an integer or float.
    Numeric,
    /// Every present value is a date or date/time.
    Temporal,
    /// Anything else.
    Categorical,
}

impl ColumnKind {
    /// Lowercase name used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Temporal => "temporal",
            ColumnKind::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Column
// ============================================================================

/// One named field across all rows of a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Cell values in row order.
    pub cells: Vec<Cell>,
}

impl Column {
    /// Create a column from anything convertible into cells.
    pub fn new<I, T>(name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cell>,
    {
        Self {
            name: name.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Iterate over present (non-missing) cells.
    pub fn present(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_present())
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// In-memory tabular dataset: an ordered list of row-aligned columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Dataset {
    /// Columns in display order.
    pub columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset from columns without validating it.
    ///
    /// Use [`Dataset::validate`] to check the row-alignment invariant.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build a dataset from column names and row-major values.
    ///
    /// Fails with [`CleaningError::InvalidInput`] if a row does not have one
    /// value per column.
    pub fn from_rows<N, R, T>(names: &[N], rows: R) -> Result<Self>
    where
        N: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = T>,
        T: Into<Cell>,
    {
        let mut columns: Vec<Column> = names
            .iter()
            .map(|n| Column {
                name: n.as_ref().to_string(),
                cells: Vec::new(),
            })
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            let cells: Vec<Cell> = row.into_iter().map(Into::into).collect();
            if cells.len() != columns.len() {
                return Err(CleaningError::InvalidInput(format!(
                    "row {} has {} values but the dataset has {} columns",
                    row_idx,
                    cells.len(),
                    columns.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.cells.push(cell);
            }
        }

        Ok(Self { columns })
    }

    /// Check that every column has the same number of cells.
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.columns.first() else {
            return Ok(());
        };
        let expected = first.len();
        for column in &self.columns[1..] {
            if column.len() != expected {
                return Err(CleaningError::InvalidInput(format!(
                    "column '{}' has {} cells but column '{}' has {}",
                    column.name,
                    column.len(),
                    first.name,
                    expected
                )));
            }
        }
        Ok(())
    }

    /// Number of rows (length of the first column, 0 without columns).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Cells of row `index` across all columns, or `None` past the end.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[index]).collect())
    }

    /// Iterate over rows as vectors of cell references.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.row_count()).map(move |i| self.columns.iter().map(|c| &c.cells[i]).collect())
    }

    /// Total number of missing cells across all columns.
    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// New dataset keeping only the rows whose index is in `indices`, in that order.
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                cells: indices.iter().map(|&i| column.cells[i].clone()).collect(),
            })
            .collect();
        Self { columns }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cell_equality_is_structural() {
        assert_eq!(Cell::Integer(30), Cell::Integer(30));
        assert_ne!(Cell::Integer(30), Cell::Float(30.0));
        assert_eq!(Cell::Missing, Cell::Missing);
        assert_ne!(Cell::Missing, Cell::text(""));
        assert_eq!(Cell::Float(f64::NAN), Cell::Float(f64::NAN));
    }

    #[test]
    fn test_cell_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(Cell::Float(1.5));
        set.insert(Cell::Float(1.5));
        set.insert(Cell::text("1.5"));
        set.insert(Cell::Missing);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_cell_display() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        assert_eq!(Cell::Date(date).to_string(), "2020-01-05");
        assert_eq!(
            Cell::DateTime(date.and_hms_opt(8, 30, 0).unwrap()).to_string(),
            "2020-01-05 08:30:00"
        );
        assert_eq!(Cell::Float(2.5).to_string(), "2.5");
        assert_eq!(Cell::Missing.to_string(), "");
    }

    #[test]
    fn test_cell_serialization() {
        let cells = vec![Cell::Integer(1), Cell::Missing, Cell::text("a")];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[1,null,"a"]"#);
    }

    #[test]
    fn test_from_rows_builds_columns() {
        let ds = Dataset::from_rows(
            &["name", "age"],
            vec![
                vec![Cell::text("Alice"), Cell::Integer(30)],
                vec![Cell::text("Bob"), Cell::Missing],
            ],
        )
        .unwrap();

        assert_eq!(ds.shape(), (2, 2));
        assert_eq!(ds.column_names(), vec!["name", "age"]);
        assert_eq!(ds.column("age").unwrap().missing_count(), 1);
        assert_eq!(ds.row(1).unwrap(), vec![&Cell::text("Bob"), &Cell::Missing]);
        assert!(ds.row(2).is_none());
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let result = Dataset::from_rows(&["a", "b"], vec![vec![Cell::Integer(1)]]);
        assert!(matches!(result, Err(CleaningError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_mismatched_lengths() {
        let ds = Dataset::new(vec![
            Column::new("a", [1i64, 2]),
            Column::new("b", [Some(1i64)]),
        ]);
        let err = ds.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let ds = Dataset::default();
        assert!(ds.validate().is_ok());
        assert_eq!(ds.shape(), (0, 0));
        assert_eq!(ds.rows().count(), 0);
    }

    #[test]
    fn test_take_rows_preserves_order() {
        let ds = Dataset::new(vec![Column::new("n", [1i64, 2, 3])]);
        let taken = ds.take_rows(&[2, 0]);
        assert_eq!(
            taken.column("n").unwrap().cells,
            vec![Cell::Integer(3), Cell::Integer(1)]
        );
    }
}
