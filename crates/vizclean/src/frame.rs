//! Conversion between polars `DataFrame`s and [`Dataset`]s.
//!
//! Ingestion and export go through polars; cleaning works on the explicit
//! cell model so that typing and equality never depend on dtype inference.
//!
//! # Type Mapping
//!
//! | Polars Type      | Cell                       |
//! |------------------|----------------------------|
//! | Null             | `Missing`                  |
//! | Int8-64, UInt8-32| `Integer`                  |
//! | UInt64           | `Integer`, `Float` if too large |
//! | Float32/64       | `Float` (NaN → `Missing`)  |
//! | String           | `Text`                     |
//! | Boolean          | `Text` ("true"/"false")    |
//! | Date / Datetime  | `Date` / `DateTime`        |
//! | Other            | `Text` via `Display`       |

use crate::error::{Result, ResultExt};
use crate::profiler::parse_temporal;
use crate::types::{Cell, Column, Dataset};
use chrono::NaiveDate;
use polars::prelude::{AnyValue, DataFrame, DataType, IntoColumn, NamedFrom, PlSmallStr, Series};

/// Convert a polars `DataFrame` into a [`Dataset`], column by column.
pub fn dataset_from_dataframe(df: &DataFrame) -> Result<Dataset> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let name = series.name().to_string();
        let cells = series_to_cells(series).context(format!("Reading column '{}'", name))?;
        columns.push(Column { name, cells });
    }
    Ok(Dataset::new(columns))
}

/// Convert a [`Dataset`] into a polars `DataFrame`.
///
/// Columns whose present values are all integers become `Int64`, all
/// integers or floats become `Float64`, and anything else becomes `String`.
pub fn dataset_to_dataframe(dataset: &Dataset) -> Result<DataFrame> {
    dataset.validate()?;
    let columns = dataset
        .columns
        .iter()
        .map(|c| column_to_series(c).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn series_to_cells(series: &Series) -> Result<Vec<Cell>> {
    match series.dtype() {
        DataType::Date | DataType::Datetime(_, _) => {
            let text = series.cast(&DataType::String)?;
            let cells = text
                .str()?
                .into_iter()
                .map(|v| v.map_or(Cell::Missing, temporal_cell))
                .collect();
            Ok(cells)
        }
        _ => {
            let mut cells = Vec::with_capacity(series.len());
            for i in 0..series.len() {
                cells.push(any_value_to_cell(series.get(i)?));
            }
            Ok(cells)
        }
    }
}

fn temporal_cell(text: &str) -> Cell {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Cell::Date(date);
    }
    parse_temporal(text).map_or_else(|| Cell::text(text), Cell::DateTime)
}

fn any_value_to_cell(value: AnyValue) -> Cell {
    match value {
        AnyValue::Null => Cell::Missing,

        AnyValue::Boolean(b) => Cell::Text(b.to_string()),

        AnyValue::Int8(i) => Cell::Integer(i as i64),
        AnyValue::Int16(i) => Cell::Integer(i as i64),
        AnyValue::Int32(i) => Cell::Integer(i as i64),
        AnyValue::Int64(i) => Cell::Integer(i),

        AnyValue::UInt8(u) => Cell::Integer(u as i64),
        AnyValue::UInt16(u) => Cell::Integer(u as i64),
        AnyValue::UInt32(u) => Cell::Integer(u as i64),
        AnyValue::UInt64(u) => i64::try_from(u).map_or(Cell::Float(u as f64), Cell::Integer),

        AnyValue::Float32(f) if f.is_nan() => Cell::Missing,
        AnyValue::Float32(f) => Cell::Float(f as f64),
        AnyValue::Float64(f) if f.is_nan() => Cell::Missing,
        AnyValue::Float64(f) => Cell::Float(f),

        AnyValue::String(s) => Cell::Text(s.to_string()),
        AnyValue::StringOwned(s) => Cell::Text(s.to_string()),

        // Everything else: stringify using Display
        other => Cell::Text(format!("{}", other)),
    }
}

fn column_to_series(column: &Column) -> Series {
    let name: PlSmallStr = column.name.as_str().into();

    let all_integer = column.present().all(|c| matches!(c, Cell::Integer(_)));
    if all_integer {
        let values: Vec<Option<i64>> = column
            .cells
            .iter()
            .map(|c| match c {
                Cell::Integer(v) => Some(*v),
                _ => None,
            })
            .collect();
        return Series::new(name, values);
    }

    let all_number = column
        .present()
        .all(|c| matches!(c, Cell::Integer(_) | Cell::Float(_)));
    if all_number {
        let values: Vec<Option<f64>> = column
            .cells
            .iter()
            .map(|c| match c {
                Cell::Integer(v) => Some(*v as f64),
                Cell::Float(v) => Some(*v),
                _ => None,
            })
            .collect();
        return Series::new(name, values);
    }

    let values: Vec<Option<String>> = column
        .cells
        .iter()
        .map(|c| c.is_present().then(|| c.to_string()))
        .collect();
    Series::new(name, values)
}
