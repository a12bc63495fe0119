//! Type inference logic for column analysis.
//!
//! Inference is deterministic: a column is [`ColumnKind::Numeric`] when every
//! present value is numeric, else [`ColumnKind::Temporal`] when every present
//! value is a date or date/time, else [`ColumnKind::Categorical`].

use crate::types::{Cell, ColumnKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only formats accepted for textual dates.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date/time formats accepted for textual timestamps. `%.f` also matches an
/// absent fractional part.
pub const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse text as a finite integer or floating-point number.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v as f64);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse text as a date or date/time.
///
/// Dates are placed at midnight. RFC 3339 timestamps are converted to UTC.
pub fn parse_temporal(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Numeric value of a cell, if it has one.
///
/// Every `Float` counts, including infinities and NaN; only text is held to
/// finite values.
pub fn numeric_value(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Integer(v) => Some(*v as f64),
        Cell::Float(v) => Some(*v),
        Cell::Text(s) => parse_number(s),
        _ => None,
    }
}

/// Instant of a cell, if it is a date or parses as one.
pub fn temporal_value(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::Date(d) => d.and_hms_opt(0, 0, 0),
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_temporal(s),
        _ => None,
    }
}

/// Infer the kind of a column from its cells.
///
/// Returns `None` when the column has no present values.
pub fn infer_kind(cells: &[Cell]) -> Option<ColumnKind> {
    let mut present = cells.iter().filter(|c| c.is_present()).peekable();
    present.peek()?;

    let mut numeric = true;
    let mut temporal = true;
    for cell in present {
        if numeric && numeric_value(cell).is_none() {
            numeric = false;
        }
        if temporal && temporal_value(cell).is_none() {
            temporal = false;
        }
        if !numeric && !temporal {
            return Some(ColumnKind::Categorical);
        }
    }

    if numeric {
        Some(ColumnKind::Numeric)
    } else if temporal {
        Some(ColumnKind::Temporal)
    } else {
        Some(ColumnKind::Categorical)
    }
}
