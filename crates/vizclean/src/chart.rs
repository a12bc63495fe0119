//! Chart selection for the dashboard.
//!
//! Rendering is left to the front end; this module only decides which
//! columns may feed each axis and checks a requested chart against the
//! cleaned dataset.

use crate::error::{CleaningError, Result};
use crate::profiler::infer_kind;
use crate::types::{ColumnKind, Dataset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of charts the dashboard lays out at once.
pub const MAX_CHARTS: usize = 10;

/// Chart kinds offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Box,
    Histogram,
    Pie,
    Heatmap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Box,
        ChartKind::Histogram,
        ChartKind::Pie,
        ChartKind::Heatmap,
    ];

    /// Histograms and pies are drawn from the X column alone.
    pub fn needs_y(&self) -> bool {
        !matches!(self, ChartKind::Histogram | ChartKind::Pie)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
            ChartKind::Scatter => "Scatter",
            ChartKind::Box => "Box",
            ChartKind::Histogram => "Histogram",
            ChartKind::Pie => "Pie",
            ChartKind::Heatmap => "Heatmap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns eligible for each axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AxisOptions {
    /// Every column, in dataset order.
    pub x: Vec<String>,
    /// Numeric columns, in dataset order.
    pub y: Vec<String>,
}

impl AxisOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let x = dataset.columns.iter().map(|c| c.name.clone()).collect();
        let y = dataset
            .columns
            .iter()
            .filter(|c| infer_kind(&c.cells) == Some(ColumnKind::Numeric))
            .map(|c| c.name.clone())
            .collect();
        Self { x, y }
    }
}

/// One chart requested by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, x: impl Into<String>, y: Option<&str>) -> Self {
        Self {
            kind,
            x: x.into(),
            y: y.map(str::to_string),
        }
    }

    /// Check the chart against `dataset`.
    ///
    /// # Errors
    ///
    /// - [`CleaningError::ColumnNotFound`] if X or Y names an unknown column
    /// - [`CleaningError::InvalidChart`] if Y is absent where required or is
    ///   not numeric
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        if dataset.column(&self.x).is_none() {
            return Err(CleaningError::ColumnNotFound(self.x.clone()));
        }
        if !self.kind.needs_y() {
            return Ok(());
        }

        let y = self.y.as_deref().ok_or_else(|| {
            CleaningError::InvalidChart(format!("{} chart requires a Y column", self.kind))
        })?;
        let column = dataset
            .column(y)
            .ok_or_else(|| CleaningError::ColumnNotFound(y.to_string()))?;
        if infer_kind(&column.cells) != Some(ColumnKind::Numeric) {
            return Err(CleaningError::InvalidChart(format!(
                "Y column '{}' is not numeric",
                y
            )));
        }
        Ok(())
    }

    /// Title shown above the rendered chart.
    pub fn title(&self) -> String {
        let x = &self.x;
        let y = self.y.as_deref().unwrap_or_default();
        match self.kind {
            ChartKind::Line => format!("Line: {} vs {}", y, x),
            ChartKind::Bar => format!("Bar: {} by {}", y, x),
            ChartKind::Scatter => format!("Scatter: {} vs {}", y, x),
            ChartKind::Box => format!("Box Plot: {} by {}", y, x),
            ChartKind::Histogram => format!("Histogram of {}", x),
            ChartKind::Pie => format!("Pie Chart of {}", x),
            ChartKind::Heatmap => format!("Heatmap: {} vs {}", x, y),
        }
    }
}

/// Validate a batch of charts, refusing more than [`MAX_CHARTS`].
pub fn validate_charts(dataset: &Dataset, charts: &[ChartSpec]) -> Result<()> {
    if charts.len() > MAX_CHARTS {
        return Err(CleaningError::InvalidChart(format!(
            "At most {} charts can be shown, got {}",
            MAX_CHARTS,
            charts.len()
        )));
    }
    charts.iter().try_for_each(|chart| chart.validate(dataset))
}
