//! Custom error types for the cleaning library.
//!
//! This module provides the error hierarchy using `thiserror`. Errors are
//! serializable so that a front end can display a stable `code` alongside
//! the message.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for cleaning and its collaborators.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// The dataset is malformed (e.g. columns of different lengths).
    #[error("Invalid input dataset: {0}")]
    InvalidInput(String),

    /// Two columns share a name after name normalization.
    #[error("Duplicate column name '{name}' produced by columns {sources:?}")]
    DuplicateColumnName { name: String, sources: Vec<String> },

    /// A column has no present values but a statistic is required to fill it.
    #[error("Column '{0}' has no present values to impute from")]
    EmptyColumn(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A chart specification does not fit the dataset.
    #[error("Invalid chart: {0}")]
    InvalidChart(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The summary provider failed.
    #[error("Summary provider error: {0}")]
    Summary(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for front-end handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::DuplicateColumnName { .. } => "DUPLICATE_COLUMN_NAME",
            Self::EmptyColumn(_) => "EMPTY_COLUMN",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidChart(_) => "INVALID_CHART",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Summary(_) => "SUMMARY_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the shape or content of the input data.
    ///
    /// Callers can fall back to showing the raw dataset for these.
    pub fn is_data_error(&self) -> bool {
        match self {
            Self::InvalidInput(_) | Self::DuplicateColumnName { .. } | Self::EmptyColumn(_) => {
                true
            }
            Self::WithContext { source, .. } => source.is_data_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
