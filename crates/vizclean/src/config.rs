//! Configuration types for the cleaner.
//!
//! This module provides configuration options using the builder pattern.
//! Defaults give the fixed four-pass behavior with a 50% sparse-column threshold.

use crate::error::{CleaningError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a retained column that has no present values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmptyColumnPolicy {
    /// Fail the whole call with [`CleaningError::EmptyColumn`].
    #[default]
    Fail,
    /// Leave the column unchanged and record it in the report.
    Keep,
}

/// Configuration for the [`Cleaner`](crate::cleaner::Cleaner).
///
/// Use [`CleanerConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use vizclean::config::{CleanerConfig, EmptyColumnPolicy};
///
/// let config = CleanerConfig::builder()
///     .missing_column_threshold(0.7)
///     .empty_column_policy(EmptyColumnPolicy::Keep)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Whether to normalize column names (trim, lowercase, spaces and
    /// hyphens to underscores).
    /// Default: true
    pub normalize_names: bool,

    /// Whether to remove duplicate rows.
    /// Default: true
    pub remove_duplicates: bool,

    /// Columns with a missing fraction strictly above this value are dropped
    /// (0.0 - 1.0).
    /// Default: 0.5
    pub missing_column_threshold: f64,

    /// Policy for retained columns with no present values.
    /// Default: Fail
    pub empty_column_policy: EmptyColumnPolicy,

    /// Maximum number of rows sent to a summary provider.
    /// Default: 50
    pub summary_sample_rows: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            normalize_names: true,
            remove_duplicates: true,
            missing_column_threshold: 0.5,
            empty_column_policy: EmptyColumnPolicy::default(),
            summary_sample_rows: 50,
        }
    }
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.missing_column_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "missing_column_threshold".to_string(),
                value: self.missing_column_threshold,
            });
        }

        if self.summary_sample_rows == 0 {
            return Err(ConfigValidationError::InvalidSampleRows(
                self.summary_sample_rows,
            ));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values. The loaded configuration is
    /// validated before it is returned.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: CleanerConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid summary sample rows: {0} (must be at least 1)")]
    InvalidSampleRows(usize),
}

impl From<ConfigValidationError> for CleaningError {
    fn from(error: ConfigValidationError) -> Self {
        CleaningError::InvalidConfig(error.to_string())
    }
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    normalize_names: Option<bool>,
    remove_duplicates: Option<bool>,
    missing_column_threshold: Option<f64>,
    empty_column_policy: Option<EmptyColumnPolicy>,
    summary_sample_rows: Option<usize>,
}

impl CleanerConfigBuilder {
    /// Start from an existing configuration (e.g. one loaded from a file).
    pub fn from_config(config: &CleanerConfig) -> Self {
        Self {
            normalize_names: Some(config.normalize_names),
            remove_duplicates: Some(config.remove_duplicates),
            missing_column_threshold: Some(config.missing_column_threshold),
            empty_column_policy: Some(config.empty_column_policy),
            summary_sample_rows: Some(config.summary_sample_rows),
        }
    }

    /// Enable or disable column name normalization.
    pub fn normalize_names(mut self, normalize: bool) -> Self {
        self.normalize_names = Some(normalize);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Set the threshold for dropping sparse columns.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.5 = drop columns
    ///   with more than 50% missing)
    pub fn missing_column_threshold(mut self, threshold: f64) -> Self {
        self.missing_column_threshold = Some(threshold);
        self
    }

    /// Set the policy for columns with no present values.
    pub fn empty_column_policy(mut self, policy: EmptyColumnPolicy) -> Self {
        self.empty_column_policy = Some(policy);
        self
    }

    /// Set the maximum number of rows sampled for summaries.
    pub fn summary_sample_rows(mut self, rows: usize) -> Self {
        self.summary_sample_rows = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleanerConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<CleanerConfig, ConfigValidationError> {
        let defaults = CleanerConfig::default();
        let config = CleanerConfig {
            normalize_names: self.normalize_names.unwrap_or(defaults.normalize_names),
            remove_duplicates: self.remove_duplicates.unwrap_or(defaults.remove_duplicates),
            missing_column_threshold: self
                .missing_column_threshold
                .unwrap_or(defaults.missing_column_threshold),
            empty_column_policy: self.empty_column_policy.unwrap_or_default(),
            summary_sample_rows: self
                .summary_sample_rows
                .unwrap_or(defaults.summary_sample_rows),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleanerConfig::default();
        assert!(config.normalize_names);
        assert!(config.remove_duplicates);
        assert_eq!(config.missing_column_threshold, 0.5);
        assert_eq!(config.empty_column_policy, EmptyColumnPolicy::Fail);
        assert_eq!(config.summary_sample_rows, 50);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = CleanerConfig::builder().build().unwrap();
        assert_eq!(config, CleanerConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = CleanerConfig::builder()
            .normalize_names(false)
            .remove_duplicates(false)
            .missing_column_threshold(0.8)
            .empty_column_policy(EmptyColumnPolicy::Keep)
            .summary_sample_rows(10)
            .build()
            .unwrap();

        assert!(!config.normalize_names);
        assert!(!config.remove_duplicates);
        assert_eq!(config.missing_column_threshold, 0.8);
        assert_eq!(config.empty_column_policy, EmptyColumnPolicy::Keep);
        assert_eq!(config.summary_sample_rows, 10);
    }

    #[test]
    fn test_builder_from_config_overrides() {
        let base = CleanerConfig::builder()
            .missing_column_threshold(0.9)
            .build()
            .unwrap();
        let config = CleanerConfigBuilder::from_config(&base)
            .remove_duplicates(false)
            .build()
            .unwrap();

        assert_eq!(config.missing_column_threshold, 0.9);
        assert!(!config.remove_duplicates);
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let result = CleanerConfig::builder()
            .missing_column_threshold(1.5)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_invalid_sample_rows() {
        let result = CleanerConfig::builder().summary_sample_rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidSampleRows(0)
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "missing_column_threshold": 0.25, "empty_column_policy": "Keep" }"#;
        let config: CleanerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.missing_column_threshold, 0.25);
        assert_eq!(config.empty_column_policy, EmptyColumnPolicy::Keep);
        assert!(config.normalize_names);
        assert_eq!(config.summary_sample_rows, 50);
    }

    #[test]
    fn test_from_json_file_rejects_invalid_values() {
        let path = std::env::temp_dir()
            .join(format!("vizclean_invalid_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "missing_column_threshold": 2.0 }"#).unwrap();

        let result = CleanerConfig::from_json_file(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(result.unwrap_err().error_code(), "INVALID_CONFIG");
    }
}
