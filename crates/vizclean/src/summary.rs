//! Natural-language summaries of a cleaned dataset.
//!
//! This module prepares what gets sent to a language model: the first rows
//! of the dataset rendered as CSV, wrapped in a prompt. The call itself is
//! made by a [`SummaryProvider`] supplied by the caller.
//!
//! The dashboard's "regenerate" button is modelled by the `attempt` counter
//! carried on each request, owned by the caller.

use crate::error::{CleaningError, Result};
use crate::io::to_csv_string;
use crate::types::Dataset;
use serde::Serialize;
use tracing::{debug, info};

/// Default number of rows sent to the provider.
pub const DEFAULT_SAMPLE_ROWS: usize = 50;

/// Everything a provider needs to produce a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    /// Rows in the full dataset.
    pub total_rows: usize,
    /// Rows included in `csv_sample`.
    pub sample_rows: usize,
    /// The sampled rows as CSV with a header line.
    pub csv_sample: String,
    /// Zero for the first request, incremented on each regeneration.
    pub attempt: u32,
    pub prompt: String,
}

impl SummaryRequest {
    /// Build a request from the first `min(max_rows, rows)` rows of `dataset`.
    pub fn from_dataset(dataset: &Dataset, max_rows: usize, attempt: u32) -> Result<Self> {
        let total_rows = dataset.row_count();
        let sample_rows = max_rows.min(total_rows);
        let indices: Vec<usize> = (0..sample_rows).collect();
        let csv_sample = to_csv_string(&dataset.take_rows(&indices))?;

        let prompt = build_prompt(&csv_sample, sample_rows, total_rows, attempt);
        debug!(
            "Prepared summary request: {} of {} rows, attempt {}",
            sample_rows, total_rows, attempt
        );

        Ok(Self {
            total_rows,
            sample_rows,
            csv_sample,
            attempt,
            prompt,
        })
    }

    /// The same sample, marked as the next regeneration.
    pub fn regenerate(&self) -> Self {
        let attempt = self.attempt + 1;
        Self {
            attempt,
            prompt: build_prompt(&self.csv_sample, self.sample_rows, self.total_rows, attempt),
            ..self.clone()
        }
    }
}

fn build_prompt(csv_sample: &str, sample_rows: usize, total_rows: usize, attempt: u32) -> String {
    let mut prompt = format!(
        "Summarize the key patterns, trends and anomalies in this dataset.\n\
         The sample below contains the first {} of {} rows as CSV.\n",
        sample_rows, total_rows
    );
    if attempt > 0 {
        prompt.push_str(&format!(
            "This is regeneration #{}; offer a different perspective than before.\n",
            attempt
        ));
    }
    prompt.push('\n');
    prompt.push_str(csv_sample);
    prompt
}

/// A language-model backend able to summarize a dataset sample.
///
/// Implementations must be `Send + Sync` so a dashboard can share one
/// provider across request handlers.
pub trait SummaryProvider: Send + Sync {
    /// Produce a summary for `request`.
    fn summarize(&self, request: &SummaryRequest) -> anyhow::Result<String>;

    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Model used by this provider, if it exposes one.
    fn model(&self) -> Option<&str> {
        None
    }
}

/// Build a request from `dataset` and hand it to `provider`.
///
/// Provider failures are reported as [`CleaningError::Summary`].
pub fn summarize_dataset(
    provider: &dyn SummaryProvider,
    dataset: &Dataset,
    max_rows: usize,
    attempt: u32,
) -> Result<String> {
    let request = SummaryRequest::from_dataset(dataset, max_rows, attempt)?;
    info!(
        "Requesting summary from {} ({})",
        provider.name(),
        provider.model().unwrap_or("default model")
    );
    provider
        .summarize(&request)
        .map_err(|e| CleaningError::Summary(format!("{}: {:#}", provider.name(), e)))
}
