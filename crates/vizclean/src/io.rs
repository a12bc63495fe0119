//! CSV ingestion and export.
//!
//! Files are parsed through polars with schema inference over the first
//! rows; if the standard parse fails, a lenient parse and then a pre-cleaned
//! copy of the content are tried before giving up.

use crate::error::{CleaningError, Result, ResultExt};
use crate::frame::{dataset_from_dataframe, dataset_to_dataframe};
use crate::types::Dataset;
use polars::prelude::*;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows inspected by polars when inferring column dtypes.
const INFER_SCHEMA_ROWS: usize = 100;

/// Load a CSV file with a header row into a [`Dataset`].
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CleaningError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }

    info!("Loading dataset from: {}", path.display());
    let df = load_csv_with_fallbacks(path)?;
    let dataset = dataset_from_dataframe(&df)?;
    info!("Dataset loaded successfully: {:?}", dataset.shape());
    Ok(dataset)
}

/// Read CSV content with a header row from any reader.
pub fn read_csv<R: Read>(mut reader: R) -> Result<Dataset> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let df = parse_csv_content(content).context("Parsing CSV content")?;
    dataset_from_dataframe(&df)
}

/// Render a dataset as CSV text with a header row, preserving column order.
pub fn to_csv_string(dataset: &Dataset) -> Result<String> {
    let mut df = dataset_to_dataframe(dataset)?;
    let mut buffer: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a dataset to a CSV file, creating parent directories if needed.
pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_csv_string(dataset)?)?;
    info!("Cleaned data saved: {}", path.display());
    Ok(())
}

/// Load CSV with multiple fallback strategies.
fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    let content = std::fs::read_to_string(path)?;
    parse_csv_content(clean_csv_content(&content))
        .context(format!("Failed to parse CSV file {}", path.display()))
}

fn parse_csv_content(content: String) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(content))
        .finish()?;
    Ok(df)
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
