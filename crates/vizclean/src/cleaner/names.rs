//! Column name normalization.

use crate::error::{CleaningError, Result};
use crate::reporting::RenamedColumn;
use crate::types::Dataset;
use std::collections::HashMap;

/// Normalize a column name: replace every space and hyphen with an
/// underscore, trim the remaining surrounding whitespace, and lowercase.
///
/// Spaces are replaced before trimming, so a trailing space is kept as an
/// underscore while tabs and newlines are stripped.
///
/// ```rust,ignore
/// assert_eq!(normalize_column_name("Age "), "age_");
/// assert_eq!(normalize_column_name("\tUnit-Price\n"), "unit_price");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();
    replaced.trim().to_lowercase()
}

/// Rename every column of `dataset` in place.
///
/// With `normalize` false names are kept as-is but are still checked for
/// uniqueness. Returns the columns whose name actually changed.
pub fn normalize_names(dataset: &mut Dataset, normalize: bool) -> Result<Vec<RenamedColumn>> {
    let new_names: Vec<String> = dataset
        .columns
        .iter()
        .map(|c| {
            if normalize {
                normalize_column_name(&c.name)
            } else {
                c.name.clone()
            }
        })
        .collect();

    check_unique(dataset, &new_names)?;

    let mut renamed = Vec::new();
    for (column, new_name) in dataset.columns.iter_mut().zip(new_names) {
        if column.name != new_name {
            renamed.push(RenamedColumn {
                from: std::mem::replace(&mut column.name, new_name.clone()),
                to: new_name,
            });
        }
    }
    Ok(renamed)
}

/// Fail on the first name (in column order) that more than one column maps to.
fn check_unique(dataset: &Dataset, new_names: &[String]) -> Result<()> {
    let mut first_seen: HashMap<&str, usize> = HashMap::with_capacity(new_names.len());
    for (idx, name) in new_names.iter().enumerate() {
        if first_seen.insert(name.as_str(), idx).is_some() {
            let sources = new_names
                .iter()
                .zip(&dataset.columns)
                .filter(|(n, _)| *n == name)
                .map(|(_, c)| c.name.clone())
                .collect();
            return Err(CleaningError::DuplicateColumnName {
                name: name.clone(),
                sources,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Name"), "name");
        assert_eq!(normalize_column_name("Age "), "age_");
        assert_eq!(normalize_column_name("Order Date"), "order_date");
        assert_eq!(normalize_column_name("Unit-Price"), "unit_price");
        assert_eq!(normalize_column_name("\tTotal\n"), "total");
        assert_eq!(normalize_column_name(" Q1 "), "_q1_");
        assert_eq!(normalize_column_name("A - B"), "a___b");
        assert_eq!(normalize_column_name("already_ok"), "already_ok");
    }

    #[test]
    fn test_normalize_names_reports_changes_only() {
        let mut ds = Dataset::new(vec![
            Column::new("Name", ["a"]),
            Column::new("city", ["b"]),
        ]);
        let renamed = normalize_names(&mut ds, true).unwrap();

        assert_eq!(ds.column_names(), vec!["name", "city"]);
        assert_eq!(
            renamed,
            vec![RenamedColumn {
                from: "Name".to_string(),
                to: "name".to_string()
            }]
        );
    }

    #[test]
    fn test_normalize_names_collision() {
        let mut ds = Dataset::new(vec![
            Column::new("Order ID", [1i64]),
            Column::new("total", [2i64]),
            Column::new("order-id", [3i64]),
        ]);
        let err = normalize_names(&mut ds, true).unwrap_err();

        match err {
            CleaningError::DuplicateColumnName { name, sources } => {
                assert_eq!(name, "order_id");
                assert_eq!(sources, vec!["Order ID", "order-id"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Names are untouched on failure
        assert_eq!(ds.column_names(), vec!["Order ID", "total", "order-id"]);
    }

    #[test]
    fn test_disabled_normalization_still_rejects_duplicates() {
        let mut ds = Dataset::new(vec![Column::new("x", [1i64]), Column::new("x", [2i64])]);
        assert!(normalize_names(&mut ds, false).is_err());

        let mut ds = Dataset::new(vec![Column::new("Name", [1i64])]);
        let renamed = normalize_names(&mut ds, false).unwrap();
        assert!(renamed.is_empty());
        assert_eq!(ds.column_names(), vec!["Name"]);
    }
}
