//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::error::PipelineError;

/// Index column pandas writes when a frame is saved with its index
pub const INDEX_COLUMN: &str = "Unnamed: 0";

/// Load a dataset from a file (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    let df = lf
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    if df.height() == 0 {
        return Err(PipelineError::EmptyTable {
            path: path.display().to_string(),
        }
        .into());
    }

    Ok(df)
}

/// Column names of a DataFrame as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Drop the pandas index column and any user-requested columns that exist.
///
/// Returns the cleaned frame and the names that were actually dropped.
pub fn drop_unused_columns(df: DataFrame, extra: &[String]) -> (DataFrame, Vec<String>) {
    let present = column_names(&df);
    let to_drop: Vec<String> = std::iter::once(INDEX_COLUMN.to_string())
        .chain(extra.iter().cloned())
        .filter(|name| present.contains(name))
        .collect();

    if to_drop.is_empty() {
        return (df, to_drop);
    }
    (df.drop_many(&to_drop), to_drop)
}

/// Read one column as f64 values, failing on non-numeric data or nulls
pub fn column_as_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;

    if !column.dtype().is_primitive_numeric() && column.dtype() != &DataType::Boolean {
        return Err(PipelineError::NonNumericFeature {
            column: name.to_string(),
        }
        .into());
    }

    let nulls = column.null_count();
    if nulls > 0 {
        return Err(PipelineError::MissingValues {
            column: name.to_string(),
            count: nulls,
        }
        .into());
    }

    let cast = column
        .cast(&DataType::Float64)
        .map_err(|_| PipelineError::NonNumericFeature {
            column: name.to_string(),
        })?;
    let values: Vec<f64> = cast.f64()?.into_no_null_iter().collect();
    Ok(values)
}
