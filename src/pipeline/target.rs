//! Target column validation and label extraction
//!
//! The default label must be binary 0/1. Anything else is rejected before
//! the split so the classifier never sees an ambiguous class.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::loader::column_names;
use crate::error::PipelineError;

/// Default target column of the credit card default dataset
pub const DEFAULT_TARGET: &str = "default.payment.next.month";

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// Split a frame into its feature part and its 0/1 label vector.
///
/// The feature part keeps the original column order; that order becomes the
/// feature schema.
pub fn split_target(df: &DataFrame, target: &str) -> Result<(DataFrame, Vec<f64>)> {
    let available = column_names(df);
    if !available.iter().any(|c| c == target) {
        return Err(PipelineError::MissingTarget {
            target: target.to_string(),
            available,
        }
        .into());
    }

    let labels = extract_labels(df, target)?;
    let features = df
        .drop(target)
        .with_context(|| format!("Failed to separate target column '{}'", target))?;

    Ok((features, labels))
}

/// Read the target column as 0.0/1.0 labels
pub fn extract_labels(df: &DataFrame, target: &str) -> Result<Vec<f64>> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    let nulls = target_col.null_count();
    if nulls > 0 {
        return Err(PipelineError::MissingValues {
            column: target.to_string(),
            count: nulls,
        }
        .into());
    }

    if !target_col.dtype().is_primitive_numeric() && target_col.dtype() != &DataType::Boolean {
        return Err(PipelineError::NonBinaryTarget {
            target: target.to_string(),
            values: unique_values_as_strings(target_col)?,
        }
        .into());
    }

    let float_col = target_col.cast(&DataType::Float64)?;
    let values: Vec<f64> = float_col.f64()?.into_no_null_iter().collect();

    let is_binary = values
        .iter()
        .all(|&v| v.abs() < TOLERANCE || (v - 1.0).abs() < TOLERANCE);

    if !is_binary {
        return Err(PipelineError::NonBinaryTarget {
            target: target.to_string(),
            values: unique_values_as_strings(target_col)?,
        }
        .into());
    }

    Ok(values.into_iter().map(|v| v.round()).collect())
}

/// Get sorted unique values from a column as strings
fn unique_values_as_strings(col: &Column) -> Result<Vec<String>> {
    let unique = col.unique()?;
    let cast = unique.cast(&DataType::String)?;
    let mut values: Vec<String> = cast
        .str()?
        .into_iter()
        .filter_map(|v| v.map(|s| s.to_string()))
        .collect();
    values.sort();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_target_keeps_feature_order() {
        let df = df! {
            "LIMIT_BAL" => [1000.0f64, 2000.0, 3000.0],
            "target" => [0i32, 1, 0],
            "AGE" => [25i64, 30, 35],
        }
        .unwrap();

        let (features, labels) = split_target(&df, "target").unwrap();
        assert_eq!(
            column_names(&features),
            vec!["LIMIT_BAL".to_string(), "AGE".to_string()]
        );
        assert_eq!(labels, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_split_target_missing_column() {
        let df = df! { "AGE" => [25i64, 30] }.unwrap();
        let err = split_target(&df, "target").unwrap_err();
        let pipeline_err = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(pipeline_err, PipelineError::MissingTarget { .. }));
    }

    #[test]
    fn test_extract_labels_float_binary() {
        let df = df! { "target" => [0.0f64, 1.0, 1.0] }.unwrap();
        assert_eq!(extract_labels(&df, "target").unwrap(), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_extract_labels_rejects_multiclass() {
        let df = df! { "target" => [1i32, 2, 3, 1] }.unwrap();
        let err = extract_labels(&df, "target").unwrap_err();
        match err.downcast_ref::<PipelineError>() {
            Some(PipelineError::NonBinaryTarget { values, .. }) => {
                assert_eq!(values, &vec!["1".to_string(), "2".to_string(), "3".to_string()]);
            }
            other => panic!("Expected NonBinaryTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_labels_rejects_strings() {
        let df = df! { "target" => ["yes", "no"] }.unwrap();
        assert!(extract_labels(&df, "target").is_err());
    }

    #[test]
    fn test_extract_labels_rejects_nulls() {
        let df = df! { "target" => [Some(0i32), None, Some(1)] }.unwrap();
        let err = extract_labels(&df, "target").unwrap_err();
        assert!(err.to_string().contains("missing value"));
    }
}
