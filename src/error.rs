//! Error types for pipeline failures that callers match on.
//!
//! Stage orchestration propagates `anyhow::Error` with context; the variants
//! here cover the data-contract violations a stage must fail fast on.

use thiserror::Error;

/// Data-contract failures raised by the pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input table has no rows.
    #[error("Input table '{path}' contains no rows")]
    EmptyTable { path: String },

    /// The configured target column is not present.
    #[error("Target column '{target}' not found in dataset. Available columns: {available:?}")]
    MissingTarget {
        target: String,
        available: Vec<String>,
    },

    /// The target column holds values other than 0 and 1.
    #[error("Target column '{target}' must be binary 0/1, found values: {values:?}")]
    NonBinaryTarget { target: String, values: Vec<String> },

    /// A feature column could not be read as Float64.
    #[error("Feature column '{column}' is not numeric")]
    NonNumericFeature { column: String },

    /// A feature or label column contains nulls.
    #[error("Column '{column}' contains {count} missing value(s)")]
    MissingValues { column: String, count: usize },

    /// Loaded columns do not match the persisted feature schema.
    #[error("Feature schema mismatch in '{source_name}': expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        source_name: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A label class is too small to appear in both partitions.
    #[error("Class {class} has only {count} member(s); stratified split needs at least 2")]
    ClassTooSmall { class: i64, count: usize },

    /// Every label has the same value, so there is nothing to classify.
    #[error("Labels contain only class {class} ({rows} row(s)); both 0 and 1 are required")]
    SingleClass { class: i64, rows: usize },

    /// The split would leave one partition empty.
    #[error("Cannot split {rows} row(s) with test size {test_size}")]
    InvalidSplit { rows: usize, test_size: f64 },

    /// Feature and label lengths disagree.
    #[error("Row count mismatch: {features} feature row(s) but {labels} label(s)")]
    LengthMismatch { features: usize, labels: usize },

    /// The Newton system could not be factorised.
    #[error("Hessian is not positive definite at iteration {iteration}")]
    SingularHessian { iteration: usize },
}
