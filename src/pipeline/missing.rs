//! Missing value summary for the raw dataset

use polars::prelude::*;

/// Count null values per column, in column order.
pub fn count_missing_values(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect()
}

/// Total number of null cells across all columns
pub fn total_missing(counts: &[(String, usize)]) -> usize {
    counts.iter().map(|(_, n)| n).sum()
}
