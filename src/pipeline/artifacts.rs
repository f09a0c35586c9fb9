//! Artifact locations and flat-file persistence
//!
//! Feature and label tables are CSV files with a header row. The scaler,
//! model and feature schema are pretty-printed JSON.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use faer::Mat;
use polars::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::loader::{column_as_f64, column_names};
use super::target::extract_labels;
use crate::error::PipelineError;

/// Every file the pipeline reads or writes, resolved from three roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub data_dir: PathBuf,
    pub models_dir: PathBuf,
    pub outputs_dir: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new("data", "models", "outputs")
    }
}

impl ArtifactPaths {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        models_dir: impl Into<PathBuf>,
        outputs_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            models_dir: models_dir.into(),
            outputs_dir: outputs_dir.into(),
        }
    }

    pub fn raw_dataset(&self) -> PathBuf {
        self.data_dir.join("raw").join("credit_data.csv")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.data_dir.join("processed")
    }

    pub fn x_train(&self) -> PathBuf {
        self.processed_dir().join("X_train_scaled.csv")
    }

    pub fn x_test(&self) -> PathBuf {
        self.processed_dir().join("X_test_scaled.csv")
    }

    pub fn y_train(&self) -> PathBuf {
        self.processed_dir().join("y_train.csv")
    }

    pub fn y_test(&self) -> PathBuf {
        self.processed_dir().join("y_test.csv")
    }

    pub fn scaler(&self) -> PathBuf {
        self.models_dir.join("scaler.json")
    }

    pub fn model(&self) -> PathBuf {
        self.models_dir.join("credit_model.json")
    }

    pub fn feature_columns(&self) -> PathBuf {
        self.models_dir.join("feature_columns.json")
    }

    pub fn high_risk_plot(&self) -> PathBuf {
        self.outputs_dir.join("shap_high_risk.png")
    }

    pub fn low_risk_plot(&self) -> PathBuf {
        self.outputs_dir.join("shap_low_risk.png")
    }
}

/// Create a directory and its parents if missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// Serialize a value as pretty JSON
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Deserialize a JSON artifact
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Build a matrix from the named numeric columns, in the given order
pub fn frame_to_matrix(df: &DataFrame, columns: &[String]) -> Result<Mat<f64>> {
    let data: Vec<Vec<f64>> = columns
        .iter()
        .map(|name| column_as_f64(df, name))
        .collect::<Result<_>>()?;

    Ok(Mat::from_fn(df.height(), columns.len(), |i, j| data[j][i]))
}

/// Build a frame with one Float64 column per matrix column
pub fn matrix_to_frame(x: &Mat<f64>, columns: &[String]) -> Result<DataFrame> {
    let cols: Vec<Column> = columns
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let values: Vec<f64> = (0..x.nrows()).map(|i| x[(i, j)]).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    DataFrame::new(cols).context("Failed to assemble feature table")
}

/// Write a frame as CSV with a header row
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

/// Read a CSV artifact written by [`write_csv`]
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    LazyCsvReader::new(path)
        .with_infer_schema_length(None)
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))
}

/// Persist a scaled feature matrix under the schema's column names
pub fn save_features(x: &Mat<f64>, schema: &[String], path: &Path) -> Result<()> {
    let mut df = matrix_to_frame(x, schema)?;
    write_csv(&mut df, path)
}

/// Load a scaled feature matrix, requiring its header to equal the schema
pub fn load_features(path: &Path, schema: &[String]) -> Result<Mat<f64>> {
    let df = read_csv(path)?;
    let found = column_names(&df);
    if found != schema {
        return Err(PipelineError::SchemaMismatch {
            source_name: path.display().to_string(),
            expected: schema.to_vec(),
            found,
        }
        .into());
    }
    frame_to_matrix(&df, schema)
}

/// Persist a label vector as a single integer column
pub fn save_labels(labels: &[f64], name: &str, path: &Path) -> Result<()> {
    let values: Vec<i32> = labels.iter().map(|&v| v as i32).collect();
    let mut df = DataFrame::new(vec![Column::new(name.into(), values)])
        .context("Failed to assemble label table")?;
    write_csv(&mut df, path)
}

/// Load a single-column label file
pub fn load_labels(path: &Path) -> Result<Vec<f64>> {
    let df = read_csv(path)?;
    let names = column_names(&df);
    let name = match names.as_slice() {
        [only] => only.clone(),
        _ => anyhow::bail!(
            "Label file {} must have exactly one column, found {:?}",
            path.display(),
            names
        ),
    };
    extract_labels(&df, &name).with_context(|| format!("Invalid labels in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths_are_working_directory_relative() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.raw_dataset(), PathBuf::from("data/raw/credit_data.csv"));
        assert_eq!(paths.x_test(), PathBuf::from("data/processed/X_test_scaled.csv"));
        assert_eq!(paths.model(), PathBuf::from("models/credit_model.json"));
        assert_eq!(paths.low_risk_plot(), PathBuf::from("outputs/shap_low_risk.png"));
    }

    #[test]
    fn test_load_features_rejects_reordered_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.csv");
        let schema = vec!["a".to_string(), "b".to_string()];
        let x = Mat::from_fn(2, 2, |i, j| (i * 2 + j) as f64);
        save_features(&x, &schema, &path).unwrap();

        let reordered = vec!["b".to_string(), "a".to_string()];
        let err = load_features(&path, &reordered).unwrap_err();
        assert!(err.to_string().contains("schema mismatch"));

        let loaded = load_features(&path, &schema).unwrap();
        assert_eq!(loaded[(1, 0)], 2.0);
    }

    #[test]
    fn test_labels_are_written_as_integers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("y.csv");
        save_labels(&[0.0, 1.0, 1.0], "default.payment.next.month", &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("default.payment.next.month\n0\n1\n1"));
        assert_eq!(load_labels(&path).unwrap(), vec![0.0, 1.0, 1.0]);
    }
}
