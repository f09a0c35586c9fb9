//! Data preparation: split, scale and persist

use anyhow::Result;
use faer::Mat;
use polars::prelude::*;

use super::artifacts::{
    ensure_dir, frame_to_matrix, save_features, save_json, save_labels, ArtifactPaths,
};
use super::loader::column_names;
use super::scaler::StandardScaler;
use super::split::{stratified_split, take_rows};
use super::target::split_target;

/// Options for the preparation stage
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    pub target: String,
    pub test_size: f64,
    pub seed: u64,
}

/// Output of preparation, ready to be persisted
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub target: String,
    pub schema: Vec<String>,
    pub scaler: StandardScaler,
    pub x_train: Mat<f64>,
    pub x_test: Mat<f64>,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

impl PreparedData {
    pub fn train_rows(&self) -> usize {
        self.x_train.nrows()
    }

    pub fn test_rows(&self) -> usize {
        self.x_test.nrows()
    }

    /// Fraction of positive labels in (train, test)
    pub fn positive_rates(&self) -> (f64, f64) {
        (positive_rate(&self.y_train), positive_rate(&self.y_test))
    }
}

fn positive_rate(labels: &[f64]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    labels.iter().sum::<f64>() / labels.len() as f64
}

/// Split off the label, stratify, fit the scaler on the training rows only
/// and scale both partitions.
pub fn prepare_dataset(df: &DataFrame, options: &PrepareOptions) -> Result<PreparedData> {
    let (features, labels) = split_target(df, &options.target)?;
    let schema = column_names(&features);
    let x = frame_to_matrix(&features, &schema)?;

    let split = stratified_split(&labels, options.test_size, options.seed)?;

    let x_train_raw = Mat::from_fn(split.train.len(), schema.len(), |i, j| x[(split.train[i], j)]);
    let x_test_raw = Mat::from_fn(split.test.len(), schema.len(), |i, j| x[(split.test[i], j)]);

    let scaler = StandardScaler::fit(&x_train_raw, &schema)?;
    let x_train = scaler.transform(&x_train_raw)?;
    let x_test = scaler.transform(&x_test_raw)?;

    Ok(PreparedData {
        target: options.target.clone(),
        schema,
        scaler,
        x_train,
        x_test,
        y_train: take_rows(&labels, &split.train),
        y_test: take_rows(&labels, &split.test),
    })
}

/// Write the six preparation artifacts
pub fn save_prepared(prepared: &PreparedData, paths: &ArtifactPaths) -> Result<()> {
    ensure_dir(&paths.processed_dir())?;
    ensure_dir(&paths.models_dir)?;

    save_json(&prepared.schema, &paths.feature_columns())?;
    save_features(&prepared.x_train, &prepared.schema, &paths.x_train())?;
    save_features(&prepared.x_test, &prepared.schema, &paths.x_test())?;
    save_labels(&prepared.y_train, &prepared.target, &paths.y_train())?;
    save_labels(&prepared.y_test, &prepared.target, &paths.y_test())?;
    save_json(&prepared.scaler, &paths.scaler())?;

    Ok(())
}
