//! Training stage: load the scaled splits, fit, evaluate, persist

use anyhow::Result;
use faer::Mat;

use super::logistic::{LogisticConfig, LogisticRegression};
use super::metrics::{classification_report, ClassificationReport};
use crate::error::PipelineError;
use crate::pipeline::{ensure_dir, load_features, load_json, load_labels, save_json, ArtifactPaths};

/// The four persisted split artifacts plus the schema they follow
#[derive(Debug, Clone)]
pub struct TrainingData {
    pub schema: Vec<String>,
    pub x_train: Mat<f64>,
    pub x_test: Mat<f64>,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: LogisticRegression,
    pub report: ClassificationReport,
}

/// Load the feature schema written by the preparation stage
pub fn load_schema(paths: &ArtifactPaths) -> Result<Vec<String>> {
    load_json(&paths.feature_columns())
}

/// Load the processed splits, checking headers against the schema
pub fn load_training_data(paths: &ArtifactPaths) -> Result<TrainingData> {
    let schema = load_schema(paths)?;
    let x_train = load_features(&paths.x_train(), &schema)?;
    let x_test = load_features(&paths.x_test(), &schema)?;
    let y_train = load_labels(&paths.y_train())?;
    let y_test = load_labels(&paths.y_test())?;

    for (x, y) in [(&x_train, &y_train), (&x_test, &y_test)] {
        if x.nrows() != y.len() {
            return Err(PipelineError::LengthMismatch {
                features: x.nrows(),
                labels: y.len(),
            }
            .into());
        }
    }

    Ok(TrainingData {
        schema,
        x_train,
        x_test,
        y_train,
        y_test,
    })
}

/// Fit on the training split and score the test split
pub fn train_and_evaluate(data: &TrainingData, config: &LogisticConfig) -> Result<TrainingOutcome> {
    let model = LogisticRegression::fit(&data.x_train, &data.y_train, &data.schema, config)?;
    let y_pred = model.predict(&data.x_test);
    let report = classification_report(&data.y_test, &y_pred);
    Ok(TrainingOutcome { model, report })
}

/// Persist the fitted model
pub fn save_model(model: &LogisticRegression, paths: &ArtifactPaths) -> Result<()> {
    ensure_dir(&paths.models_dir)?;
    save_json(model, &paths.model())
}

/// Load the persisted model
pub fn load_model(paths: &ArtifactPaths) -> Result<LogisticRegression> {
    load_json(&paths.model())
}
