//! Explainability reporter - attributions and summary plots for the test set

pub mod attribution;
pub mod plot;

use std::path::PathBuf;

use anyhow::Result;
use faer::Mat;

use crate::model::{load_model, load_schema, LogisticRegression};
use crate::pipeline::{ensure_dir, load_features, ArtifactPaths};

pub use attribution::*;
pub use plot::*;

pub const HIGH_RISK_TITLE: &str = "SHAP Summary – High Risk Customers";
pub const LOW_RISK_TITLE: &str = "SHAP Summary – Low Risk Customers";

/// Attributions for the whole test set, split by predicted class
#[derive(Debug, Clone)]
pub struct Explanation {
    pub schema: Vec<String>,
    pub features: Mat<f64>,
    pub shap: Mat<f64>,
    pub expected_value: f64,
    pub partition: RiskPartition,
}

impl Explanation {
    pub fn total_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Top features of the high-risk group
    pub fn high_ranking(&self) -> Vec<FeatureImportance> {
        rank_features(&self.shap, &self.partition.high, &self.schema)
    }

    /// Top features of the low-risk group
    pub fn low_ranking(&self) -> Vec<FeatureImportance> {
        rank_features(&self.shap, &self.partition.low, &self.schema)
    }
}

/// Compute attributions using `x` itself as the background
pub fn explain(model: &LogisticRegression, schema: Vec<String>, x: Mat<f64>) -> Explanation {
    let explainer = LinearExplainer::new(model, &x);
    let shap = explainer.shap_values(&x);
    let partition = partition_by_prediction(model, &x);

    Explanation {
        schema,
        shap,
        expected_value: explainer.expected_value,
        partition,
        features: x,
    }
}

/// Load the model and scaled test features and explain them
pub fn explain_test_set(paths: &ArtifactPaths) -> Result<Explanation> {
    let model = load_model(paths)?;
    let schema = load_schema(paths)?;
    let x_test = load_features(&paths.x_test(), &schema)?;
    Ok(explain(&model, schema, x_test))
}

/// Render both summary plots; returns the written paths (high, low)
pub fn write_summary_plots(
    explanation: &Explanation,
    paths: &ArtifactPaths,
    renderer: &PlotRenderer,
) -> Result<(PathBuf, PathBuf)> {
    ensure_dir(&paths.outputs_dir)?;

    let groups = [
        (HIGH_RISK_TITLE, &explanation.partition.high, paths.high_risk_plot()),
        (LOW_RISK_TITLE, &explanation.partition.low, paths.low_risk_plot()),
    ];

    for (title, rows, path) in &groups {
        let plot = SummaryPlot {
            title,
            feature_names: &explanation.schema,
            shap: &explanation.shap,
            features: &explanation.features,
            rows,
        };
        renderer.render_png(&plot, path)?;
    }

    Ok((paths.high_risk_plot(), paths.low_risk_plot()))
}
