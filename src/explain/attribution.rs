//! Linear attribution values for a logistic model
//!
//! With features treated as independent, the attribution of feature `j` for
//! sample `i` in log-odds space is `coef[j] * (x[i][j] - E[x_j])`, where the
//! expectation is taken over a background dataset. Attributions for a sample
//! sum to its log-odds minus the background expected log-odds.

use faer::Mat;
use serde::Serialize;

use crate::model::LogisticRegression;

/// Attribution explainer bound to a model and a background mean
#[derive(Debug, Clone)]
pub struct LinearExplainer {
    coefficients: Vec<f64>,
    background_mean: Vec<f64>,
    /// Model log-odds at the background mean
    pub expected_value: f64,
}

impl LinearExplainer {
    /// Use the column means of `background` as the reference point
    pub fn new(model: &LogisticRegression, background: &Mat<f64>) -> Self {
        let n = background.nrows().max(1) as f64;
        let background_mean: Vec<f64> = (0..background.ncols())
            .map(|j| (0..background.nrows()).map(|i| background[(i, j)]).sum::<f64>() / n)
            .collect();
        let expected_value = model.decision_function(&background_mean);

        Self {
            coefficients: model.coefficients.clone(),
            background_mean,
            expected_value,
        }
    }

    pub fn background_mean(&self) -> &[f64] {
        &self.background_mean
    }

    /// Attribution matrix with the same shape as `x`
    pub fn shap_values(&self, x: &Mat<f64>) -> Mat<f64> {
        Mat::from_fn(x.nrows(), x.ncols(), |i, j| {
            self.coefficients[j] * (x[(i, j)] - self.background_mean[j])
        })
    }
}

/// Row indices routed to each risk plot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskPartition {
    pub high: Vec<usize>,
    pub low: Vec<usize>,
}

/// Split rows by the model's own class prediction
pub fn partition_by_prediction(model: &LogisticRegression, x: &Mat<f64>) -> RiskPartition {
    let (high, low): (Vec<(usize, f64)>, Vec<(usize, f64)>) = model
        .predict(x)
        .into_iter()
        .enumerate()
        .partition(|(_, class)| *class == 1.0);

    RiskPartition {
        high: high.into_iter().map(|(i, _)| i).collect(),
        low: low.into_iter().map(|(i, _)| i).collect(),
    }
}

/// Mean absolute attribution of one feature over a subset of rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub index: usize,
    pub mean_abs: f64,
}

/// Features ranked by mean |attribution| over `rows`, largest first
pub fn rank_features(shap: &Mat<f64>, rows: &[usize], feature_names: &[String]) -> Vec<FeatureImportance> {
    let n = rows.len().max(1) as f64;
    let mut ranked: Vec<FeatureImportance> = feature_names
        .iter()
        .enumerate()
        .map(|(j, name)| FeatureImportance {
            feature: name.clone(),
            index: j,
            mean_abs: rows.iter().map(|&i| shap[(i, j)].abs()).sum::<f64>() / n,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.mean_abs
            .partial_cmp(&a.mean_abs)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    ranked
}
