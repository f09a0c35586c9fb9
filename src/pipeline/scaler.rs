//! Per-feature standardization fitted on the training partition

use faer::Mat;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Fitted standardization parameters: `z = (x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Feature names in schema order
    pub feature_names: Vec<String>,
    /// Per-feature mean
    pub mean: Vec<f64>,
    /// Per-feature population standard deviation (1.0 for constant features)
    pub scale: Vec<f64>,
    /// Number of rows the scaler was fitted on
    pub n_samples_seen: usize,
}

impl StandardScaler {
    /// Fit on a row-major matrix whose columns follow `feature_names`.
    pub fn fit(x: &Mat<f64>, feature_names: &[String]) -> Result<Self, PipelineError> {
        let (n_rows, n_cols) = (x.nrows(), x.ncols());
        if n_cols != feature_names.len() {
            return Err(PipelineError::SchemaMismatch {
                source_name: "scaler fit".to_string(),
                expected: feature_names.to_vec(),
                found: (0..n_cols).map(|j| format!("column_{}", j)).collect(),
            });
        }
        if n_rows == 0 {
            return Err(PipelineError::EmptyTable {
                path: "training partition".to_string(),
            });
        }

        let n = n_rows as f64;
        let mut mean = Vec::with_capacity(n_cols);
        let mut scale = Vec::with_capacity(n_cols);

        for j in 0..n_cols {
            let mu = (0..n_rows).map(|i| x[(i, j)]).sum::<f64>() / n;
            let var = (0..n_rows).map(|i| (x[(i, j)] - mu).powi(2)).sum::<f64>() / n;
            let sd = var.sqrt();
            mean.push(mu);
            // Constant columns map to zero rather than NaN
            scale.push(if sd > f64::EPSILON { sd } else { 1.0 });
        }

        Ok(Self {
            feature_names: feature_names.to_vec(),
            mean,
            scale,
            n_samples_seen: n_rows,
        })
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Standardize every row of a matrix
    pub fn transform(&self, x: &Mat<f64>) -> Result<Mat<f64>, PipelineError> {
        self.check_width(x.ncols())?;
        Ok(Mat::from_fn(x.nrows(), x.ncols(), |i, j| {
            (x[(i, j)] - self.mean[j]) / self.scale[j]
        }))
    }

    /// Standardize a single feature vector in schema order
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError> {
        self.check_width(row.len())?;
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    fn check_width(&self, width: usize) -> Result<(), PipelineError> {
        if width != self.n_features() {
            return Err(PipelineError::SchemaMismatch {
                source_name: "scaler input".to_string(),
                expected: self.feature_names.clone(),
                found: (0..width).map(|j| format!("column_{}", j)).collect(),
            });
        }
        Ok(())
    }
}
