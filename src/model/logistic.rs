//! L2-regularized binary logistic regression fitted by Newton-Raphson (IRLS)
//!
//! Minimizes `sum(log_loss) + ||w||^2 / (2C)` with an unpenalized intercept.
//! Each iteration solves `H * step = g` through a Cholesky factorization.

use chrono::Utc;
use faer::prelude::*;
use faer::{Mat, Side};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Probability at or above which a sample is classified as a defaulter
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Default iteration cap
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default inverse regularization strength
pub const DEFAULT_C: f64 = 1.0;

/// Convergence tolerance on the largest absolute Newton step
const STEP_TOLERANCE: f64 = 1e-8;

/// Ridge added to the intercept diagonal so the Hessian stays definite
const INTERCEPT_JITTER: f64 = 1e-10;

/// Solver configuration
#[derive(Debug, Clone, Copy)]
pub struct LogisticConfig {
    pub max_iter: usize,
    pub c: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            c: DEFAULT_C,
        }
    }
}

/// Training provenance stored alongside the coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub creditrisk_version: String,
    pub trained_at: String,
    pub n_samples: usize,
    pub max_iter: usize,
    pub c: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Fitted logistic regression model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Feature names in schema order
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub metadata: ModelMetadata,
}

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl LogisticRegression {
    /// Fit on standardized features `x` (rows = samples) and 0/1 labels `y`.
    pub fn fit(
        x: &Mat<f64>,
        y: &[f64],
        feature_names: &[String],
        config: &LogisticConfig,
    ) -> Result<Self, PipelineError> {
        let (n, p) = (x.nrows(), x.ncols());
        if n != y.len() {
            return Err(PipelineError::LengthMismatch {
                features: n,
                labels: y.len(),
            });
        }
        if n == 0 {
            return Err(PipelineError::EmptyTable {
                path: "training features".to_string(),
            });
        }
        if p != feature_names.len() {
            return Err(PipelineError::SchemaMismatch {
                source_name: "training features".to_string(),
                expected: feature_names.to_vec(),
                found: (0..p).map(|j| format!("column_{}", j)).collect(),
            });
        }

        let positives = y.iter().filter(|&&v| v >= 0.5).count();
        if positives == 0 || positives == n {
            return Err(PipelineError::SingleClass {
                class: if positives == 0 { 0 } else { 1 },
                rows: n,
            });
        }

        let lambda = 1.0 / config.c;

        // Design matrix with a trailing intercept column
        let xa = Mat::from_fn(n, p + 1, |i, j| if j < p { x[(i, j)] } else { 1.0 });

        let mut beta = vec![0.0; p + 1];
        let mut iterations = 0;
        let mut converged = false;

        for iteration in 1..=config.max_iter {
            iterations = iteration;

            let probs: Vec<f64> = (0..n)
                .map(|i| sigmoid((0..=p).map(|j| xa[(i, j)] * beta[j]).sum()))
                .collect();

            let residual = Mat::from_fn(n, 1, |i, _| probs[i] - y[i]);
            let mut grad = xa.transpose() * &residual;
            for (j, b) in beta.iter().enumerate().take(p) {
                grad[(j, 0)] += lambda * b;
            }

            let xw = Mat::from_fn(n, p + 1, |i, j| xa[(i, j)] * probs[i] * (1.0 - probs[i]));
            let mut hessian = xa.transpose() * &xw;
            for j in 0..p {
                hessian[(j, j)] += lambda;
            }
            hessian[(p, p)] += INTERCEPT_JITTER;

            let cholesky = hessian
                .cholesky(Side::Lower)
                .map_err(|_| PipelineError::SingularHessian { iteration })?;
            let step = cholesky.solve(&grad);

            let mut max_step: f64 = 0.0;
            for (j, b) in beta.iter_mut().enumerate() {
                let s = step[(j, 0)];
                *b -= s;
                max_step = max_step.max(s.abs());
            }

            if !max_step.is_finite() {
                return Err(PipelineError::SingularHessian { iteration });
            }
            if max_step < STEP_TOLERANCE {
                converged = true;
                break;
            }
        }

        let intercept = beta[p];
        beta.truncate(p);

        Ok(Self {
            feature_names: feature_names.to_vec(),
            coefficients: beta,
            intercept,
            metadata: ModelMetadata {
                creditrisk_version: env!("CARGO_PKG_VERSION").to_string(),
                trained_at: Utc::now().to_rfc3339(),
                n_samples: n,
                max_iter: config.max_iter,
                c: config.c,
                iterations,
                converged,
            },
        })
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Linear predictor (log-odds) for one standardized row
    pub fn decision_function(&self, row: &[f64]) -> f64 {
        self.intercept
            + row
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>()
    }

    /// Probability of default for one standardized row
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        sigmoid(self.decision_function(row))
    }

    /// Probability of default for every row of a matrix
    pub fn predict_proba_matrix(&self, x: &Mat<f64>) -> Vec<f64> {
        (0..x.nrows())
            .map(|i| {
                let z = self.intercept
                    + (0..x.ncols())
                        .map(|j| x[(i, j)] * self.coefficients[j])
                        .sum::<f64>();
                sigmoid(z)
            })
            .collect()
    }

    /// Class prediction (0.0 or 1.0) for every row of a matrix
    pub fn predict(&self, x: &Mat<f64>) -> Vec<f64> {
        self.predict_proba_matrix(x)
            .into_iter()
            .map(|p| if p >= DECISION_THRESHOLD { 1.0 } else { 0.0 })
            .collect()
    }
}
