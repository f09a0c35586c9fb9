//! Interactive predictor - single-customer risk assessment
//!
//! A [`Predictor`] holds the read-only scaler, model and schema. Each call to
//! [`Predictor::assess`] is independent and keeps no session state.

pub mod narrative;
pub mod profile;
pub mod risk;

use anyhow::Result;

use crate::error::PipelineError;
use crate::model::{load_model, load_schema, LogisticRegression};
use crate::pipeline::{load_json, ArtifactPaths, StandardScaler};

pub use narrative::*;
pub use profile::*;
pub use risk::*;

/// Outcome of one assessment
#[derive(Debug, Clone)]
pub struct Assessment {
    pub profile: CustomerProfile,
    /// Credit limit after the safety cap
    pub effective_limit: f64,
    pub limit_capped: bool,
    /// Raw model probability of default
    pub probability: f64,
    /// Probability clipped for presentation
    pub display_probability: f64,
    pub tier: RiskTier,
    pub reasons: Vec<&'static str>,
    pub recommendations: [&'static str; 3],
}

/// Loaded artifacts needed to score a customer
#[derive(Debug, Clone)]
pub struct Predictor {
    pub schema: Vec<String>,
    pub scaler: StandardScaler,
    pub model: LogisticRegression,
}

impl Predictor {
    /// Build from in-memory artifacts, checking they share the schema
    pub fn new(
        schema: Vec<String>,
        scaler: StandardScaler,
        model: LogisticRegression,
    ) -> Result<Self, PipelineError> {
        for (source, names) in [
            ("scaler", &scaler.feature_names),
            ("model", &model.feature_names),
        ] {
            if names != &schema {
                return Err(PipelineError::SchemaMismatch {
                    source_name: source.to_string(),
                    expected: schema.clone(),
                    found: names.clone(),
                });
            }
        }
        Ok(Self {
            schema,
            scaler,
            model,
        })
    }

    /// Load schema, scaler and model from disk
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let schema = load_schema(paths)?;
        let scaler: StandardScaler = load_json(&paths.scaler())?;
        let model = load_model(paths)?;
        Ok(Self::new(schema, scaler, model)?)
    }

    /// Raw default probability for a feature vector already in schema order
    pub fn probability_for(&self, raw_features: &[f64]) -> Result<f64, PipelineError> {
        let scaled = self.scaler.transform_row(raw_features)?;
        Ok(self.model.predict_proba(&scaled))
    }

    /// Score one customer profile
    pub fn assess(&self, profile: &CustomerProfile) -> Result<Assessment, PipelineError> {
        let (effective_limit, limit_capped) = cap_credit_limit(profile.credit_limit);
        let features = build_feature_vector(profile, effective_limit, &self.schema);
        let probability = self.probability_for(&features)?;
        let tier = RiskTier::from_probability(probability);

        Ok(Assessment {
            profile: profile.clone(),
            effective_limit,
            limit_capped,
            probability,
            display_probability: display_probability(probability),
            tier,
            reasons: decision_reasons(profile.age, effective_limit, profile.pay_status),
            recommendations: recommendations(tier),
        })
    }
}
