//! creditrisk: Credit Default Risk Library
//!
//! Data preparation, logistic regression training, single-customer risk
//! assessment and linear attribution reporting for credit default data.

pub mod cli;
pub mod error;
pub mod explain;
pub mod model;
pub mod pipeline;
pub mod predict;
pub mod report;
pub mod utils;

pub use error::PipelineError;
