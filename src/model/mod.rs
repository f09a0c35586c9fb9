//! Model module - logistic regression, evaluation and the training stage

pub mod logistic;
pub mod metrics;
pub mod train;

pub use logistic::*;
pub use metrics::*;
pub use train::*;
