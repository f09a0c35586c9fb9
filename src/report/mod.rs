//! Report module - console summaries for each stage

pub mod assessment;
pub mod attribution;
pub mod classification;
pub mod dataset;
pub mod summary;

pub use assessment::*;
pub use attribution::*;
pub use classification::*;
pub use dataset::*;
pub use summary::*;
