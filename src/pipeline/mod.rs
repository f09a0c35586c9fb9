//! Pipeline module - data loading, preparation and artifact persistence

pub mod artifacts;
pub mod loader;
pub mod missing;
pub mod prepare;
pub mod scaler;
pub mod split;
pub mod target;

pub use artifacts::*;
pub use loader::*;
pub use missing::*;
pub use prepare::*;
pub use scaler::StandardScaler;
pub use split::*;
pub use target::*;
