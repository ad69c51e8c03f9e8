//! Pipeline module - loading, overview statistics and outlier cleaning

pub mod compare;
pub mod correlation;
pub mod describe;
pub mod factors;
pub mod loader;
pub mod missing;
pub mod outliers;

pub use compare::*;
pub use correlation::*;
pub use describe::*;
pub use factors::*;
pub use loader::*;
pub use missing::*;
pub use outliers::*;
