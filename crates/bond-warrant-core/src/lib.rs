pub mod error;
pub mod types;

#[cfg(feature = "fixed_income")]
pub mod fixed_income;

#[cfg(feature = "derivatives")]
pub mod derivatives;

#[cfg(feature = "simulation")]
pub mod simulation;

#[cfg(feature = "market_data")]
pub mod market_data;

pub use error::WarrantSimError;
pub use types::*;

/// Standard result type for all bond-warrant operations
pub type WarrantSimResult<T> = Result<T, WarrantSimError>;
