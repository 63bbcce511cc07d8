pub mod amortization;
pub mod brackets;
pub mod deductions;
pub mod error;
pub mod report;
pub mod tables;
pub mod types;

mod validate;

#[cfg(feature = "income")]
pub mod income;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "housing")]
pub mod housing;

#[cfg(feature = "family")]
pub mod family;

#[cfg(feature = "employment")]
pub mod employment;

#[cfg(feature = "consumer")]
pub mod consumer;

#[cfg(feature = "savings")]
pub mod savings;

pub use error::QcFinanceError;
pub use types::*;

/// Standard result type for all qc-finance operations
pub type QcFinanceResult<T> = Result<T, QcFinanceError>;
