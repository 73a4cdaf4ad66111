pub mod error;
pub mod loan;
pub mod property;
pub mod ranking;
pub mod stress;
pub mod types;

pub use error::ScocError;
pub use types::*;

/// Standard result type for all sCoC operations
pub type ScocResult<T> = Result<T, ScocError>;
