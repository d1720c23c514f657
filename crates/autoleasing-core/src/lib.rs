pub mod error;
pub mod format;
pub mod lease_payment;
pub mod types;

#[cfg(feature = "inventory")]
pub mod inventory;

#[cfg(feature = "inventory")]
pub mod listing;

#[cfg(feature = "wishlist")]
pub mod wishlist;

#[cfg(feature = "enquiry")]
pub mod enquiry;

pub use error::LeasingError;
pub use types::*;

/// Standard result type for all leasing operations
pub type LeasingResult<T> = Result<T, LeasingError>;
