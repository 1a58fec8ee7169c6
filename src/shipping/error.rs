//! Error types for shipping lookups.

use thiserror::Error;

/// Ways a shipping cost lookup can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShippingError {
    /// The provider could not be reached.
    #[error("Shipping provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with a non-success status.
    #[error("Shipping provider returned status {0}")]
    BadStatus(u16),

    /// The provider answered with something that is not a usable price.
    #[error("Invalid shipping cost: {0}")]
    InvalidCost(String),
}
