//! # Shipping Provider
//!
//! The one asynchronous collaborator of the cart. The orchestrator only knows
//! the [`ShippingProvider`] signature; how a quote is produced (HTTP call,
//! lookup table, fixed rate) is up to the implementation.
//!
//! Calls may be slow and may fail, and concurrent calls may resolve in any
//! order. The orchestrator never calls the provider for an empty cart.
//!
//! ## Implementations
//!
//! - [`FlatRateShipping`] - fixed quote with optional simulated latency.
//! - [`MockShipping`](crate::orchestrator::mock::MockShipping) - test double
//!   whose calls are answered by the test.

pub mod error;
pub mod flat_rate;

pub use error::*;
pub use flat_rate::*;

use async_trait::async_trait;
use rust_decimal::Decimal;

/// Source of shipping costs for a non-empty cart.
#[async_trait]
pub trait ShippingProvider: Send + Sync + 'static {
    /// Quote the shipping cost for the current cart.
    async fn fetch_shipping(&self) -> Result<Decimal, ShippingError>;
}

#[async_trait]
impl<P: ShippingProvider + ?Sized> ShippingProvider for std::sync::Arc<P> {
    async fn fetch_shipping(&self) -> Result<Decimal, ShippingError> {
        (**self).fetch_shipping().await
    }
}
