//! Error types for cart requests.

use crate::model::ItemKey;
use crate::shipping::ShippingError;
use thiserror::Error;

/// Errors that can end a cart request in a failure outcome, plus the channel
/// errors a [`CartClient`](crate::orchestrator::CartClient) can hit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// An add request named a key that is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ItemKey),

    /// The shipping provider rejected the lookup.
    #[error("Shipping lookup failed: {0}")]
    Shipping(#[from] ShippingError),

    /// The shipping provider did not answer within the configured timeout.
    #[error("Shipping lookup timed out after {after_ms}ms")]
    ShippingTimeout { after_ms: u64 },

    /// The shipping provider panicked instead of answering.
    #[error("Shipping lookup panicked")]
    ShippingPanicked,

    /// The orchestrator is no longer accepting requests.
    #[error("Cart orchestrator closed")]
    OrchestratorClosed,

    /// The orchestrator went away before answering.
    #[error("Cart orchestrator dropped response channel")]
    OrchestratorDropped,
}
