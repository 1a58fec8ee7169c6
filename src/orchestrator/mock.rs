//! # Mock Shipping
//!
//! Utilities for driving the orchestrator deterministically in tests.
//!
//! Use [`create_mock_shipping`] to get a provider and a receiver. Every
//! `fetch_shipping` call on the provider shows up on the receiver as a
//! [`ShippingCall`]; the test decides when, and with what, each call resolves.
//! That makes it possible to resolve an older call after a newer one (or the
//! other way round) and check which result the orchestrator keeps.

use crate::shipping::{ShippingError, ShippingProvider};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};

/// One pending provider call, waiting for the test to answer it.
#[derive(Debug)]
pub struct ShippingCall {
    respond_to: oneshot::Sender<Result<Decimal, ShippingError>>,
}

impl ShippingCall {
    /// Answers the call with a quote. Returns `false` if the caller has already
    /// gone away (for example because its request was superseded).
    pub fn resolve(self, shipping: Decimal) -> bool {
        self.respond_to.send(Ok(shipping)).is_ok()
    }

    /// Fails the call.
    pub fn reject(self, error: ShippingError) -> bool {
        self.respond_to.send(Err(error)).is_ok()
    }
}

/// Provider whose calls are answered by the test through [`ShippingCall`]s.
#[derive(Debug, Clone)]
pub struct MockShipping {
    sender: mpsc::UnboundedSender<ShippingCall>,
}

#[async_trait]
impl ShippingProvider for MockShipping {
    async fn fetch_shipping(&self) -> Result<Decimal, ShippingError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ShippingCall { respond_to })
            .map_err(|_| ShippingError::Unavailable("mock receiver dropped".to_string()))?;
        response
            .await
            .map_err(|_| ShippingError::Unavailable("mock call dropped".to_string()))?
    }
}

/// Creates a mock provider and the receiver its calls arrive on.
pub fn create_mock_shipping() -> (MockShipping, mpsc::UnboundedReceiver<ShippingCall>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (MockShipping { sender }, receiver)
}

/// Helper to wait for the next provider call.
pub async fn expect_fetch(receiver: &mut mpsc::UnboundedReceiver<ShippingCall>) -> Option<ShippingCall> {
    receiver.recv().await
}
