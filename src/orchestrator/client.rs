//! # Cart Client
//!
//! The handle the rest of the application uses to talk to the
//! [`CartOrchestrator`](super::CartOrchestrator).

use super::message::{CartCommand, CartOutcome, CartRequest};
use crate::cart::CartError;
use crate::model::{CartState, ItemKey};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, instrument};

/// A cheap, cloneable handle to a running orchestrator.
///
/// Requests are fire-and-forget, the way a UI dispatches actions: the result
/// shows up later on the outcome stream from [`subscribe`](Self::subscribe), or
/// never, if a newer request of the same kind superseded it.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartCommand>,
    outcomes: broadcast::Sender<CartOutcome>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartCommand>, outcomes: broadcast::Sender<CartOutcome>) -> Self {
        Self { sender, outcomes }
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, key: ItemKey) -> Result<(), CartError> {
        self.dispatch(CartRequest::AddItem { key }).await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, key: ItemKey) -> Result<(), CartError> {
        self.dispatch(CartRequest::RemoveItem { key }).await
    }

    pub async fn dispatch(&self, request: CartRequest) -> Result<(), CartError> {
        debug!(?request, "Sending request");
        self.sender
            .send(CartCommand::Dispatch(request))
            .await
            .map_err(|_| CartError::OrchestratorClosed)
    }

    /// Current contents of the store, as seen by the orchestrator after every
    /// command sent before this one.
    #[instrument(skip(self))]
    pub async fn state(&self) -> Result<CartState, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartCommand::GetState { respond_to })
            .await
            .map_err(|_| CartError::OrchestratorClosed)?;
        response.await.map_err(|_| CartError::OrchestratorDropped)
    }

    /// Stream of outcomes published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<CartOutcome> {
        self.outcomes.subscribe()
    }
}
