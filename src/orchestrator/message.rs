//! # Messages
//!
//! Inbound requests, outbound outcomes, and the internal command type carried
//! on the orchestrator's channel.

use crate::cart::CartError;
use crate::model::{CartState, CartUpdate, ItemKey};
use std::fmt::Display;
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel used by the orchestrator.
pub type Response<T> = oneshot::Sender<T>;

/// The two independent request streams. Latest-wins applies within a kind,
/// never across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    AddItem,
    RemoveItem,
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddItem => write!(f, "add_item"),
            Self::RemoveItem => write!(f, "remove_item"),
        }
    }
}

/// A user action on the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartRequest {
    AddItem { key: ItemKey },
    RemoveItem { key: ItemKey },
}

impl CartRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::AddItem { .. } => RequestKind::AddItem,
            Self::RemoveItem { .. } => RequestKind::RemoveItem,
        }
    }

    pub fn key(&self) -> ItemKey {
        match self {
            Self::AddItem { key } | Self::RemoveItem { key } => *key,
        }
    }
}

/// Published once per request that was not superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    AddItemSuccess(CartUpdate),
    AddItemFailure(CartError),
    RemoveItemSuccess(CartUpdate),
    RemoveItemFailure(CartError),
}

impl CartOutcome {
    pub fn success(kind: RequestKind, update: CartUpdate) -> Self {
        match kind {
            RequestKind::AddItem => Self::AddItemSuccess(update),
            RequestKind::RemoveItem => Self::RemoveItemSuccess(update),
        }
    }

    pub fn failure(kind: RequestKind, error: CartError) -> Self {
        match kind {
            RequestKind::AddItem => Self::AddItemFailure(error),
            RequestKind::RemoveItem => Self::RemoveItemFailure(error),
        }
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            Self::AddItemSuccess(_) | Self::AddItemFailure(_) => RequestKind::AddItem,
            Self::RemoveItemSuccess(_) | Self::RemoveItemFailure(_) => RequestKind::RemoveItem,
        }
    }

    pub fn update(&self) -> Option<&CartUpdate> {
        match self {
            Self::AddItemSuccess(update) | Self::RemoveItemSuccess(update) => Some(update),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CartError> {
        match self {
            Self::AddItemFailure(error) | Self::RemoveItemFailure(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.update().is_some()
    }
}

/// Internal message type sent from [`CartClient`](super::CartClient) to the
/// orchestrator.
#[derive(Debug)]
pub enum CartCommand {
    Dispatch(CartRequest),
    GetState { respond_to: Response<CartState> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors_match_kind() {
        let failure = CartOutcome::failure(
            RequestKind::RemoveItem,
            CartError::UnknownProduct(ItemKey(1)),
        );
        assert!(matches!(failure, CartOutcome::RemoveItemFailure(_)));
        assert_eq!(failure.kind(), RequestKind::RemoveItem);
        assert!(!failure.is_success());
        assert!(failure.update().is_none());
    }

    #[test]
    fn test_request_accessors() {
        let request = CartRequest::RemoveItem { key: ItemKey(4) };
        assert_eq!(request.kind(), RequestKind::RemoveItem);
        assert_eq!(request.key(), ItemKey(4));
        assert_eq!(request.kind().to_string(), "remove_item");
    }
}
