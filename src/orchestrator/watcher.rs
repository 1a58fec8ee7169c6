//! # Latest-Wins Watchers
//!
//! One [`Watcher`] per [`RequestKind`]. Each new request of that kind is issued
//! a fresh [`RequestToken`], which becomes the watcher's current token and
//! aborts whatever shipping task the previous request left in flight.
//!
//! A shipping completion carries the token it was started under. It is only
//! accepted if that token is still current, so a superseded request can never
//! commit, no matter whether its provider call resolves before or after the
//! newer one.

use super::message::RequestKind;
use crate::model::Item;
use rust_decimal::Decimal;
use std::fmt::Display;
use tokio::task::JoinHandle;
use tracing::debug;

/// Issue-order stamp of a request within its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req_{}", self.0)
    }
}

/// Stages a request moves through. `Committed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Started,
    ItemsComputed,
    AggregatesComputed,
    AwaitingShipping,
    Committed,
    Failed,
}

/// Items and synchronous aggregates computed before the shipping call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCart {
    pub items: Vec<Item>,
    pub cart_count: u32,
    pub subtotal: Decimal,
}

struct InFlight {
    token: RequestToken,
    pending: PendingCart,
    handle: JoinHandle<()>,
}

/// Latest-wins slot for one request kind.
pub struct Watcher {
    kind: RequestKind,
    issued: u64,
    in_flight: Option<InFlight>,
}

impl Watcher {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            issued: 0,
            in_flight: None,
        }
    }

    /// Token of the most recently issued request, if any.
    pub fn current(&self) -> Option<RequestToken> {
        (self.issued > 0).then_some(RequestToken(self.issued))
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    /// Starts a new request of this kind, cancelling the one in flight.
    pub fn issue(&mut self) -> RequestToken {
        self.cancel();
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// Parks `pending` until the shipping task for `token` reports back.
    ///
    /// Ignored (and the task aborted) if `token` has already been superseded.
    pub fn await_shipping(&mut self, token: RequestToken, pending: PendingCart, handle: JoinHandle<()>) {
        if self.current() != Some(token) {
            handle.abort();
            return;
        }
        self.cancel();
        self.in_flight = Some(InFlight {
            token,
            pending,
            handle,
        });
    }

    /// Releases the parked cart if `token` is still the live request.
    pub fn settle(&mut self, token: RequestToken) -> Option<PendingCart> {
        if self.current() != Some(token) {
            return None;
        }
        match self.in_flight.take() {
            Some(in_flight) if in_flight.token == token => Some(in_flight.pending),
            other => {
                self.in_flight = other;
                None
            }
        }
    }

    /// Aborts the in-flight shipping task, if any. Its result will never be
    /// looked at.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
            debug!(kind = %self.kind, token = %in_flight.token, "Superseded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(subtotal: i64) -> PendingCart {
        PendingCart {
            items: Vec::new(),
            cart_count: 1,
            subtotal: Decimal::new(subtotal, 0),
        }
    }

    fn idle_task() -> JoinHandle<()> {
        tokio::spawn(std::future::pending::<()>())
    }

    #[tokio::test]
    async fn test_tokens_follow_issue_order() {
        let mut watcher = Watcher::new(RequestKind::AddItem);
        assert_eq!(watcher.current(), None);

        let first = watcher.issue();
        let second = watcher.issue();

        assert!(first < second);
        assert_eq!(watcher.current(), Some(second));
    }

    #[tokio::test]
    async fn test_settle_accepts_only_current_token() {
        let mut watcher = Watcher::new(RequestKind::AddItem);
        let first = watcher.issue();
        watcher.await_shipping(first, pending(10), idle_task());

        let second = watcher.issue();
        watcher.await_shipping(second, pending(20), idle_task());

        // The older request resolves first and is ignored.
        assert_eq!(watcher.settle(first), None);
        assert!(!watcher.is_idle());

        assert_eq!(watcher.settle(second), Some(pending(20)));
        assert!(watcher.is_idle());
        assert_eq!(watcher.settle(second), None);
    }

    #[tokio::test]
    async fn test_issue_aborts_in_flight_task() {
        let mut watcher = Watcher::new(RequestKind::RemoveItem);
        let first = watcher.issue();
        let (guard, dropped) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let _guard = guard;
            std::future::pending::<()>().await;
        });
        watcher.await_shipping(first, pending(10), task);

        watcher.issue();

        // The guard is only dropped when the task is cancelled.
        let result = tokio::time::timeout(std::time::Duration::from_secs(1), dropped).await;
        assert!(matches!(result, Ok(Err(_))));
        assert!(watcher.is_idle());
    }

    #[tokio::test]
    async fn test_stale_park_is_rejected() {
        let mut watcher = Watcher::new(RequestKind::AddItem);
        let first = watcher.issue();
        let _second = watcher.issue();

        watcher.await_shipping(first, pending(10), idle_task());

        assert!(watcher.is_idle());
        assert_eq!(watcher.settle(first), None);
    }
}
