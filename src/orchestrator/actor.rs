//! # Cart Orchestrator
//!
//! The actor that turns [`CartRequest`]s into [`CartOutcome`]s.
//!
//! Every request walks the same stages:
//!
//! ```text
//! Started -> ItemsComputed -> AggregatesComputed -> AwaitingShipping -> Committed
//!     \____________\__________________\____________________\________-> Failed
//! ```
//!
//! Everything up to `AwaitingShipping` runs synchronously inside the actor loop
//! against the [`CartStore`] it was started with. The shipping call is the only
//! suspension point: it runs in a spawned task and reports back on an internal
//! channel, tagged with the request's [`RequestToken`]. The loop then commits
//! (or fails) the request only if that token is still current for its kind.

use super::client::CartClient;
use super::message::{CartCommand, CartOutcome, CartRequest, RequestKind};
use super::watcher::{PendingCart, RequestStage, RequestToken, Watcher};
use crate::cart::{self, CartError};
use crate::config::CartConfig;
use crate::model::CartUpdate;
use crate::shipping::ShippingProvider;
use crate::store::CartStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Result of one shipping task, delivered back to the actor loop.
#[derive(Debug)]
struct ShippingCompletion {
    kind: RequestKind,
    token: RequestToken,
    result: Result<Decimal, CartError>,
}

/// The cart effect coordinator.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the receiver end of
/// the request channel and, while [`run`](Self::run) is active, the store.
/// Because only this task ever touches the store, no `Mutex` is needed; the
/// only concurrency control is the per-kind [`Watcher`].
pub struct CartOrchestrator {
    receiver: mpsc::Receiver<CartCommand>,
    completions: mpsc::UnboundedReceiver<ShippingCompletion>,
    completion_sender: mpsc::UnboundedSender<ShippingCompletion>,
    outcomes: broadcast::Sender<CartOutcome>,
    provider: Arc<dyn ShippingProvider>,
    shipping_timeout: Option<Duration>,
    add_watcher: Watcher,
    remove_watcher: Watcher,
}

impl CartOrchestrator {
    /// Creates the orchestrator and the client used to talk to it.
    ///
    /// Nothing happens until the orchestrator is spawned with [`run`](Self::run).
    pub fn new(config: &CartConfig, provider: Arc<dyn ShippingProvider>) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(config.request_buffer);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let (outcomes, _) = broadcast::channel(config.outcome_buffer);
        let client = CartClient::new(sender, outcomes.clone());
        let actor = Self {
            receiver,
            completions,
            completion_sender,
            outcomes,
            provider,
            shipping_timeout: config.shipping_timeout(),
            add_watcher: Watcher::new(RequestKind::AddItem),
            remove_watcher: Watcher::new(RequestKind::RemoveItem),
        };
        (actor, client)
    }

    /// Runs the event loop until every client is dropped and no shipping call
    /// is still live, then hands the store back.
    ///
    /// # Context Injection
    /// The store is passed in here rather than at construction, so the caller
    /// decides its lifecycle and gets it back afterwards.
    pub async fn run(mut self, mut store: CartStore) -> CartStore {
        info!(catalog_size = store.catalog().len(), "Orchestrator started");
        let mut accepting = true;

        loop {
            if !accepting && self.add_watcher.is_idle() && self.remove_watcher.is_idle() {
                break;
            }

            tokio::select! {
                biased;
                Some(completion) = self.completions.recv() => {
                    self.on_shipping(completion, &mut store);
                }
                command = self.receiver.recv(), if accepting => match command {
                    Some(CartCommand::Dispatch(request)) => self.on_request(request, &mut store),
                    Some(CartCommand::GetState { respond_to }) => {
                        let _ = respond_to.send(store.state().clone());
                    }
                    None => {
                        debug!("Request channel closed, draining in-flight shipping");
                        accepting = false;
                    }
                },
                else => break,
            }
        }

        self.add_watcher.cancel();
        self.remove_watcher.cancel();
        info!(revision = store.revision(), items = store.items().len(), "Shutdown");
        store
    }

    fn watcher_mut(&mut self, kind: RequestKind) -> &mut Watcher {
        match kind {
            RequestKind::AddItem => &mut self.add_watcher,
            RequestKind::RemoveItem => &mut self.remove_watcher,
        }
    }

    fn on_request(&mut self, request: CartRequest, store: &mut CartStore) {
        let kind = request.kind();
        let key = request.key();
        let token = self.watcher_mut(kind).issue();
        debug!(%kind, %key, %token, stage = ?RequestStage::Started, "Request");

        let pending = match prepare(request, store) {
            Ok(pending) => pending,
            Err(error) => {
                self.fail(kind, token, error, store);
                return;
            }
        };
        debug!(
            %kind,
            %token,
            cart_count = pending.cart_count,
            subtotal = %pending.subtotal,
            stage = ?RequestStage::AggregatesComputed,
            "Request"
        );

        // Empty cart: nothing to ship, no provider round-trip.
        if pending.subtotal <= Decimal::ZERO {
            self.commit(kind, token, pending, Decimal::ZERO, store);
            return;
        }

        let provider = Arc::clone(&self.provider);
        let completions = self.completion_sender.clone();
        let timeout = self.shipping_timeout;
        let handle = tokio::spawn(async move {
            // Owned by this task, so aborting a superseded request aborts the lookup too.
            let mut lookup = JoinSet::new();
            lookup.spawn(async move { fetch_shipping(provider.as_ref(), timeout).await });
            let result = match lookup.join_next().await {
                Some(Ok(result)) => result,
                Some(Err(e)) => {
                    warn!(%kind, %token, error = %e, "Shipping lookup panicked");
                    Err(CartError::ShippingPanicked)
                }
                None => Err(CartError::ShippingPanicked),
            };
            let _ = completions.send(ShippingCompletion {
                kind,
                token,
                result,
            });
        });

        debug!(%kind, %token, stage = ?RequestStage::AwaitingShipping, "Request");
        self.watcher_mut(kind).await_shipping(token, pending, handle);
    }

    fn on_shipping(&mut self, completion: ShippingCompletion, store: &mut CartStore) {
        let ShippingCompletion {
            kind,
            token,
            result,
        } = completion;

        let Some(pending) = self.watcher_mut(kind).settle(token) else {
            debug!(%kind, %token, "Discarded superseded shipping result");
            return;
        };

        match result {
            Ok(shipping) => self.commit(kind, token, pending, shipping, store),
            Err(error) => self.fail(kind, token, error, store),
        }
    }

    fn commit(
        &mut self,
        kind: RequestKind,
        token: RequestToken,
        pending: PendingCart,
        shipping: Decimal,
        store: &mut CartStore,
    ) {
        let shipping = if pending.subtotal > Decimal::ZERO {
            shipping
        } else {
            Decimal::ZERO
        };
        let update = CartUpdate {
            total: cart::total(pending.subtotal, shipping),
            items: pending.items,
            cart_count: pending.cart_count,
            subtotal: pending.subtotal,
            shipping,
        };

        store.commit(&update);
        info!(
            %kind,
            %token,
            cart_count = update.cart_count,
            total = %update.total,
            stage = ?RequestStage::Committed,
            "Committed"
        );
        self.publish(CartOutcome::success(kind, update));
    }

    fn fail(&mut self, kind: RequestKind, token: RequestToken, error: CartError, store: &mut CartStore) {
        warn!(%kind, %token, error = %error, stage = ?RequestStage::Failed, "Request failed");
        store.record_failure(error.clone());
        self.publish(CartOutcome::failure(kind, error));
    }

    fn publish(&self, outcome: CartOutcome) {
        if self.outcomes.send(outcome).is_err() {
            debug!("No outcome subscribers");
        }
    }
}

/// `Started -> ItemsComputed -> AggregatesComputed`, all synchronous.
fn prepare(request: CartRequest, store: &CartStore) -> Result<PendingCart, CartError> {
    let items = match request {
        CartRequest::AddItem { key } => cart::apply_add(store.items(), store.catalog(), key)?,
        CartRequest::RemoveItem { key } => cart::apply_remove(store.items(), key),
    };
    debug!(kind = %request.kind(), items = items.len(), stage = ?RequestStage::ItemsComputed, "Request");

    Ok(PendingCart {
        cart_count: cart::cart_count(&items),
        subtotal: cart::subtotal(&items),
        items,
    })
}

async fn fetch_shipping(
    provider: &dyn ShippingProvider,
    timeout: Option<Duration>,
) -> Result<Decimal, CartError> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, provider.fetch_shipping()).await {
            Ok(result) => result.map_err(CartError::from),
            Err(_) => Err(CartError::ShippingTimeout {
                after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            }),
        },
        None => provider.fetch_shipping().await.map_err(CartError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Catalog, Item, ItemKey};
    use crate::orchestrator::mock::{create_mock_shipping, expect_fetch};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Item::new(1, "Road Bike", Decimal::new(10, 0)),
            Item::new(2, "Helmet", Decimal::new(20, 0)).with_sale_price(Decimal::new(15, 0)),
        ])
    }

    #[test]
    fn test_prepare_add_computes_aggregates() {
        let store = CartStore::new(catalog());
        let pending = prepare(CartRequest::AddItem { key: ItemKey(2) }, &store).unwrap();

        assert_eq!(pending.items.len(), 1);
        assert_eq!(pending.cart_count, 1);
        assert_eq!(pending.subtotal, Decimal::new(15, 0));
    }

    #[test]
    fn test_prepare_unknown_key_fails_before_shipping() {
        let store = CartStore::new(catalog());
        let result = prepare(CartRequest::AddItem { key: ItemKey(99) }, &store);
        assert_eq!(result, Err(CartError::UnknownProduct(ItemKey(99))));
    }

    #[tokio::test]
    async fn test_orchestrator_commits_after_shipping() {
        let (provider, mut calls) = create_mock_shipping();
        let (actor, client) = CartOrchestrator::new(&CartConfig::default(), Arc::new(provider));
        let mut outcomes = client.subscribe();
        let handle = tokio::spawn(actor.run(CartStore::new(catalog())));

        client.add_item(ItemKey(1)).await.unwrap();
        let call = expect_fetch(&mut calls).await.expect("Expected shipping call");
        call.resolve(Decimal::new(5, 0));

        let outcome = outcomes.recv().await.unwrap();
        let update = outcome.update().expect("Expected success");
        assert_eq!(outcome.kind(), RequestKind::AddItem);
        assert_eq!(update.total, Decimal::new(15, 0));

        drop(client);
        let store = handle.await.unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.state().summary.shipping, Decimal::new(5, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shipping_timeout_becomes_failure() {
        let (provider, mut calls) = create_mock_shipping();
        let config = CartConfig {
            shipping_timeout_ms: Some(100),
            ..CartConfig::default()
        };
        let (actor, client) = CartOrchestrator::new(&config, Arc::new(provider));
        let mut outcomes = client.subscribe();
        let handle = tokio::spawn(actor.run(CartStore::new(catalog())));

        client.add_item(ItemKey(1)).await.unwrap();
        // Held but never answered.
        let _call = expect_fetch(&mut calls).await.expect("Expected shipping call");

        let outcome = outcomes.recv().await.unwrap();
        assert_eq!(
            outcome,
            CartOutcome::AddItemFailure(CartError::ShippingTimeout { after_ms: 100 })
        );

        drop(client);
        let store = handle.await.unwrap();
        assert!(store.items().is_empty());
        assert_eq!(store.revision(), 0);
    }
}
