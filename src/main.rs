//! # Cart Reactor Demo
//!
//! Runs one shopping session against a small bicycle-shop catalog:
//! 1.  Loads [`CartConfig`] from the environment and starts a [`CartSystem`].
//! 2.  Adds and removes a few items, logging every outcome.
//! 3.  Fires two adds back to back to show latest-wins.
//! 4.  Shuts down and logs the final cart.

use cart_reactor::config::CartConfig;
use cart_reactor::lifecycle::{setup_tracing, CartSystem};
use cart_reactor::model::{Catalog, Item, ItemKey};
use cart_reactor::orchestrator::CartOutcome;
use cart_reactor::shipping::FlatRateShipping;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, Instrument};

fn bicycle_shop() -> Catalog {
    Catalog::new(vec![
        Item::new(1, "Road Bike", Decimal::new(89900, 2)).with_image("/bikes/road.jpg"),
        Item::new(2, "Mountain Bike", Decimal::new(119900, 2))
            .with_sale_price(Decimal::new(99900, 2))
            .with_image("/bikes/mountain.jpg"),
        Item::new(3, "Helmet", Decimal::new(5999, 2)),
        Item::new(4, "Bell", Decimal::new(1250, 2)).with_sale_price(Decimal::new(999, 2)),
    ])
}

fn log_outcome(outcome: &CartOutcome) {
    match outcome {
        CartOutcome::AddItemSuccess(update) | CartOutcome::RemoveItemSuccess(update) => info!(
            kind = %outcome.kind(),
            cart_count = update.cart_count,
            subtotal = %update.subtotal,
            shipping = %update.shipping,
            total = %update.total,
            "Cart updated"
        ),
        CartOutcome::AddItemFailure(e) | CartOutcome::RemoveItemFailure(e) => {
            error!(kind = %outcome.kind(), error = %e, "Cart request failed")
        }
    }
}

async fn next_outcome(outcomes: &mut broadcast::Receiver<CartOutcome>) -> Result<CartOutcome, String> {
    let outcome = outcomes.recv().await.map_err(|e| e.to_string())?;
    log_outcome(&outcome);
    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CartConfig::load().map_err(|e| e.to_string())?;
    info!(?config, "Starting cart session");

    let provider = FlatRateShipping::new(config.flat_shipping).with_latency(config.shipping_latency());
    info!(rate = %provider.rate(), "Flat rate shipping");
    let system = CartSystem::new(&config, bicycle_shop(), Arc::new(provider));
    let mut outcomes = system.client.subscribe();

    let span = tracing::info_span!("shopping");
    async {
        for key in [1, 3, 3, 2] {
            system.client.add_item(ItemKey(key)).await.map_err(|e| e.to_string())?;
            next_outcome(&mut outcomes).await?;
        }

        system.client.remove_item(ItemKey(3)).await.map_err(|e| e.to_string())?;
        next_outcome(&mut outcomes).await?;

        // Not in the catalog: reported, cart untouched.
        system.client.add_item(ItemKey(99)).await.map_err(|e| e.to_string())?;
        next_outcome(&mut outcomes).await?;

        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Two adds in a row. With CART_SHIPPING_LATENCY_MS set, the first is
    // superseded and only one outcome is published.
    let span = tracing::info_span!("double_click");
    async {
        system.client.add_item(ItemKey(4)).await.map_err(|e| e.to_string())?;
        system.client.add_item(ItemKey(4)).await.map_err(|e| e.to_string())?;
        next_outcome(&mut outcomes).await?;
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Shutdown lets live shipping settle, so the store is final and every
    // outcome is already queued.
    let store = system.shutdown().await?;
    while let Ok(outcome) = outcomes.try_recv() {
        log_outcome(&outcome);
    }

    let state = store.state();
    for item in &state.items {
        info!(number = %item.number, name = %item.name, qty = item.qty, line_total = %item.line_total(), "In cart");
    }
    info!(cart_count = state.summary.cart_count, total = %state.summary.total, "Cart header");
    info!(revision = store.revision(), "Session completed successfully");
    Ok(())
}
