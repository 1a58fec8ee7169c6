use cart_reactor::cart::CartError;
use cart_reactor::config::CartConfig;
use cart_reactor::lifecycle::CartSystem;
use cart_reactor::model::{Catalog, Item, ItemKey};
use cart_reactor::orchestrator::CartOutcome;
use cart_reactor::shipping::FlatRateShipping;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

fn catalog() -> Catalog {
    Catalog::new(vec![
        Item::new(1, "Road Bike", Decimal::new(10, 0)),
        Item::new(2, "Helmet", Decimal::new(20, 0)).with_sale_price(Decimal::new(15, 0)),
        Item::new(3, "Bell", Decimal::new(1250, 2)),
    ])
}

fn system(shipping: Decimal) -> CartSystem {
    CartSystem::new(
        &CartConfig::default(),
        catalog(),
        Arc::new(FlatRateShipping::new(shipping)),
    )
}

async fn next(outcomes: &mut broadcast::Receiver<CartOutcome>) -> CartOutcome {
    tokio::time::timeout(Duration::from_secs(1), outcomes.recv())
        .await
        .expect("Timed out waiting for outcome")
        .expect("Outcome channel closed")
}

/// Full end-to-end run with the flat-rate provider.
#[tokio::test]
async fn test_add_first_item_to_empty_cart() {
    let system = system(Decimal::new(5, 0));
    let mut outcomes = system.client.subscribe();

    system.client.add_item(ItemKey(1)).await.unwrap();
    let outcome = next(&mut outcomes).await;

    let CartOutcome::AddItemSuccess(update) = outcome else {
        panic!("Expected AddItemSuccess, got {outcome:?}");
    };
    assert_eq!(update.items.len(), 1);
    assert_eq!(update.items[0].number, ItemKey(1));
    assert_eq!(update.items[0].qty, 1);
    assert_eq!(update.cart_count, 1);
    assert_eq!(update.subtotal, Decimal::new(10, 0));
    assert_eq!(update.shipping, Decimal::new(5, 0));
    assert_eq!(update.total, Decimal::new(15, 0));

    let store = system.shutdown().await.expect("Failed to shutdown system");
    assert_eq!(store.items(), update.items.as_slice());
}

#[tokio::test]
async fn test_sale_price_drives_subtotal() {
    let system = system(Decimal::new(5, 0));
    let mut outcomes = system.client.subscribe();

    for _ in 0..3 {
        system.client.add_item(ItemKey(2)).await.unwrap();
        assert!(next(&mut outcomes).await.is_success());
    }

    let state = system.client.state().await.unwrap();
    assert_eq!(state.items[0].qty, 3);
    assert_eq!(state.summary.subtotal, Decimal::new(45, 0));
    assert_eq!(state.summary.total, Decimal::new(50, 0));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_removing_last_unit_empties_cart() {
    // A provider that would charge shipping even on an empty cart.
    let system = system(Decimal::new(8, 0));
    let mut outcomes = system.client.subscribe();

    system.client.add_item(ItemKey(3)).await.unwrap();
    next(&mut outcomes).await;
    system.client.remove_item(ItemKey(3)).await.unwrap();
    let outcome = next(&mut outcomes).await;

    let CartOutcome::RemoveItemSuccess(update) = outcome else {
        panic!("Expected RemoveItemSuccess, got {outcome:?}");
    };
    assert!(update.items.is_empty());
    assert_eq!(update.cart_count, 0);
    assert_eq!(update.subtotal, Decimal::ZERO);
    assert_eq!(update.shipping, Decimal::ZERO);
    assert_eq!(update.total, Decimal::ZERO);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shopping_session() {
    let system = system(Decimal::new(450, 2));
    let mut outcomes = system.client.subscribe();

    for key in [1, 3, 1, 2] {
        system.client.add_item(ItemKey(key)).await.unwrap();
        assert!(next(&mut outcomes).await.is_success());
    }
    system.client.remove_item(ItemKey(1)).await.unwrap();
    assert!(next(&mut outcomes).await.is_success());

    let state = system.client.state().await.unwrap();
    let keys: Vec<(u32, u32)> = state.items.iter().map(|i| (i.number.0, i.qty)).collect();
    // First-add order survives the decrement.
    assert_eq!(keys, vec![(1, 1), (3, 1), (2, 1)]);
    assert_eq!(state.summary.cart_count, 3);
    // 10 + 12.50 + 15
    assert_eq!(state.summary.subtotal, Decimal::new(3750, 2));
    assert_eq!(state.summary.total, Decimal::new(4200, 2));

    let store = system.shutdown().await.unwrap();
    assert_eq!(store.revision(), 5);
}

#[tokio::test]
async fn test_unknown_product_is_reported_and_cart_kept() {
    let system = system(Decimal::new(5, 0));
    let mut outcomes = system.client.subscribe();

    system.client.add_item(ItemKey(1)).await.unwrap();
    next(&mut outcomes).await;

    system.client.add_item(ItemKey(77)).await.unwrap();
    assert_eq!(
        next(&mut outcomes).await,
        CartOutcome::AddItemFailure(CartError::UnknownProduct(ItemKey(77)))
    );

    let state = system.client.state().await.unwrap();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.summary.total, Decimal::new(15, 0));
    assert_eq!(state.last_error, Some(CartError::UnknownProduct(ItemKey(77))));

    let store = system.shutdown().await.unwrap();
    assert_eq!(store.revision(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_double_click_commits_once() {
    let provider = FlatRateShipping::new(Decimal::new(5, 0)).with_latency(Duration::from_millis(200));
    let system = CartSystem::new(&CartConfig::default(), catalog(), Arc::new(provider));
    let mut outcomes = system.client.subscribe();

    system.client.add_item(ItemKey(1)).await.unwrap();
    system.client.add_item(ItemKey(1)).await.unwrap();

    let outcome = next(&mut outcomes).await;
    let update = outcome.update().expect("Expected success");
    // Only the second click lands, computed from the still-empty cart.
    assert_eq!(update.items[0].qty, 1);

    let store = system.shutdown().await.unwrap();
    assert_eq!(store.revision(), 1);
    assert!(outcomes.try_recv().is_err());
}
