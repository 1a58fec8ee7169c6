//! Pure item-list transitions for add and remove requests.
//!
//! Both functions take the current cart by reference and return a fresh
//! `Vec`; the caller's slice is never touched.

use super::CartError;
use crate::model::{Catalog, Item, ItemKey};

/// Next item list after adding one unit of `key`.
///
/// An item already in the cart gets `qty + 1` in place. Otherwise the catalog
/// entry is copied onto the end of the list with `qty = 1`.
///
/// # Errors
/// [`CartError::UnknownProduct`] if `key` is in neither the cart nor the catalog.
pub fn apply_add(cart: &[Item], catalog: &Catalog, key: ItemKey) -> Result<Vec<Item>, CartError> {
    if cart.iter().any(|item| item.number == key) {
        return Ok(cart
            .iter()
            .map(|item| {
                if item.number == key {
                    item.clone().with_qty(item.qty + 1)
                } else {
                    item.clone()
                }
            })
            .collect());
    }

    let product = catalog.find(key).ok_or(CartError::UnknownProduct(key))?;
    let mut items = cart.to_vec();
    items.push(product.clone().with_qty(1));
    Ok(items)
}

/// Next item list after removing one unit of `key`.
///
/// Removing the last unit drops the entry. A key that is not in the cart is a
/// no-op.
pub fn apply_remove(cart: &[Item], key: ItemKey) -> Vec<Item> {
    cart.iter()
        .filter_map(|item| {
            if item.number != key {
                Some(item.clone())
            } else if item.qty > 1 {
                Some(item.clone().with_qty(item.qty - 1))
            } else {
                None
            }
        })
        .collect()
}
