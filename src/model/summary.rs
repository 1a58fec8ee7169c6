use super::Item;
use crate::cart::CartError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary figures derived from a cart's items.
///
/// Always recomputed from scratch on every add/remove; never adjusted
/// incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub cart_count: u32,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Payload of a success outcome: the replacement item list plus its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUpdate {
    pub items: Vec<Item>,
    pub cart_count: u32,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl CartUpdate {
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            cart_count: self.cart_count,
            subtotal: self.subtotal,
            shipping: self.shipping,
            total: self.total,
        }
    }
}

/// Everything the store currently holds about the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    pub items: Vec<Item>,
    pub summary: CartSummary,
    /// Error of the most recent failed request, cleared by the next success.
    pub last_error: Option<CartError>,
}
