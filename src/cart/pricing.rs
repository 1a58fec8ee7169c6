//! Aggregate figures over an item list. All functions are total.

use crate::model::Item;
use rust_decimal::Decimal;

/// Sum of all quantities.
pub fn cart_count(items: &[Item]) -> u32 {
    items.iter().map(|item| item.qty).sum()
}

/// Sum of `qty * effective_price` over all items.
pub fn subtotal(items: &[Item]) -> Decimal {
    items.iter().map(Item::line_total).sum()
}

/// `subtotal + shipping`, or zero for an empty (zero-subtotal) cart whatever
/// the shipping figure says.
pub fn total(subtotal: Decimal, shipping: Decimal) -> Decimal {
    if subtotal > Decimal::ZERO {
        subtotal + shipping
    } else {
        Decimal::ZERO
    }
}
