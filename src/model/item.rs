//! Catalog/cart line items.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe catalog key for items (the product `number`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey(pub u32);

impl From<u32> for ItemKey {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A product line as it appears in the catalog and, with a quantity, in the cart.
///
/// The same struct serves both roles. Catalog entries carry `qty == 0`; cart
/// entries always carry `qty >= 1` (an entry that would drop to zero is removed
/// from the cart instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub number: ItemKey,
    pub name: String,
    pub image: Option<String>,
    pub price: Decimal,
    pub on_sale: bool,
    /// Only meaningful while `on_sale` is set.
    pub sale_price: Decimal,
    pub qty: u32,
}

impl Item {
    /// Creates a catalog item at full price.
    ///
    /// # Arguments
    /// * `number` - Catalog key
    /// * `name` - Display name
    /// * `price` - Regular unit price
    pub fn new(number: u32, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            number: ItemKey(number),
            name: name.into(),
            image: None,
            price,
            on_sale: false,
            sale_price: Decimal::ZERO,
            qty: 0,
        }
    }

    /// Marks the item as on sale at `sale_price`.
    pub fn with_sale_price(mut self, sale_price: Decimal) -> Self {
        self.on_sale = true;
        self.sale_price = sale_price;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_qty(mut self, qty: u32) -> Self {
        self.qty = qty;
        self
    }

    /// The unit price actually charged: `sale_price` while on sale, else `price`.
    pub fn effective_price(&self) -> Decimal {
        if self.on_sale {
            self.sale_price
        } else {
            self.price
        }
    }

    /// `qty * effective_price()`.
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.qty) * self.effective_price()
    }
}
