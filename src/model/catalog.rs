//! Read-only product catalog.

use super::{Item, ItemKey};
use serde::{Deserialize, Serialize};

/// Ordered list of available products, keyed by [`ItemKey`].
///
/// The orchestrator only ever reads from it, to copy an item's static
/// attributes into the cart the first time that item is added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// First catalog entry with the given key.
    pub fn find(&self, key: ItemKey) -> Option<&Item> {
        self.items.iter().find(|item| item.number == key)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
