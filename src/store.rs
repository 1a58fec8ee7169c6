//! # Cart Store
//!
//! The state holder the orchestrator reads from and commits to. It owns the
//! catalog and the current [`CartState`]; the orchestrator borrows it for the
//! duration of its run loop and hands it back on shutdown.
//!
//! Writes only happen at terminal request stages:
//! - [`CartStore::commit`] replaces items and summary wholesale.
//! - [`CartStore::record_failure`] keeps the cart and remembers the error.

use crate::cart::CartError;
use crate::model::{CartState, CartUpdate, Catalog, Item};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct CartStore {
    catalog: Catalog,
    state: CartState,
    revision: u64,
}

impl CartStore {
    /// Empty cart over the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: CartState::default(),
            revision: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn items(&self) -> &[Item] {
        &self.state.items
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Number of successful commits so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn commit(&mut self, update: &CartUpdate) {
        self.state.items = update.items.clone();
        self.state.summary = update.summary();
        self.state.last_error = None;
        self.revision += 1;
        debug!(revision = self.revision, cart_count = update.cart_count, "Store committed");
    }

    pub fn record_failure(&mut self, error: CartError) {
        debug!(error = %error, "Store recorded failure");
        self.state.last_error = Some(error);
    }
}
