#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Cart Reactor
//!
//! > **An in-memory shopping cart driven by a latest-wins actor.**
//!
//! This crate keeps a single shopper's cart. Every add or remove recomputes the
//! item list and the money figures from scratch, asks a shipping provider for a
//! quote, and commits the result in one step. If the shopper clicks again before
//! the quote comes back, the older request is dropped without a trace.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Pure core, one effectful edge
//!
//! - **Pure**: the reducer ([`cart::apply_add`], [`cart::apply_remove`]) and the
//!   pricing functions ([`cart::cart_count`], [`cart::subtotal`], [`cart::total`]).
//!   No I/O, trivially unit-tested.
//! - **Effectful**: the [`ShippingProvider`](shipping::ShippingProvider) call.
//!   It is the only place a request suspends.
//!
//! ### Why an actor?
//!
//! The [`CartOrchestrator`](orchestrator::CartOrchestrator) runs in its own Tokio
//! task and owns the [`CartStore`](store::CartStore) while it runs. Reads,
//! recomputation and commits all happen on that one task, so there are no locks.
//! Shipping lookups run in spawned tasks and report back to the actor, which
//! decides whether the result still matters.
//!
//! ## 🚀 Core Concepts
//!
//! ### Latest-wins per request kind
//! Add requests and remove requests each have a [`Watcher`](orchestrator::Watcher).
//! A new request of a kind gets a fresh token and cancels the previous one of
//! the same kind. Results are matched against the token by *issue order*, so a
//! stale shipping quote that happens to arrive last still loses.
//!
//! ### Outcomes
//! Each request that is not superseded publishes exactly one
//! [`CartOutcome`](orchestrator::CartOutcome): a success carrying the full
//! [`CartUpdate`](model::CartUpdate), or a failure carrying a
//! [`CartError`](cart::CartError). A failure never touches the cart's items.
//!
//! ### Money
//! All amounts are [`rust_decimal::Decimal`]. No binary floating point.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! [`Item`](model::Item), [`Catalog`](model::Catalog), [`CartSummary`](model::CartSummary).
//!
//! ### 2. The Logic ([`cart`])
//! Reducer and pricing functions, plus [`CartError`](cart::CartError).
//!
//! ### 3. The Edge ([`shipping`])
//! The provider trait and a flat-rate implementation.
//!
//! ### 4. The Engine ([`orchestrator`])
//! The actor, its client, the latest-wins watchers and the test mock.
//!
//! ### 5. The Wiring ([`lifecycle`], [`store`], [`config`])
//! [`CartSystem`](lifecycle::CartSystem) starts and stops a session;
//! [`CartConfig`](config::CartConfig) reads `CART_*` environment variables.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with commit logs
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod cart;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod orchestrator;
pub mod shipping;
pub mod store;
