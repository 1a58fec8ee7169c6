//! Cart request orchestration.
//!
//! This module provides the actor that sequences reducer, pricing and shipping
//! for every request, and the client used to drive it.
//!
//! # Main Components
//!
//! - [`CartOrchestrator`] - The actor; owns the store while it runs
//! - [`CartClient`] - Cloneable handle for dispatching requests and reading state
//! - [`Watcher`] - Latest-wins bookkeeping for one request kind
//! - [`CartRequest`] / [`CartOutcome`] - What goes in and what comes out
//!
//! # Testing
//!
//! See [`mock`] for a shipping provider that tests can answer by hand.

pub mod actor;
pub mod client;
pub mod message;
pub mod mock;
pub mod watcher;

pub use actor::CartOrchestrator;
pub use client::CartClient;
pub use message::{CartCommand, CartOutcome, CartRequest, RequestKind, Response};
pub use watcher::{PendingCart, RequestStage, RequestToken, Watcher};
