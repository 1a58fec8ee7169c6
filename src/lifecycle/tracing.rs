//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the
//! `tracing` crate. Call it once, at the start of the binary.
//!
//! ## What Gets Traced
//!
//! - **Orchestrator lifecycle**: startup, shutdown, final store revision
//! - **Request stages**: `Started`, `ItemsComputed`, `AggregatesComputed`,
//!   `AwaitingShipping` at debug level, with `kind`, `key` and `token` fields
//! - **Commits**: info level, with the new `cart_count` and `total`
//! - **Failures**: warn level, with the error
//! - **Supersession**: debug level `Superseded` and
//!   `Discarded superseded shipping result`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Commits and failures only
//! RUST_LOG=info cargo run
//!
//! # Every stage transition
//! RUST_LOG=debug cargo run
//!
//! # Only the orchestrator
//! RUST_LOG=cart_reactor::orchestrator=debug cargo run
//! ```
//!
//! **With `RUST_LOG=debug`** a single add looks like:
//!
//! ```text
//! DEBUG add_item: Sending request request=AddItem { key: ItemKey(1) }
//! DEBUG Request kind=add_item key=#1 token=req_1 stage=Started
//! DEBUG Request kind=add_item items=1 stage=ItemsComputed
//! DEBUG Request kind=add_item token=req_1 cart_count=1 subtotal=899.00 stage=AggregatesComputed
//! DEBUG Request kind=add_item token=req_1 stage=AwaitingShipping
//! INFO Committed kind=add_item token=req_1 cart_count=1 total=904.00 stage=Committed
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Request fields already say where a line comes from
        .compact()
        .init();
}
