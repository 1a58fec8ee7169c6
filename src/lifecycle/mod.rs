//! # Session Lifecycle
//!
//! Wiring and teardown for one cart session.
//!
//! 1. **Creation** - Build the [`CartStore`](crate::store::CartStore) and the
//!    [`CartOrchestrator`](crate::orchestrator::CartOrchestrator)
//! 2. **Context Injection** - Hand the store to the orchestrator's `run()`
//! 3. **Graceful Shutdown** - Drop the client, let in-flight shipping settle,
//!    get the store back
//!
//! Observability setup lives here too, see [`setup_tracing`].

pub mod cart_system;
pub mod tracing;

pub use self::cart_system::*;
pub use self::tracing::*;
