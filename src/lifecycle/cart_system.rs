use crate::config::CartConfig;
use crate::model::Catalog;
use crate::orchestrator::{CartClient, CartOrchestrator};
use crate::shipping::ShippingProvider;
use crate::store::CartStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The runtime wrapper around a single cart session.
///
/// `CartSystem` is responsible for:
/// - **Lifecycle Management**: Starting the orchestrator and shutting it down
/// - **Dependency Wiring**: Handing the store and shipping provider to the orchestrator
///
/// # Example
///
/// ```ignore
/// let provider = Arc::new(FlatRateShipping::new(config.flat_shipping));
/// let system = CartSystem::new(&config, catalog, provider);
///
/// let mut outcomes = system.client.subscribe();
/// system.client.add_item(ItemKey(1)).await?;
/// let outcome = outcomes.recv().await?;
///
/// // Gracefully shut down when done
/// let store = system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for dispatching cart requests
    pub client: CartClient,

    /// Orchestrator task; yields the store back when it exits
    handle: JoinHandle<CartStore>,
}

impl CartSystem {
    /// Creates the store over `catalog` and spawns the orchestrator.
    pub fn new(config: &CartConfig, catalog: Catalog, provider: Arc<dyn ShippingProvider>) -> Self {
        Self::with_store(config, CartStore::new(catalog), provider)
    }

    /// Spawns the orchestrator over an existing store.
    pub fn with_store(
        config: &CartConfig,
        store: CartStore,
        provider: Arc<dyn ShippingProvider>,
    ) -> Self {
        let (orchestrator, client) = CartOrchestrator::new(config, provider);
        let handle = tokio::spawn(orchestrator.run(store));
        Self { client, handle }
    }

    /// Gracefully shuts down the session and returns the final store.
    ///
    /// Dropping the client closes the request channel. The orchestrator then
    /// lets any live shipping lookup finish (committing or failing it as usual)
    /// before it exits. Clones of the client held elsewhere keep it running.
    pub async fn shutdown(self) -> Result<CartStore, String> {
        info!("Shutting down cart system...");
        drop(self.client);

        match self.handle.await {
            Ok(store) => {
                info!(revision = store.revision(), "Cart system shutdown complete.");
                Ok(store)
            }
            Err(e) => {
                error!("Orchestrator task failed: {:?}", e);
                Err(format!("Orchestrator task failed: {:?}", e))
            }
        }
    }
}
