use crate::domain::request::{InitResponse, StoreInitRequest};
use crate::error::GatewayError;
use anyhow::Result;

pub mod gopay;
pub mod mock;

/// Contract every registered payment-provider integration fulfils.
///
/// `init` runs exactly once at registration; a failure there aborts startup.
/// `handle` serves the store's signed payment-initiation request, `notify`
/// serves the provider's settlement webhook for one of this integration's
/// transactions.
#[async_trait::async_trait]
pub trait ServiceIntegration: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<()>;

    async fn handle(&self, req: StoreInitRequest) -> Result<InitResponse, GatewayError>;

    async fn notify(&self, provider_transaction_id: &str) -> Result<(), GatewayError>;
}

impl std::fmt::Debug for dyn ServiceIntegration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceIntegration")
            .field("name", &self.name())
            .finish()
    }
}
