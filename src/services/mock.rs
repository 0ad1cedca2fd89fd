use crate::domain::request::{InitResponse, StoreInitRequest};
use crate::domain::session::{Reconciliation, SessionStatus, SessionTable};
use crate::error::GatewayError;
use anyhow::Result;

/// Provider double for tests and local runs: no network, fixed checkout
/// URLs, behavior selected by string like the real integrations select
/// endpoints by config.
pub struct MockProviderService {
    pub behavior: String,
    pub sessions: SessionTable,
}

impl MockProviderService {
    pub fn succeeding() -> Self {
        Self {
            behavior: String::new(),
            sessions: SessionTable::new(),
        }
    }
}

#[async_trait::async_trait]
impl crate::services::ServiceIntegration for MockProviderService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn handle(&self, req: StoreInitRequest) -> Result<InitResponse, GatewayError> {
        if self.behavior == "ALWAYS_FAILURE" {
            return Err(GatewayError::ProviderResponse("mock decline".to_string()));
        }

        let provider_id = format!("mock_txn_{}", uuid::Uuid::new_v4());
        self.sessions.record(&provider_id, &req.transaction_id);
        Ok(InitResponse::redirect(format!(
            "https://mock.checkout/{provider_id}"
        )))
    }

    async fn notify(&self, provider_transaction_id: &str) -> Result<(), GatewayError> {
        match self.sessions.reconcile(provider_transaction_id, SessionStatus::Paid) {
            Reconciliation::UnknownSession => {
                tracing::debug!(id = provider_transaction_id, "mock notification ignored");
            }
            outcome => {
                tracing::info!(id = provider_transaction_id, ?outcome, "mock session settled");
            }
        }
        Ok(())
    }
}
