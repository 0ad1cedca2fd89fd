use crate::error::GatewayError;
use crate::services::ServiceIntegration;
use crate::signature;
use anyhow::Result;
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;

pub const SIGNATURE_HEADER: &str = "x-signature";

/// Authenticates inbound store requests and routes them to the registered
/// integration. Built once at startup; no per-request state.
pub struct GatewayMediator {
    secret: String,
    services: HashMap<String, Arc<dyn ServiceIntegration>>,
}

impl GatewayMediator {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            services: HashMap::new(),
        }
    }

    /// Registers an integration under its own name and runs its `init` hook.
    /// Re-registering a name overwrites the previous entry (last write wins).
    pub async fn register(&mut self, service: Arc<dyn ServiceIntegration>) -> Result<()> {
        let name = service.name().to_string();
        tracing::info!(service = %name, "registering service");
        service.init().await?;
        self.services.insert(name.clone(), service);
        tracing::info!(service = %name, "service registered");
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn ServiceIntegration>> {
        self.services.get(name).cloned()
    }

    /// The request gate: unknown service, then signature, then the bound
    /// integration. The 404 body stays generic; the enabled-service list is
    /// not disclosed.
    pub fn authenticate_and_dispatch(
        &self,
        service_name: &str,
        raw_body: &[u8],
        headers: &HeaderMap,
    ) -> Result<Arc<dyn ServiceIntegration>, GatewayError> {
        let service = self
            .resolve(service_name)
            .ok_or(GatewayError::ServiceNotFound)?;

        tracing::debug!(service = service_name, "received store request");

        let candidate = headers
            .get(SIGNATURE_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");

        if candidate.is_empty() || !signature::verify(raw_body, self.secret.as_bytes(), candidate) {
            tracing::error!(service = service_name, "request signature missing or invalid");
            return Err(GatewayError::Unauthorized);
        }

        tracing::debug!(service = service_name, "request signature valid");
        Ok(service)
    }
}
