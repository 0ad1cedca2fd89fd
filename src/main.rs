use std::sync::Arc;
use store_gateway::callback::StoreCallback;
use store_gateway::config::{AppConfig, DataSource, GoPayConfig};
use store_gateway::domain::session::SessionTable;
use store_gateway::http::handlers::gateway::router;
use store_gateway::mediator::GatewayMediator;
use store_gateway::repo::payment_models::{
    InMemoryModelStore, JsonFileModelStore, PaymentModelStore,
};
use store_gateway::services::gopay::GoPayService;
use store_gateway::services::mock::MockProviderService;
use store_gateway::services::ServiceIntegration;
use store_gateway::token::TokenCache;
use store_gateway::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let client = reqwest::Client::builder()
        .timeout(cfg.provider_timeout)
        .build()?;

    let models: Arc<dyn PaymentModelStore> = match &cfg.data_source {
        DataSource::Memory => Arc::new(InMemoryModelStore::new()),
        DataSource::Json(path) => {
            let store = JsonFileModelStore::open(path.clone())?;
            tracing::info!(path = %path.display(), "initialized json data source");
            Arc::new(store)
        }
    };

    let mut mediator = GatewayMediator::new(cfg.gateway_secret_key.clone());
    for name in &cfg.enabled_services {
        let service: Arc<dyn ServiceIntegration> = match name.as_str() {
            "gopay" => Arc::new(GoPayService {
                config: GoPayConfig::from_env()?,
                client: client.clone(),
                tokens: TokenCache::new(),
                sessions: SessionTable::new(),
                store_callback: StoreCallback {
                    callback_url: cfg.store_callback_url.clone(),
                    secret: cfg.gateway_secret_key.clone(),
                    client: client.clone(),
                },
                models: models.clone(),
            }),
            "mock" => Arc::new(MockProviderService::succeeding()),
            other => anyhow::bail!("unknown service in ENABLED_SERVICES: {other}"),
        };
        mediator.register(service).await?;
    }

    let state = AppState {
        mediator: Arc::new(mediator),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("gateway listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
