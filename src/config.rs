use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Data source backing the payment-model store.
#[derive(Debug, Clone)]
pub enum DataSource {
    Json(PathBuf),
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gateway_secret_key: String,
    pub enabled_services: Vec<String>,
    pub bind_addr: String,
    pub store_callback_url: String,
    pub data_source: DataSource,
    pub provider_timeout: Duration,
}

impl AppConfig {
    /// Loads process configuration from the environment. Missing required
    /// keys fail here, before the server starts listening.
    pub fn from_env() -> Result<Self> {
        let enabled_services = require_env("ENABLED_SERVICES")?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let data_source = match std::env::var("DATA_SOURCE").as_deref() {
            Ok("memory") => DataSource::Memory,
            Ok("json") | Err(_) => DataSource::Json(
                std::env::var("DATA_SOURCE_PATH")
                    .unwrap_or_else(|_| "db.json".to_string())
                    .into(),
            ),
            Ok(other) => anyhow::bail!("unknown data source type: {other}"),
        };

        let provider_timeout_ms = match std::env::var("PROVIDER_TIMEOUT_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid PROVIDER_TIMEOUT_MS: {raw}"))?,
            Err(_) => 5000,
        };

        Ok(Self {
            gateway_secret_key: require_env("GATEWAY_SECRET_KEY")?,
            enabled_services,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            store_callback_url: std::env::var("STORE_CALLBACK_URL")
                .unwrap_or_else(|_| "https://api.craftingstore.net/callback/custom".to_string()),
            data_source,
            provider_timeout: Duration::from_millis(provider_timeout_ms),
        })
    }
}

/// GoPay credentials and endpoints, loaded once when the service is enabled.
#[derive(Debug, Clone)]
pub struct GoPayConfig {
    /// Externally reachable base URL of this gateway, used to build the
    /// notification callback the provider calls back on.
    pub host_url: String,
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub goid: String,
    pub allowed_swifts: Vec<String>,
}

impl GoPayConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host_url: require_env("HOST_URL")?,
            api_url: require_env("GOPAY_URL")?,
            client_id: require_env("GOPAY_CLIENT_ID")?,
            client_secret: require_env("GOPAY_CLIENT_SECRET")?,
            goid: require_env("GOPAY_GOID")?,
            allowed_swifts: require_env("GOPAY_ALLOWED_SWIFTS")?
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("missing {key} in environment variables"))
}
