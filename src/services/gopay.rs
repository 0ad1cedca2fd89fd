use crate::callback::StoreCallback;
use crate::config::GoPayConfig;
use crate::domain::request::{InitResponse, StoreInitRequest, StoreUser};
use crate::domain::session::{Reconciliation, SessionStatus, SessionTable};
use crate::error::GatewayError;
use crate::repo::payment_models::{PaymentModel, PaymentModelStore};
use crate::token::{BearerToken, TokenCache};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

pub const SERVICE_NAME: &str = "gopay";

/// GoPay provider integration: creates hosted-checkout payment sessions from
/// store requests and reconciles provider webhook notifications back into
/// signed store callbacks.
pub struct GoPayService {
    pub config: GoPayConfig,
    pub client: reqwest::Client,
    pub tokens: TokenCache,
    pub sessions: SessionTable,
    pub store_callback: StoreCallback,
    pub models: Arc<dyn PaymentModelStore>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct InstrumentsResponse {
    #[serde(rename = "enabledPaymentInstruments", default)]
    enabled_payment_instruments: Vec<EnabledInstrument>,
}

#[derive(Debug, Deserialize)]
struct EnabledInstrument {
    #[serde(rename = "paymentInstrument")]
    payment_instrument: String,
}

#[derive(Debug, Deserialize)]
struct PaymentStateResponse {
    state: Option<SessionStatus>,
}

#[derive(Debug, Serialize)]
struct Payer {
    allowed_payment_instruments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_payment_instrument: Option<String>,
    allowed_swifts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_swift: Option<String>,
    contact: PayerContact,
}

/// GoPay requires the contact schema to be fully populated; absent store
/// fields become empty strings, never null.
#[derive(Debug, Serialize)]
struct PayerContact {
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    city: String,
    street: String,
    postal_code: String,
    country_code: String,
}

impl GoPayService {
    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    fn notification_url(&self) -> String {
        format!("{}/service/{}/notification", self.config.host_url, SERVICE_NAME)
    }

    /// Client-credentials grant against the GoPay OAuth endpoint. Called by
    /// the token cache when no fresh token is available.
    async fn fetch_new_token(&self) -> Result<BearerToken, GatewayError> {
        let url = self.api_url("/api/oauth2/token?scope=payment-all&grant_type=client_credentials");
        let resp = self
            .client
            .post(url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .send()
            .await?;

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::ProviderAuth(format!("token response not JSON: {e}")))?;

        match (body.access_token, body.expires_in) {
            (Some(value), Some(expires_in)) => {
                tracing::debug!(expires_in, "fetched new GoPay token");
                Ok(BearerToken::new(value, Duration::from_secs(expires_in)))
            }
            _ => Err(GatewayError::ProviderAuth(
                "token response missing access_token or expires_in".to_string(),
            )),
        }
    }

    async fn bearer(&self) -> Result<String, GatewayError> {
        self.tokens.get_or_refresh(|| self.fetch_new_token()).await
    }

    async fn fetch_payment_instruments(
        &self,
        token: &str,
        currency: &str,
    ) -> Result<Vec<String>, GatewayError> {
        let url = self.api_url(&format!(
            "/api/eshops/eshop/{}/payment-instruments/{}",
            self.config.goid, currency
        ));
        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "payment instruments request failed");
            return Err(GatewayError::ProviderResponse(format!(
                "payment instruments request failed with HTTP {}",
                status.as_u16()
            )));
        }

        let resp: InstrumentsResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::ProviderResponse(format!("payment instruments: {e}")))?;

        Ok(resp
            .enabled_payment_instruments
            .into_iter()
            .map(|i| i.payment_instrument)
            .collect())
    }

    async fn fetch_transaction_status(&self, id: &str) -> Result<SessionStatus, GatewayError> {
        let token = self.bearer().await?;
        let url = self.api_url(&format!("/api/payments/payment/{id}"));
        let resp: PaymentStateResponse = self
            .client
            .get(url)
            .bearer_auth(&token)
            .header("Accept", "application/json")
            .send()
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::ProviderResponse(format!("payment status: {e}")))?;

        resp.state.ok_or_else(|| {
            GatewayError::ProviderResponse("payment status response missing state".to_string())
        })
    }

    fn build_payer(&self, instruments: Vec<String>, user: &StoreUser) -> Payer {
        let street = format!(
            "{}{}",
            user.billing_address_line_one.clone().unwrap_or_default(),
            user.billing_address_line_two.clone().unwrap_or_default()
        );
        Payer {
            default_payment_instrument: instruments.first().cloned(),
            allowed_payment_instruments: instruments,
            default_swift: self.config.allowed_swifts.first().cloned(),
            allowed_swifts: self.config.allowed_swifts.clone(),
            contact: PayerContact {
                first_name: user.first_name.clone().unwrap_or_default(),
                last_name: user.last_name.clone().unwrap_or_default(),
                email: user.email.clone().unwrap_or_default(),
                phone_number: String::new(),
                city: user.billing_city.clone().unwrap_or_default(),
                street,
                postal_code: user.billing_zip_code.clone().unwrap_or_default(),
                country_code: user
                    .billing_country
                    .as_ref()
                    .map(|c| c.code.clone())
                    .unwrap_or_default(),
            },
        }
    }

    fn persist_model(&self, model: PaymentModel) {
        if let Err(e) = self.models.save(&model) {
            tracing::error!(id = %model.id, error = %e, "failed to persist payment model");
        }
    }

    fn persist_status(&self, id: &str, status: SessionStatus) {
        match self.models.get(id) {
            Ok(Some(mut model)) => {
                model.status = status;
                self.persist_model(model);
            }
            Ok(None) => {}
            Err(e) => tracing::error!(id, error = %e, "failed to load payment model"),
        }
    }
}

#[async_trait::async_trait]
impl crate::services::ServiceIntegration for GoPayService {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    async fn init(&self) -> Result<()> {
        anyhow::ensure!(!self.config.client_id.is_empty(), "GOPAY_CLIENT_ID is empty");
        anyhow::ensure!(!self.config.client_secret.is_empty(), "GOPAY_CLIENT_SECRET is empty");
        anyhow::ensure!(!self.config.goid.is_empty(), "GOPAY_GOID is empty");
        anyhow::ensure!(!self.config.api_url.is_empty(), "GOPAY_URL is empty");
        anyhow::ensure!(!self.config.host_url.is_empty(), "HOST_URL is empty");
        tracing::info!(notification_url = %self.notification_url(), "gopay service initialized");
        Ok(())
    }

    async fn handle(&self, req: StoreInitRequest) -> Result<InitResponse, GatewayError> {
        // The store sends lowercase currency codes; GoPay requires uppercase.
        let currency = req.currency.to_uppercase();
        let token = self.bearer().await?;
        let instruments = self.fetch_payment_instruments(&token, &currency).await?;
        let payer = self.build_payer(instruments, &req.user);

        let body = json!({
            "payer": payer,
            "target": {"type": "ACCOUNT", "goid": self.config.goid},
            "items": [{
                "type": "ITEM",
                "name": req.package.name,
                "amount": req.package.price,
            }],
            "amount": req.package.price,
            "currency": currency,
            "order_number": req.transaction_id,
            "order_description": "",
            "callback": {
                "return_url": req.webhook.success_url,
                "notification_url": self.notification_url(),
            },
            "additional_params": []
        });

        let resp: serde_json::Value = self
            .client
            .post(self.api_url("/api/payments/payment"))
            .bearer_auth(&token)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::ProviderResponse(format!("payment creation: {e}")))?;

        let provider_id = resp.get("id").and_then(normalize_id);
        let checkout_url = resp
            .get("gw_url")
            .and_then(|u| u.as_str())
            .map(str::to_string);

        let (provider_id, checkout_url) = match (provider_id, checkout_url) {
            (Some(id), Some(url)) => (id, url),
            _ => {
                tracing::error!(response = %resp, "payment creation response missing id or gw_url");
                return Err(GatewayError::ProviderResponse(
                    "payment creation response missing id or gw_url".to_string(),
                ));
            }
        };

        self.sessions.record(&provider_id, &req.transaction_id);
        self.persist_model(PaymentModel {
            id: provider_id.clone(),
            store_transaction_id: req.transaction_id.clone(),
            status: SessionStatus::Created,
            amount_minor: req.package.price,
            currency,
            created_at: chrono::Utc::now(),
        });
        tracing::info!(
            provider_id = %provider_id,
            store_id = %req.transaction_id,
            "payment session created"
        );

        Ok(InitResponse::redirect(checkout_url))
    }

    async fn notify(&self, provider_transaction_id: &str) -> Result<(), GatewayError> {
        let status = self.fetch_transaction_status(provider_transaction_id).await?;

        match self.sessions.reconcile(provider_transaction_id, status) {
            Reconciliation::UnknownSession => {
                tracing::debug!(
                    id = provider_transaction_id,
                    ?status,
                    "notification for unknown session, ignoring"
                );
            }
            Reconciliation::Updated(status) => {
                tracing::info!(id = provider_transaction_id, ?status, "session status updated");
                self.persist_status(provider_transaction_id, status);
            }
            Reconciliation::Settled {
                store_transaction_id,
            } => {
                self.persist_status(provider_transaction_id, SessionStatus::Paid);
                self.store_callback.notify_paid(&store_transaction_id).await?;
            }
        }

        Ok(())
    }
}

/// GoPay returns numeric payment ids; tolerate string ids as well.
fn normalize_id(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
