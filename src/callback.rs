use crate::error::GatewayError;
use crate::signature;
use serde::Serialize;

/// Settlement callback body. Serialized from a struct so the field order is
/// stable; the signature is computed over these exact bytes.
#[derive(Debug, Serialize)]
struct SettlementPayload<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(rename = "transactionId")]
    transaction_id: &'a str,
}

/// Posts signed settlement callbacks to the store.
#[derive(Clone)]
pub struct StoreCallback {
    pub callback_url: String,
    pub secret: String,
    pub client: reqwest::Client,
}

impl StoreCallback {
    /// Notifies the store that `store_transaction_id` was paid. The raw body
    /// and its `X-Signature` header are computed together, so the store can
    /// verify the digest over the bytes it received.
    pub async fn notify_paid(&self, store_transaction_id: &str) -> Result<(), GatewayError> {
        let payload = SettlementPayload {
            kind: "paid",
            transaction_id: store_transaction_id,
        };
        let raw_body = serde_json::to_string(&payload)
            .map_err(|e| GatewayError::ProviderResponse(format!("callback encode: {e}")))?;
        let hash = signature::sign(raw_body.as_bytes(), self.secret.as_bytes());

        let resp = self
            .client
            .post(&self.callback_url)
            .header("X-Signature", hash)
            .header("Content-Type", "application/json")
            .body(raw_body)
            .send()
            .await?;

        tracing::info!(
            status = resp.status().as_u16(),
            transaction_id = store_transaction_id,
            "store settlement callback delivered"
        );
        Ok(())
    }
}
