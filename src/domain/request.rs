use serde::{Deserialize, Serialize};

/// Payment-initiation request as the store posts it to
/// `/service/:service/init`. Field names follow the store's camelCase wire
/// format.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInitRequest {
    pub transaction_id: String,
    pub currency: String,
    pub package: StorePackage,
    #[serde(default)]
    pub user: StoreUser,
    pub webhook: StoreWebhook,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePackage {
    pub name: String,
    /// Amount in minor units, passed to the provider verbatim.
    pub price: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub billing_city: Option<String>,
    #[serde(default)]
    pub billing_address_line_one: Option<String>,
    #[serde(default)]
    pub billing_address_line_two: Option<String>,
    #[serde(default)]
    pub billing_zip_code: Option<String>,
    #[serde(default)]
    pub billing_country: Option<StoreCountry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreCountry {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreWebhook {
    pub success_url: String,
}

/// Success envelope for an accepted payment-initiation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitResponse {
    pub success: bool,
    pub data: InitResponseData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitResponseData {
    /// Provider-hosted checkout URL the store redirects the customer to.
    pub url: String,
}

impl InitResponse {
    pub fn redirect(url: String) -> Self {
        Self {
            success: true,
            data: InitResponseData { url },
        }
    }
}
