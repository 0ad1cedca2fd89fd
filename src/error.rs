use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Gateway failure taxonomy. Every variant maps to one HTTP status so the
/// store always sees a consistent rejection shape.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid request signature")]
    Unauthorized,

    #[error("service not found")]
    ServiceNotFound,

    #[error("malformed request body: {0}")]
    BadRequest(String),

    #[error("provider authentication failed: {0}")]
    ProviderAuth(String),

    #[error("unexpected provider response: {0}")]
    ProviderResponse(String),

    #[error("provider call failed: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
pub struct RejectionBody {
    pub success: bool,
    pub status: u16,
    pub message: String,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized => StatusCode::FORBIDDEN,
            GatewayError::ServiceNotFound => StatusCode::NOT_FOUND,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::ProviderAuth(_) => StatusCode::BAD_GATEWAY,
            GatewayError::ProviderResponse(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Network(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Network(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Rejection message shown to the store. Provider-side detail stays in
    /// the logs; the body carries only the error class.
    fn public_message(&self) -> String {
        match self {
            GatewayError::Unauthorized => "invalid request signature".to_string(),
            GatewayError::ServiceNotFound => "service not found".to_string(),
            GatewayError::BadRequest(msg) => format!("malformed request body: {msg}"),
            GatewayError::ProviderAuth(_) => "provider authentication failed".to_string(),
            GatewayError::ProviderResponse(_) => "unexpected provider response".to_string(),
            GatewayError::Network(_) => "provider call failed".to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = RejectionBody {
            success: false,
            status: status.as_u16(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
