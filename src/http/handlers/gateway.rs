use crate::domain::request::StoreInitRequest;
use crate::error::GatewayError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/service/:service/init", post(service_init))
        .route("/service/:service/notification", get(service_notification))
        .with_state(state)
}

/// Signed payment-initiation request from the store. The body is taken raw so
/// the signature is verified over the exact bytes sent, then parsed.
pub async fn service_init(
    State(state): State<AppState>,
    Path(service): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let integration = match state.mediator.authenticate_and_dispatch(&service, &body, &headers) {
        Ok(integration) => integration,
        Err(e) => return e.into_response(),
    };

    let req: StoreInitRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => return GatewayError::BadRequest(e.to_string()).into_response(),
    };

    match integration.handle(req).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => {
            tracing::error!(service = %service, error = %e, "payment initiation failed");
            e.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NotificationParams {
    pub id: String,
}

/// Provider settlement webhook. Unauthenticated by design (provider trust is
/// assumed by network topology); reconciliation failures are logged and
/// swallowed since the provider re-delivers and does not read the response.
pub async fn service_notification(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Query(params): Query<NotificationParams>,
) -> Response {
    let Some(integration) = state.mediator.resolve(&service) else {
        return GatewayError::ServiceNotFound.into_response();
    };

    if let Err(e) = integration.notify(&params.id).await {
        tracing::error!(
            service = %service,
            id = %params.id,
            error = %e,
            "notification reconciliation failed"
        );
    }

    StatusCode::OK.into_response()
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
