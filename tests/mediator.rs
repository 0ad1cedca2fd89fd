use anyhow::Result;
use axum::http::HeaderMap;
use std::sync::Arc;
use store_gateway::domain::request::{InitResponse, StoreInitRequest};
use store_gateway::error::GatewayError;
use store_gateway::mediator::GatewayMediator;
use store_gateway::services::ServiceIntegration;
use store_gateway::signature;

const SECRET: &str = "mediator-test-secret";

struct StubService {
    name: &'static str,
    url: &'static str,
}

#[async_trait::async_trait]
impl ServiceIntegration for StubService {
    fn name(&self) -> &str {
        self.name
    }

    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn handle(&self, _req: StoreInitRequest) -> Result<InitResponse, GatewayError> {
        Ok(InitResponse::redirect(self.url.to_string()))
    }

    async fn notify(&self, _provider_transaction_id: &str) -> Result<(), GatewayError> {
        Ok(())
    }
}

async fn mediator_with(services: Vec<StubService>) -> GatewayMediator {
    let mut mediator = GatewayMediator::new(SECRET.to_string());
    for svc in services {
        mediator.register(Arc::new(svc)).await.unwrap();
    }
    mediator
}

fn signed_headers(body: &[u8]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let sig = signature::sign(body, SECRET.as_bytes());
    headers.insert("X-Signature", sig.parse().unwrap());
    headers
}

#[tokio::test]
async fn unknown_service_is_rejected_before_signature_check() {
    let mediator = mediator_with(vec![]).await;
    let err = mediator
        .authenticate_and_dispatch("gopay", b"{}", &HeaderMap::new())
        .unwrap_err();
    assert!(matches!(err, GatewayError::ServiceNotFound));
}

#[tokio::test]
async fn missing_signature_header_is_unauthorized() {
    let mediator = mediator_with(vec![StubService {
        name: "a",
        url: "https://a.example",
    }])
    .await;
    let err = mediator
        .authenticate_and_dispatch("a", b"{}", &HeaderMap::new())
        .unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized));
}

#[tokio::test]
async fn wrong_signature_is_unauthorized() {
    let mediator = mediator_with(vec![StubService {
        name: "a",
        url: "https://a.example",
    }])
    .await;
    let mut headers = signed_headers(b"{}");
    headers.insert("X-Signature", "deadbeef".parse().unwrap());
    let err = mediator
        .authenticate_and_dispatch("a", b"{}", &headers)
        .unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized));
}

#[tokio::test]
async fn signature_over_different_body_is_unauthorized() {
    let mediator = mediator_with(vec![StubService {
        name: "a",
        url: "https://a.example",
    }])
    .await;
    let headers = signed_headers(b"{\"transactionId\":\"T1\"}");
    let err = mediator
        .authenticate_and_dispatch("a", b"{\"transactionId\":\"T2\"}", &headers)
        .unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized));
}

#[tokio::test]
async fn valid_request_dispatches_to_the_named_service() {
    let mediator = mediator_with(vec![
        StubService {
            name: "a",
            url: "https://a.example",
        },
        StubService {
            name: "b",
            url: "https://b.example",
        },
    ])
    .await;

    let body = br#"{"transactionId":"T1","currency":"usd","package":{"name":"VIP","price":10},"webhook":{"successUrl":"https://s/ok"}}"#;
    let headers = signed_headers(body);
    let bound = mediator
        .authenticate_and_dispatch("b", body, &headers)
        .unwrap();

    let req: StoreInitRequest = serde_json::from_slice(body).unwrap();
    let resp = bound.handle(req).await.unwrap();
    assert_eq!(resp.data.url, "https://b.example");
}

#[tokio::test]
async fn signature_header_lookup_is_case_insensitive() {
    let mediator = mediator_with(vec![StubService {
        name: "a",
        url: "https://a.example",
    }])
    .await;

    let body = b"{}";
    let sig = signature::sign(body, SECRET.as_bytes());
    let mut headers = HeaderMap::new();
    headers.insert("x-signature", sig.parse().unwrap());

    assert!(mediator.authenticate_and_dispatch("a", body, &headers).is_ok());
}

#[tokio::test]
async fn reregistering_a_name_overwrites_the_previous_service() {
    let mediator = mediator_with(vec![
        StubService {
            name: "a",
            url: "https://first.example",
        },
        StubService {
            name: "a",
            url: "https://second.example",
        },
    ])
    .await;

    let body = b"{\"transactionId\":\"T1\",\"currency\":\"usd\",\"package\":{\"name\":\"VIP\",\"price\":10},\"webhook\":{\"successUrl\":\"https://s/ok\"}}";
    let headers = signed_headers(body);
    let bound = mediator
        .authenticate_and_dispatch("a", body, &headers)
        .unwrap();
    let req: StoreInitRequest = serde_json::from_slice(body).unwrap();
    assert_eq!(bound.handle(req).await.unwrap().data.url, "https://second.example");
}
