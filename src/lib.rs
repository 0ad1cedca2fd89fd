pub mod callback;
pub mod config;
pub mod domain {
    pub mod request;
    pub mod session;
}
pub mod error;
pub mod http {
    pub mod handlers {
        pub mod gateway;
    }
}
pub mod mediator;
pub mod repo {
    pub mod payment_models;
}
pub mod services;
pub mod signature;
pub mod token;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub mediator: Arc<mediator::GatewayMediator>,
}
