use crate::error::GatewayError;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Refresh this long before the provider-reported expiry, so a token is
/// never presented right at its deadline.
const EXPIRY_SKEW: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct BearerToken {
    pub value: String,
    pub expires_at: Instant,
}

impl BearerToken {
    pub fn new(value: String, expires_in: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + expires_in,
        }
    }

    fn is_fresh(&self, skew: Duration) -> bool {
        Instant::now() + skew < self.expires_at
    }
}

/// Shared bearer-token cache for one provider account.
///
/// The refresh runs while the cache mutex is held: when N concurrent callers
/// observe an expired token, the first performs one network refresh and the
/// rest block on the lock, then return the freshly stored value. The cache is
/// only written on a successful refresh, so a failed refresh cannot leave
/// partial data behind.
#[derive(Clone, Default)]
pub struct TokenCache {
    inner: Arc<Mutex<Option<BearerToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<String, GatewayError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<BearerToken, GatewayError>>,
    {
        let mut guard = self.inner.lock().await;
        if let Some(token) = guard.as_ref() {
            if token.is_fresh(EXPIRY_SKEW) {
                return Ok(token.value.clone());
            }
        }

        tracing::debug!("bearer token missing or expiring, refreshing");
        let token = refresh().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }
}
