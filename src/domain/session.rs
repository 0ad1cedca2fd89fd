use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Settlement state as reported by the provider. Unknown states are kept
/// rather than rejected; only `Paid` terminates a session and triggers the
/// store callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Created,
    PaymentMethodChosen,
    Pending,
    Authorized,
    Paid,
    Failed,
    Canceled,
    Timeouted,
    Refunded,
    PartiallyRefunded,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub provider_transaction_id: String,
    pub store_transaction_id: String,
    pub status: SessionStatus,
}

/// Outcome of feeding a provider-reported status into the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// No live session for this provider id. Duplicate or stale
    /// notification; nothing to do.
    UnknownSession,
    /// Non-terminal status recorded in place.
    Updated(SessionStatus),
    /// Session reached PAID and was removed. Carries the store transaction
    /// id the callback must reference. Returned at most once per session.
    Settled { store_transaction_id: String },
}

/// In-memory table of live payment sessions, keyed by provider transaction
/// id. Shared across request handlers; the lock is never held across an
/// await.
#[derive(Default)]
pub struct SessionTable {
    inner: Mutex<HashMap<String, PaymentSession>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, provider_transaction_id: &str, store_transaction_id: &str) {
        let mut table = self.inner.lock().expect("session table poisoned");
        table.insert(
            provider_transaction_id.to_string(),
            PaymentSession {
                provider_transaction_id: provider_transaction_id.to_string(),
                store_transaction_id: store_transaction_id.to_string(),
                status: SessionStatus::Created,
            },
        );
    }

    /// Applies a provider-reported status. The PAID removal happens inside
    /// the lock, so two concurrent notifications for the same id can settle
    /// the session only once.
    pub fn reconcile(&self, provider_transaction_id: &str, status: SessionStatus) -> Reconciliation {
        let mut table = self.inner.lock().expect("session table poisoned");
        if status == SessionStatus::Paid {
            match table.remove(provider_transaction_id) {
                None => Reconciliation::UnknownSession,
                Some(session) => Reconciliation::Settled {
                    store_transaction_id: session.store_transaction_id,
                },
            }
        } else {
            match table.get_mut(provider_transaction_id) {
                None => Reconciliation::UnknownSession,
                Some(session) => {
                    session.status = status;
                    Reconciliation::Updated(status)
                }
            }
        }
    }

    pub fn get(&self, provider_transaction_id: &str) -> Option<PaymentSession> {
        let table = self.inner.lock().expect("session table poisoned");
        table.get(provider_transaction_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("session table poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
