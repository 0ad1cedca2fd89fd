use crate::domain::session::SessionStatus;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Persisted view of a payment, keyed by the provider transaction id.
/// Best-effort: the gateway keeps working when saves fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentModel {
    pub id: String,
    pub store_transaction_id: String,
    pub status: SessionStatus,
    pub amount_minor: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

pub trait PaymentModelStore: Send + Sync {
    fn save(&self, model: &PaymentModel) -> Result<()>;
    fn get(&self, provider_transaction_id: &str) -> Result<Option<PaymentModel>>;
}

#[derive(Default)]
pub struct InMemoryModelStore {
    models: Mutex<HashMap<String, PaymentModel>>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentModelStore for InMemoryModelStore {
    fn save(&self, model: &PaymentModel) -> Result<()> {
        let mut models = self.models.lock().expect("model store poisoned");
        models.insert(model.id.clone(), model.clone());
        Ok(())
    }

    fn get(&self, provider_transaction_id: &str) -> Result<Option<PaymentModel>> {
        let models = self.models.lock().expect("model store poisoned");
        Ok(models.get(provider_transaction_id).cloned())
    }
}

/// Single-file JSON store: loads the file once at open, rewrites the whole
/// file on every save.
pub struct JsonFileModelStore {
    path: PathBuf,
    models: Mutex<HashMap<String, PaymentModel>>,
}

impl JsonFileModelStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let models = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            models: Mutex::new(models),
        })
    }
}

impl PaymentModelStore for JsonFileModelStore {
    fn save(&self, model: &PaymentModel) -> Result<()> {
        let mut models = self.models.lock().expect("model store poisoned");
        models.insert(model.id.clone(), model.clone());
        let raw = serde_json::to_string(&*models)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn get(&self, provider_transaction_id: &str) -> Result<Option<PaymentModel>> {
        let models = self.models.lock().expect("model store poisoned");
        Ok(models.get(provider_transaction_id).cloned())
    }
}
