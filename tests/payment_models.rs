use store_gateway::domain::session::SessionStatus;
use store_gateway::repo::payment_models::{
    InMemoryModelStore, JsonFileModelStore, PaymentModel, PaymentModelStore,
};

fn model(id: &str) -> PaymentModel {
    PaymentModel {
        id: id.to_string(),
        store_transaction_id: "T1".to_string(),
        status: SessionStatus::Created,
        amount_minor: 10,
        currency: "USD".to_string(),
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn in_memory_store_round_trips() {
    let store = InMemoryModelStore::new();
    store.save(&model("3000006529")).unwrap();

    let loaded = store.get("3000006529").unwrap().unwrap();
    assert_eq!(loaded.store_transaction_id, "T1");
    assert!(store.get("other").unwrap().is_none());
}

#[test]
fn json_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");

    let store = JsonFileModelStore::open(path.clone()).unwrap();
    let mut m = model("3000006529");
    store.save(&m).unwrap();
    m.status = SessionStatus::Paid;
    store.save(&m).unwrap();
    drop(store);

    let reopened = JsonFileModelStore::open(path).unwrap();
    let loaded = reopened.get("3000006529").unwrap().unwrap();
    assert_eq!(loaded.status, SessionStatus::Paid);
    assert_eq!(loaded.amount_minor, 10);
}

#[test]
fn json_store_opens_without_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileModelStore::open(dir.path().join("missing.json")).unwrap();
    assert!(store.get("anything").unwrap().is_none());
}
