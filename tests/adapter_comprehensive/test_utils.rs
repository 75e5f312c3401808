//! Shared helpers for the adapter suite

#![allow(dead_code)]

pub use deepbase::{json, path, DeepBase, DeepBaseConfig, DocPath, Error, MemoryStore, Value};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Route adapter logs to the test writer
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Connected adapter in namespace `test` over a fresh store
pub async fn test_db() -> DeepBase<MemoryStore> {
    named_db("test", MemoryStore::new()).await
}

/// Connected adapter in `name` over `store`
pub async fn named_db(name: &str, store: MemoryStore) -> DeepBase<MemoryStore> {
    init_tracing();
    let db = DeepBase::new(store, DeepBaseConfig::new().with_name(name)).unwrap();
    db.connect().await.unwrap();
    db
}

/// Fresh connected adapter sharing `db`'s documents
pub async fn reopen(db: &DeepBase<MemoryStore>) -> DeepBase<MemoryStore> {
    named_db(db.namespace(), db.store().handle()).await
}
