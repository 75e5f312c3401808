//! In-process document store
//!
//! # Design
//!
//! - DashMap keyed by full storage key (`<namespace>:<name>`), one JSON
//!   document per entry
//! - Each call holds the entry guard for its document only, so calls are
//!   atomic per document and different documents never contend
//! - Handles: [`MemoryStore::handle`] opens another handle onto the same
//!   documents, with its own connect/disconnect lifecycle
//!
//! # Write Semantics
//!
//! Matches RedisJSON's legacy-path behavior:
//!
//! | Target | Document | Parent | Outcome |
//! |--------|----------|--------|---------|
//! | root | any | - | `Written` (creates/replaces) |
//! | field | absent | - | `MissingAncestor` |
//! | field | present | object | `Written` |
//! | field | present | absent or not an object | `MissingAncestor` |

use async_trait::async_trait;
use dashmap::DashMap;
use deepbase_core::{
    add_numbers, DocKey, DocumentStore, Error, FieldPath, IncrOutcome, ReadOutcome, Result,
    WriteOutcome,
};
use serde_json::{Map, Number, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Documents held in memory
///
/// # Example
///
/// ```
/// use deepbase_core::{DocKey, DocumentStore, FieldPath, ReadOutcome};
/// use deepbase_storage::MemoryStore;
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = MemoryStore::new();
/// store.connect().await.unwrap();
///
/// let key = DocKey::new("db", "config");
/// store.write(&key, &FieldPath::root(), &json!({"lang": "en"})).await.unwrap();
/// let lang = store.read(&key, &FieldPath::root().key("lang")).await.unwrap();
/// assert_eq!(lang, ReadOutcome::Found(json!("en")));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Arc<DashMap<String, Value>>,
    connected: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open another handle onto the same documents
    ///
    /// The new handle starts disconnected.
    pub fn handle(&self) -> Self {
        MemoryStore {
            docs: Arc::clone(&self.docs),
            connected: AtomicBool::new(false),
        }
    }

    /// Number of documents across all namespaces
    pub fn document_count(&self) -> usize {
        self.docs.len()
    }

    /// Check if this handle is connected
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }
}

// =============================================================================
// Path traversal
// =============================================================================

fn value_at<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match current {
            Value::Object(obj) => obj.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

fn value_at_mut<'a>(root: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match current {
            Value::Object(obj) => obj.get_mut(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Parent object of `path` and the last segment, when the parent exists
fn parent_object_mut<'a>(
    root: &'a mut Value,
    path: &'a FieldPath,
) -> Option<(&'a mut Map<String, Value>, &'a str)> {
    let field = path.last_segment()?;
    let parent = path.parent()?;
    let obj = value_at_mut(root, &parent)?.as_object_mut()?;
    Some((obj, field))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn connect(&self) -> Result<()> {
        self.connected.store(true, Ordering::Release);
        debug!(target: "deepbase::store", backend = "memory", "Connected");
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.connected.store(false, Ordering::Release);
        debug!(target: "deepbase::store", backend = "memory", "Disconnected");
        Ok(())
    }

    async fn write(&self, key: &DocKey, path: &FieldPath, value: &Value) -> Result<WriteOutcome> {
        self.ensure_connected()?;
        if path.is_root() {
            self.docs.insert(key.storage_key(), value.clone());
            return Ok(WriteOutcome::Written);
        }

        let mut doc = match self.docs.get_mut(&key.storage_key()) {
            Some(doc) => doc,
            None => return Ok(WriteOutcome::MissingAncestor),
        };
        match parent_object_mut(doc.value_mut(), path) {
            Some((obj, field)) => {
                obj.insert(field.to_string(), value.clone());
                Ok(WriteOutcome::Written)
            }
            None => Ok(WriteOutcome::MissingAncestor),
        }
    }

    async fn read(&self, key: &DocKey, path: &FieldPath) -> Result<ReadOutcome> {
        self.ensure_connected()?;
        let doc = match self.docs.get(&key.storage_key()) {
            Some(doc) => doc,
            None => return Ok(ReadOutcome::NotFound),
        };
        Ok(match value_at(doc.value(), path) {
            Some(v) => ReadOutcome::Found(v.clone()),
            None => ReadOutcome::NotFound,
        })
    }

    async fn delete(&self, key: &DocKey, path: &FieldPath) -> Result<u64> {
        self.ensure_connected()?;
        let storage_key = key.storage_key();
        if path.is_root() {
            return Ok(self.docs.remove(&storage_key).map_or(0, |_| 1));
        }

        let mut doc = match self.docs.get_mut(&storage_key) {
            Some(doc) => doc,
            None => return Ok(0),
        };
        let removed = parent_object_mut(doc.value_mut(), path)
            .and_then(|(obj, field)| obj.shift_remove(field));
        Ok(removed.map_or(0, |_| 1))
    }

    async fn remove_if_empty(&self, key: &DocKey) -> Result<bool> {
        self.ensure_connected()?;
        let removed = self.docs.remove_if(&key.storage_key(), |_, doc| {
            matches!(doc, Value::Object(obj) if obj.is_empty())
        });
        if removed.is_some() {
            debug!(target: "deepbase::store", backend = "memory", key = %key, "Removed empty document");
        }
        Ok(removed.is_some())
    }

    async fn increment_by(
        &self,
        key: &DocKey,
        path: &FieldPath,
        delta: &Number,
    ) -> Result<IncrOutcome> {
        self.ensure_connected()?;
        let mut doc = match self.docs.get_mut(&key.storage_key()) {
            Some(doc) => doc,
            None => return Ok(IncrOutcome::NotNumeric),
        };
        let target = match value_at_mut(doc.value_mut(), path) {
            Some(Value::Number(n)) => n,
            _ => return Ok(IncrOutcome::NotNumeric),
        };
        let sum = add_numbers(target, delta)
            .ok_or_else(|| Error::NumericOverflow(format!("{}/{}", key, path)))?;
        *target = sum.clone();
        Ok(IncrOutcome::Incremented(sum))
    }

    async fn scan_keys(&self, namespace: &str) -> Result<Vec<DocKey>> {
        self.ensure_connected()?;
        let mut keys: Vec<DocKey> = self
            .docs
            .iter()
            .filter_map(|entry| DocKey::parse_scanned(namespace, entry.key()))
            .collect();
        keys.sort();
        Ok(keys)
    }
}
