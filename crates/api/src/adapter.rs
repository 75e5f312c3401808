//! DeepBase - path-addressed document operations
//!
//! Every call takes a [`DocPath`]: the document key followed by field
//! segments. The adapter turns it into a namespaced [`DocKey`] plus a
//! [`FieldPath`] query and issues the matching store operation.
//!
//! ## Operations
//!
//! | Call | Store operations |
//! |------|------------------|
//! | `set(p, v)` | `write`, vivifying missing containers |
//! | `set(p, None)` / `del(p)` | `delete` |
//! | `get(p)` | `read` |
//! | `get_all()` | `scan_keys` + `read` per document |
//! | `upd(p, f)` | `read`, then `set` |
//! | `inc(p, n)` / `dec(p, n)` | `increment_by`, falling back to `upd` |
//! | `add(p, v)` | `set` at `p` + generated identifier |
//! | `del_all()` | `scan_keys` + `delete` per document |
//!
//! ## Auto-vivification
//!
//! Writing `user.a.b.c` into a document without `a` makes the store report
//! `MissingAncestor`. The adapter then writes `{}` at the parent (walking
//! further up as long as parents are missing) and retries the original
//! write. Each level is retried once; a write that still cannot land is
//! dropped with a warning.
//!
//! ## Concurrency
//!
//! Calls are independent and may run concurrently. `upd` and the `inc`
//! fallback read and then write without isolation: concurrent updates of
//! one path may lose all but the last write. Removing a document emptied by
//! `del` is a single atomic store call.

use deepbase_core::{
    add_numbers, negate_number, number_or_zero, DocKey, DocPath, DocumentStore, Error,
    FieldPath, IdGenerator, IncrOutcome, ReadOutcome, Result, WriteOutcome,
};
use serde_json::{Map, Number, Value};
use tracing::{debug, info, warn};

use crate::config::DeepBaseConfig;

/// Path-addressed client over a [`DocumentStore`]
///
/// ## Example
///
/// ```
/// use deepbase_api::{DeepBase, DeepBaseConfig};
/// use deepbase_core::{json, path};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let db = DeepBase::in_memory(DeepBaseConfig::new().with_name("demo")).unwrap();
/// db.connect().await.unwrap();
///
/// db.set(&path!["config", "lang"], json!("en")).await.unwrap();
/// assert_eq!(db.get(&path!["config", "lang"]).await.unwrap(), Some(json!("en")));
///
/// let user = db.add(&path!["user"], json!({"name": "martin"})).await.unwrap();
/// db.inc(&user.clone().key("count"), 1).await.unwrap();
/// db.inc(&user.clone().key("count"), 1).await.unwrap();
/// assert_eq!(db.get(&user.key("count")).await.unwrap(), Some(json!(2)));
/// # });
/// ```
pub struct DeepBase<S> {
    store: S,
    config: DeepBaseConfig,
    ids: Box<dyn IdGenerator>,
}

impl<S: DocumentStore> DeepBase<S> {
    /// Create an adapter over `store`
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` fails validation.
    pub fn new(store: S, config: DeepBaseConfig) -> Result<Self> {
        config.validate()?;
        let ids = config.id_generator()?;
        Ok(DeepBase {
            store,
            config,
            ids: Box::new(ids),
        })
    }

    /// Replace the identifier generator used by `add`
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Configuration this adapter was built with
    pub fn config(&self) -> &DeepBaseConfig {
        &self.config
    }

    /// Namespace of this adapter's documents
    pub fn namespace(&self) -> &str {
        &self.config.name
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn doc_key(&self, path: &DocPath) -> DocKey {
        DocKey::new(self.config.name.as_str(), path.doc())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Connect the underlying store
    pub async fn connect(&self) -> Result<()> {
        self.store.connect().await?;
        info!(target: "deepbase::adapter", namespace = %self.config.name, "Connected");
        Ok(())
    }

    /// Disconnect the underlying store
    pub async fn disconnect(&self) -> Result<()> {
        self.store.disconnect().await?;
        info!(target: "deepbase::adapter", namespace = %self.config.name, "Disconnected");
        Ok(())
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Set the value at `path`
    ///
    /// `None` deletes the value instead, exactly like [`DeepBase::del`].
    /// Missing containers along the path are created as empty objects.
    ///
    /// Returns `path`.
    pub async fn set(&self, path: &DocPath, value: impl Into<Option<Value>>) -> Result<DocPath> {
        path.validate()?;
        match value.into() {
            Some(value) => {
                let key = self.doc_key(path);
                self.write_vivified(&key, path.field(), &value).await?;
                Ok(path.clone())
            }
            None => self.del(path).await,
        }
    }

    async fn write_vivified(&self, key: &DocKey, field: &FieldPath, value: &Value) -> Result<()> {
        let empty = Value::Object(Map::new());
        // Paths still to write, target at the bottom; the flag marks entries
        // whose parent has already been created once
        let mut pending: Vec<(FieldPath, bool)> = vec![(field.clone(), false)];

        while let Some((current, retried)) = pending.last() {
            let payload = if pending.len() == 1 { value } else { &empty };
            let outcome = self.store.write(key, current, payload).await?;
            match outcome {
                WriteOutcome::Written => {
                    pending.pop();
                    if let Some(below) = pending.last_mut() {
                        below.1 = true;
                    }
                }
                WriteOutcome::MissingAncestor => {
                    let parent = match current.parent() {
                        Some(parent) if !*retried => parent,
                        _ => {
                            warn!(
                                target: "deepbase::adapter",
                                key = %key,
                                path = %current,
                                "Write still missing an ancestor after vivification; dropped"
                            );
                            return Ok(());
                        }
                    };
                    debug!(target: "deepbase::adapter", key = %key, path = %parent, "Creating missing container");
                    pending.push((parent, false));
                }
            }
        }
        Ok(())
    }

    /// Read-modify-write the value at `path`
    ///
    /// `f` receives the current value (`None` if absent); returning `None`
    /// deletes. Not atomic.
    pub async fn upd<F>(&self, path: &DocPath, f: F) -> Result<DocPath>
    where
        F: FnOnce(Option<Value>) -> Option<Value>,
    {
        self.try_upd(path, |current| Ok(f(current))).await
    }

    /// Like [`DeepBase::upd`] with a fallible transformation
    ///
    /// An error from `f` is returned and nothing is written.
    pub async fn try_upd<F>(&self, path: &DocPath, f: F) -> Result<DocPath>
    where
        F: FnOnce(Option<Value>) -> Result<Option<Value>>,
    {
        let current = self.get(path).await?;
        let next = f(current)?;
        self.set(path, next).await
    }

    /// Add `delta` to the number at `path`
    ///
    /// Uses the store's atomic increment when the path holds a number;
    /// otherwise reads, adds and writes back, counting a missing value as 0.
    ///
    /// Strings, booleans, arrays and objects are not coerced to 0 and
    /// overwritten, as a plain read-add-write would do: they are left in
    /// place and reported.
    ///
    /// # Errors
    ///
    /// `WrongType` if the path holds a value that is neither a number nor
    /// null.
    pub async fn inc(&self, path: &DocPath, delta: impl Into<Number>) -> Result<DocPath> {
        self.increment(path, delta.into()).await
    }

    /// Subtract `delta` from the number at `path`
    ///
    /// Same as [`DeepBase::inc`] with the delta negated.
    pub async fn dec(&self, path: &DocPath, delta: impl Into<Number>) -> Result<DocPath> {
        self.increment(path, negate_number(&delta.into())).await
    }

    async fn increment(&self, path: &DocPath, delta: Number) -> Result<DocPath> {
        path.validate()?;
        let key = self.doc_key(path);
        match self.store.increment_by(&key, path.field(), &delta).await? {
            IncrOutcome::Incremented(_) => Ok(path.clone()),
            IncrOutcome::NotNumeric => {
                debug!(target: "deepbase::adapter", key = %key, path = %path.field(), "No number to increment; updating instead");
                self.try_upd(path, |current| {
                    let base = number_or_zero(current.as_ref()).map_err(|found| Error::WrongType {
                        path: path.to_string(),
                        found,
                    })?;
                    let sum = add_numbers(&base, &delta)
                        .ok_or_else(|| Error::NumericOverflow(path.to_string()))?;
                    Ok(Some(Value::Number(sum)))
                })
                .await
            }
        }
    }

    /// File `value` under a fresh identifier below `prefix`
    ///
    /// Returns the full path, identifier included.
    pub async fn add(&self, prefix: &DocPath, value: Value) -> Result<DocPath> {
        let path = prefix.clone().key(self.ids.generate());
        self.set(&path, value).await
    }

    /// Store `value` as a new document under a generated key
    pub async fn add_document(&self, value: Value) -> Result<DocPath> {
        let path = DocPath::new(self.ids.generate());
        self.set(&path, value).await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Value at `path`, `None` if absent
    pub async fn get(&self, path: &DocPath) -> Result<Option<Value>> {
        path.validate()?;
        let key = self.doc_key(path);
        Ok(self.store.read(&key, path.field()).await?.into_option())
    }

    /// Every document in the namespace, keyed by document name
    pub async fn get_all(&self) -> Result<Map<String, Value>> {
        let mut snapshot = Map::new();
        for key in self.store.scan_keys(self.namespace()).await? {
            // A document deleted between scan and read is skipped
            if let ReadOutcome::Found(doc) = self.store.read(&key, &FieldPath::root()).await? {
                snapshot.insert(key.name().to_string(), doc);
            }
        }
        Ok(snapshot)
    }

    /// Property names of the object at `path`
    ///
    /// Arrays yield their indices as strings. Anything else yields an empty
    /// list.
    pub async fn keys(&self, path: &DocPath) -> Result<Vec<String>> {
        Ok(match self.get(path).await? {
            Some(Value::Object(obj)) => obj.keys().cloned().collect(),
            Some(Value::Array(arr)) => (0..arr.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        })
    }

    /// Property values of the object at `path`
    ///
    /// Arrays yield their elements. Anything else yields an empty list.
    pub async fn values(&self, path: &DocPath) -> Result<Vec<Value>> {
        Ok(match self.get(path).await? {
            Some(Value::Object(obj)) => obj.into_iter().map(|(_, v)| v).collect(),
            Some(Value::Array(arr)) => arr,
            _ => Vec::new(),
        })
    }

    // =========================================================================
    // Deletes
    // =========================================================================

    /// Delete the value at `path`; a bare document key deletes the document
    ///
    /// Deleting an absent path is a no-op. A document whose last field is
    /// deleted is removed as well.
    ///
    /// Returns `path`.
    pub async fn del(&self, path: &DocPath) -> Result<DocPath> {
        path.validate()?;
        let key = self.doc_key(path);
        let removed = self.store.delete(&key, path.field()).await?;
        if removed > 0 && !path.is_document() && self.store.remove_if_empty(&key).await? {
            debug!(target: "deepbase::adapter", key = %key, "Removed emptied document");
        }
        Ok(path.clone())
    }

    /// Delete every document in the namespace
    ///
    /// Returns the names of the deleted documents.
    pub async fn del_all(&self) -> Result<Vec<String>> {
        let keys = self.store.scan_keys(self.namespace()).await?;
        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            self.store.delete(&key, &FieldPath::root()).await?;
            removed.push(key.name().to_string());
        }
        info!(target: "deepbase::adapter", namespace = %self.config.name, count = removed.len(), "Deleted all documents");
        Ok(removed)
    }
}

impl DeepBase<deepbase_storage::MemoryStore> {
    /// Adapter over a fresh in-process store
    pub fn in_memory(config: DeepBaseConfig) -> Result<Self> {
        DeepBase::new(deepbase_storage::MemoryStore::new(), config)
    }
}

#[cfg(feature = "redis")]
impl DeepBase<deepbase_storage::RedisStore> {
    /// Adapter over RedisJSON at `config.url`
    ///
    /// Does not connect; call [`DeepBase::connect`] first.
    pub fn open(config: DeepBaseConfig) -> Result<Self> {
        config.validate()?;
        let store = deepbase_storage::RedisStore::open(&config.url)?;
        DeepBase::new(store, config)
    }
}
