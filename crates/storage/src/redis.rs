//! RedisJSON document store
//!
//! Talks to a Redis server with the RedisJSON module loaded, using legacy
//! (dot) path syntax so replies carry single values rather than arrays.
//!
//! | Operation | Command |
//! |-----------|---------|
//! | write | `JSON.SET <key> <path> <json>` |
//! | read | `JSON.GET <key> <path>` |
//! | delete | `JSON.DEL <key> <path>` |
//! | increment_by | `JSON.NUMINCRBY <key> <path> <delta>` |
//! | remove_if_empty | `EVAL` of `JSON.OBJLEN` + `DEL` |
//! | scan_keys | `SCAN <cursor> MATCH <ns>:* COUNT 1000 TYPE ReJSON-RL` |
//!
//! Only the error replies that describe a missing path ("does not exist",
//! "new objects must be created at the root", "wrong static path") or, for
//! increments, a non-numeric target become outcomes. Every other server
//! error (unknown command, NOPERM, OOM, nesting limits) is `StoreRejected`;
//! I/O failures and dropped connections are `StoreUnavailable`.

use async_trait::async_trait;
use deepbase_core::{
    DocKey, DocumentStore, Error, FieldPath, IncrOutcome, ReadOutcome, Result, WriteOutcome,
};
use parking_lot::RwLock;
use ::redis::aio::MultiplexedConnection;
use ::redis::{Client, ErrorKind, RedisError, RedisResult};
use serde_json::{Number, Value};
use tracing::{debug, info};

/// Keys requested per SCAN round trip
pub const SCAN_COUNT: usize = 1000;

/// Redis type name of RedisJSON documents
pub const JSON_TYPE: &str = "ReJSON-RL";

/// Reply texts reporting that the addressed path or one of its parents is absent
const MISSING_PATH_REPLIES: &[&str] = &[
    "does not exist",
    "new objects must be created at the root",
    "wrong static path",
];

/// Reply texts reporting that an increment target is not a number
const NOT_NUMERIC_REPLIES: &[&str] = &["expected a number"];

/// Deletes the document only while its root is `{}`; runs atomically on the server
const REMOVE_IF_EMPTY_SCRIPT: &str = r#"
local len = redis.pcall('JSON.OBJLEN', KEYS[1], '.')
if len == 0 then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;

/// RedisJSON-backed store
///
/// Holds one multiplexed connection between `connect` and `disconnect`.
/// The connection is cloned per call, so calls run concurrently over it.
pub struct RedisStore {
    client: Client,
    conn: RwLock<Option<MultiplexedConnection>>,
}

impl RedisStore {
    /// Create a store for `url` (e.g. `redis://localhost:6379`)
    ///
    /// Does not connect; call [`DocumentStore::connect`] first.
    pub fn open(url: &str) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| Error::InvalidConfig(format!("invalid store url '{}': {}", url, e)))?;
        Ok(RedisStore {
            client,
            conn: RwLock::new(None),
        })
    }

    fn connection(&self) -> Result<MultiplexedConnection> {
        self.conn.read().clone().ok_or(Error::NotConnected)
    }
}

/// Replies the server produced on purpose, as opposed to transport failures
fn is_reply_error(e: &RedisError) -> bool {
    matches!(
        e.kind(),
        ErrorKind::ResponseError
            | ErrorKind::ExtensionError
            | ErrorKind::TypeError
            | ErrorKind::ReadOnly
    )
}

fn transport(e: RedisError) -> Error {
    Error::StoreUnavailable(e.to_string())
}

fn reply_mentions(e: &RedisError, texts: &[&str]) -> bool {
    let message = e.to_string().to_lowercase();
    texts.iter().any(|text| message.contains(text))
}

/// Split a reply into a value, an expected outcome (`Ok(None)`) or an error
///
/// Only reply errors whose text matches one of `expected` become `Ok(None)`.
fn classify<T>(reply: RedisResult<T>, expected: &[&[&str]]) -> Result<Option<T>> {
    match reply {
        Ok(v) => Ok(Some(v)),
        Err(e) if is_reply_error(&e) && expected.iter().any(|texts| reply_mentions(&e, texts)) => {
            debug!(target: "deepbase::store", error = %e, "Store reported absent or mistyped path");
            Ok(None)
        }
        Err(e) if is_reply_error(&e) => Err(Error::StoreRejected(e.to_string())),
        Err(e) => Err(transport(e)),
    }
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn connect(&self) -> Result<()> {
        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(transport)?;
        *self.conn.write() = Some(conn);
        info!(target: "deepbase::store", backend = "redis", "Connected");
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        let previous = self.conn.write().take();
        if previous.is_some() {
            info!(target: "deepbase::store", backend = "redis", "Disconnected");
        }
        Ok(())
    }

    async fn write(&self, key: &DocKey, path: &FieldPath, value: &Value) -> Result<WriteOutcome> {
        let mut conn = self.connection()?;
        let payload = serde_json::to_string(value)?;
        let reply: RedisResult<Option<String>> = ::redis::cmd("JSON.SET")
            .arg(key.storage_key())
            .arg(path.to_query())
            .arg(payload)
            .query_async(&mut conn)
            .await;
        Ok(match classify(reply, &[MISSING_PATH_REPLIES])? {
            Some(Some(_)) => WriteOutcome::Written,
            // nil reply: the parent path does not exist
            Some(None) | None => WriteOutcome::MissingAncestor,
        })
    }

    async fn read(&self, key: &DocKey, path: &FieldPath) -> Result<ReadOutcome> {
        let mut conn = self.connection()?;
        let reply: RedisResult<Option<String>> = ::redis::cmd("JSON.GET")
            .arg(key.storage_key())
            .arg(path.to_query())
            .query_async(&mut conn)
            .await;
        match classify(reply, &[MISSING_PATH_REPLIES])? {
            Some(Some(raw)) => Ok(ReadOutcome::Found(serde_json::from_str(&raw)?)),
            Some(None) | None => Ok(ReadOutcome::NotFound),
        }
    }

    async fn delete(&self, key: &DocKey, path: &FieldPath) -> Result<u64> {
        let mut conn = self.connection()?;
        let reply: RedisResult<u64> = ::redis::cmd("JSON.DEL")
            .arg(key.storage_key())
            .arg(path.to_query())
            .query_async(&mut conn)
            .await;
        Ok(classify(reply, &[MISSING_PATH_REPLIES])?.unwrap_or(0))
    }

    async fn remove_if_empty(&self, key: &DocKey) -> Result<bool> {
        let mut conn = self.connection()?;
        let reply: RedisResult<u64> = ::redis::cmd("EVAL")
            .arg(REMOVE_IF_EMPTY_SCRIPT)
            .arg(1)
            .arg(key.storage_key())
            .query_async(&mut conn)
            .await;
        Ok(classify(reply, &[])?.unwrap_or(0) > 0)
    }

    async fn increment_by(
        &self,
        key: &DocKey,
        path: &FieldPath,
        delta: &Number,
    ) -> Result<IncrOutcome> {
        let mut conn = self.connection()?;
        let reply: RedisResult<Option<String>> = ::redis::cmd("JSON.NUMINCRBY")
            .arg(key.storage_key())
            .arg(path.to_query())
            .arg(delta.to_string())
            .query_async(&mut conn)
            .await;
        match classify(reply, &[MISSING_PATH_REPLIES, NOT_NUMERIC_REPLIES])? {
            Some(Some(raw)) => Ok(IncrOutcome::Incremented(serde_json::from_str(&raw)?)),
            Some(None) | None => Ok(IncrOutcome::NotNumeric),
        }
    }

    async fn scan_keys(&self, namespace: &str) -> Result<Vec<DocKey>> {
        let mut conn = self.connection()?;
        let pattern = DocKey::scan_pattern(namespace);
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = ::redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .arg("TYPE")
                .arg(JSON_TYPE)
                .query_async(&mut conn)
                .await
                .map_err(transport)?;
            keys.extend(
                batch
                    .iter()
                    .filter_map(|raw| DocKey::parse_scanned(namespace, raw)),
            );
            if next == 0 {
                break;
            }
            cursor = next;
        }
        // SCAN may return a key more than once
        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}
