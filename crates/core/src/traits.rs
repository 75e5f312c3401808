//! The document store contract
//!
//! This module defines the [`DocumentStore`] trait that lets the adapter run
//! against any JSON-capable key-value store (RedisJSON, the in-process
//! `MemoryStore`, ...).
//!
//! ## Outcomes vs Errors
//!
//! Shape mismatches the adapter knows how to resolve come back as `Ok`
//! outcomes, so the adapter branches on them explicitly:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | Read at an absent path | `Ok(ReadOutcome::NotFound)` |
//! | Write below a missing container | `Ok(WriteOutcome::MissingAncestor)` |
//! | Increment of an absent or non-numeric value | `Ok(IncrOutcome::NotNumeric)` |
//! | Transport failure | `Err(Error::StoreUnavailable)` |
//! | Command refused by the store | `Err(Error::StoreRejected)` |
//! | Used before `connect` | `Err(Error::NotConnected)` |

use async_trait::async_trait;
use serde_json::{Number, Value};

use crate::error::Result;
use crate::key::DocKey;
use crate::path::FieldPath;

/// Result of a path-scoped write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was stored
    Written,
    /// A container on the way to the target does not exist
    MissingAncestor,
}

/// Result of a path-scoped read
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// Value at the path
    Found(Value),
    /// Document or path absent
    NotFound,
}

impl ReadOutcome {
    /// Convert into an `Option`
    pub fn into_option(self) -> Option<Value> {
        match self {
            ReadOutcome::Found(v) => Some(v),
            ReadOutcome::NotFound => None,
        }
    }
}

/// Result of an atomic increment
#[derive(Debug, Clone, PartialEq)]
pub enum IncrOutcome {
    /// New value after the increment
    Incremented(Number),
    /// The target is absent or not a number
    NotNumeric,
}

/// A JSON document store addressed by document key and field path
///
/// Thread safety: all methods may be called concurrently (requires
/// Send + Sync). Stores apply each call atomically but give no isolation
/// across calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open the connection
    async fn connect(&self) -> Result<()>;

    /// Close the connection
    async fn disconnect(&self) -> Result<()>;

    /// Write `value` at `path` inside document `key`
    ///
    /// A root write creates or replaces the document. A non-root write
    /// requires the parent container to exist as an object.
    async fn write(&self, key: &DocKey, path: &FieldPath, value: &Value) -> Result<WriteOutcome>;

    /// Read the value at `path` inside document `key`
    async fn read(&self, key: &DocKey, path: &FieldPath) -> Result<ReadOutcome>;

    /// Delete the value at `path`; a root path deletes the document
    ///
    /// Returns the number of values removed (0 when absent).
    async fn delete(&self, key: &DocKey, path: &FieldPath) -> Result<u64>;

    /// Delete document `key` if its root is an empty object
    ///
    /// Check and delete happen as one atomic step, so a write landing
    /// concurrently is never lost. Returns whether the document was removed.
    async fn remove_if_empty(&self, key: &DocKey) -> Result<bool>;

    /// Atomically add `delta` to the number at `path`
    async fn increment_by(
        &self,
        key: &DocKey,
        path: &FieldPath,
        delta: &Number,
    ) -> Result<IncrOutcome>;

    /// List every document key in `namespace`
    async fn scan_keys(&self, namespace: &str) -> Result<Vec<DocKey>>;
}
