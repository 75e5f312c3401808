//! Namespaced document keys
//!
//! Every document lives under `<namespace>:<name>` in the store. The
//! namespace prefix isolates adapters sharing one store from each other and
//! is what top-level scans match on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between namespace and document name
pub const NAMESPACE_SEPARATOR: char = ':';

/// Top-level key of one document
///
/// ```
/// use deepbase_core::DocKey;
///
/// let key = DocKey::new("db", "config");
/// assert_eq!(key.to_string(), "db:config");
/// assert_eq!(DocKey::parse_scanned("db", "db:config"), Some(key));
/// assert_eq!(DocKey::parse_scanned("db", "other:config"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocKey {
    namespace: String,
    name: String,
}

impl DocKey {
    /// Create a key for document `name` in `namespace`
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        DocKey {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Namespace part
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Document name as the caller addressed it
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full store key
    pub fn storage_key(&self) -> String {
        self.to_string()
    }

    /// Scan pattern matching every key in `namespace`
    pub fn scan_pattern(namespace: &str) -> String {
        format!("{}{}*", namespace, NAMESPACE_SEPARATOR)
    }

    /// Recover a key from a raw store key found by a scan
    ///
    /// Returns `None` for keys outside `namespace`.
    pub fn parse_scanned(namespace: &str, raw: &str) -> Option<DocKey> {
        let name = raw
            .strip_prefix(namespace)?
            .strip_prefix(NAMESPACE_SEPARATOR)?;
        Some(DocKey::new(namespace, name))
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.name)
    }
}
