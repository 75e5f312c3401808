//! DeepBase - path-addressed JSON documents
//!
//! DeepBase reads and writes values deep inside JSON documents held by a
//! document store. Paths name the document and then the fields inside it;
//! containers missing along a path are created on write.
//!
//! # Quick Start
//!
//! ```
//! use deepbase::{json, path, DeepBase, DeepBaseConfig};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! // In-process store; enable the `redis` feature for RedisJSON
//! let db = DeepBase::in_memory(DeepBaseConfig::new().with_name("app")).unwrap();
//! db.connect().await.unwrap();
//!
//! db.set(&path!["config", "lang"], json!("EN")).await.unwrap();
//! let user = db.add(&path!["user"], json!({"name": "martin"})).await.unwrap();
//! db.inc(&user.clone().key("visits"), 1).await.unwrap();
//!
//! assert_eq!(db.get(&user.key("visits")).await.unwrap(), Some(json!(1)));
//! # });
//! ```
//!
//! # Architecture
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `deepbase-core` | paths, keys, errors, the [`DocumentStore`] trait |
//! | `deepbase-storage` | [`MemoryStore`] and, with `redis`, `RedisStore` |
//! | `deepbase-api` | [`DeepBase`] and [`DeepBaseConfig`] |

pub use deepbase_api::{DeepBase, DeepBaseConfig, CONFIG_FILE_NAME, DEFAULT_NAME, DEFAULT_URL};
pub use deepbase_core::{
    json, path, AlphabetIdGenerator, DocKey, DocPath, DocumentStore, Error, FieldPath,
    IdGenerator, IncrOutcome, Map, Number, ReadOutcome, Result, Value, WriteOutcome,
};
pub use deepbase_storage::MemoryStore;

#[cfg(feature = "redis")]
pub use deepbase_storage::RedisStore;
