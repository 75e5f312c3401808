//! Public API layer for DeepBase
//!
//! [`DeepBase`] addresses values inside JSON documents by path. The first
//! path segment names the document, the rest walk into it:
//!
//! ```text
//! path!["user", "u1", "name"]   ->   document "db:user", field .u1.name
//! ```
//!
//! ## Module Structure
//!
//! - `adapter`: the [`DeepBase`] client and its operations
//! - `config`: [`DeepBaseConfig`], built in code or loaded from TOML
//!
//! ## Quick Start
//!
//! ```
//! use deepbase_api::{DeepBase, DeepBaseConfig};
//! use deepbase_core::{json, path};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let db = DeepBase::in_memory(DeepBaseConfig::default()).unwrap();
//! db.connect().await.unwrap();
//!
//! db.set(&path!["config", "lang"], json!("EN")).await.unwrap();
//! assert_eq!(db.keys(&path!["config"]).await.unwrap(), vec!["lang"]);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod config;

pub use adapter::DeepBase;
pub use config::{DeepBaseConfig, CONFIG_FILE_NAME, DEFAULT_NAME, DEFAULT_URL};
