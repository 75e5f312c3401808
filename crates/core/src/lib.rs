//! Core types and traits for DeepBase
//!
//! This crate defines the foundational types used throughout the system:
//! - DocKey: Namespaced top-level document key (`<namespace>:<key>`)
//! - FieldPath / DocPath: Segment paths into a document and their path queries
//! - Number arithmetic shared by increments and their fallbacks
//! - IdGenerator: Random identifiers for appended entries
//! - Error: Error type hierarchy
//! - Traits: The DocumentStore contract and its explicit outcome types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod id;
pub mod json;
pub mod key;
pub mod path;
pub mod traits;

pub use error::{Error, Result};
pub use id::{AlphabetIdGenerator, IdGenerator, DEFAULT_ID_ALPHABET, DEFAULT_ID_LENGTH};
pub use json::{add_numbers, negate_number, number_or_zero};
pub use key::DocKey;
pub use path::{DocPath, FieldPath, MAX_PATH_LENGTH, ROOT_QUERY, SEPARATOR};
pub use traits::{DocumentStore, IncrOutcome, ReadOutcome, WriteOutcome};

/// Re-exported so callers can build values without a direct serde_json dependency
pub use serde_json::{json, Map, Number, Value};
