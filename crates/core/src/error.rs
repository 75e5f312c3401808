//! Error types for DeepBase
//!
//! Only failures the caller can act on are errors. Absent read targets,
//! missing ancestors and non-numeric increments are store *outcomes*
//! (see [`crate::traits`]) and are resolved inside the adapter.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for DeepBase operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for DeepBase
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config files, local resources)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The document store could not be reached or failed in transit
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store refused a command (unknown command, permissions, limits)
    #[error("Store rejected command: {0}")]
    StoreRejected(String),

    /// The store was used outside its connect/disconnect window
    #[error("Store is not connected")]
    NotConnected,

    /// A path violates the segment rules
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A numeric operation met a value of another type
    #[error("Wrong type at {path}: expected number, found {found}")]
    WrongType {
        /// Path of the offending value
        path: String,
        /// JSON type name of the value found
        found: &'static str,
    },

    /// Arithmetic result not representable as a JSON number
    #[error("Numeric overflow at {0}")]
    NumericOverflow(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
