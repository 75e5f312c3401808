//! Adapter configuration
//!
//! Options are fixed at construction: build a [`DeepBaseConfig`] in code
//! with the `with_*` methods, or load one from a `deepbase.toml` file.
//! Fields missing from the file keep their defaults.

use deepbase_core::id::{AlphabetIdGenerator, DEFAULT_ID_ALPHABET, DEFAULT_ID_LENGTH};
use deepbase_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "deepbase.toml";

/// Default namespace
pub const DEFAULT_NAME: &str = "db";

/// Default store address
pub const DEFAULT_URL: &str = "redis://localhost:6379";

/// Characters a namespace may not contain: the key separator and SCAN glob syntax
const RESERVED_NAME_CHARS: &[char] = &[':', '*', '?', '[', ']', '\\'];

/// Adapter configuration
///
/// # Example
///
/// ```toml
/// # Namespace: documents are stored as "<name>:<key>"
/// name = "db"
///
/// # Store address
/// url = "redis://localhost:6379"
///
/// # Identifiers generated by add()
/// id_alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz"
/// id_length = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepBaseConfig {
    /// Namespace prefixed to every document key
    #[serde(default = "default_name")]
    pub name: String,
    /// Store connection address
    #[serde(default = "default_url")]
    pub url: String,
    /// Alphabet for generated identifiers
    #[serde(default = "default_id_alphabet")]
    pub id_alphabet: String,
    /// Length of generated identifiers
    #[serde(default = "default_id_length")]
    pub id_length: usize,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_id_alphabet() -> String {
    DEFAULT_ID_ALPHABET.to_string()
}

fn default_id_length() -> usize {
    DEFAULT_ID_LENGTH
}

impl Default for DeepBaseConfig {
    fn default() -> Self {
        DeepBaseConfig {
            name: default_name(),
            url: default_url(),
            id_alphabet: default_id_alphabet(),
            id_length: default_id_length(),
        }
    }
}

impl DeepBaseConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the store address
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the identifier alphabet
    pub fn with_id_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.id_alphabet = alphabet.into();
        self
    }

    /// Set the identifier length
    pub fn with_id_length(mut self, length: usize) -> Self {
        self.id_length = length;
        self
    }

    /// Check every field
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidConfig("name must not be empty".to_string()));
        }
        if let Some(c) = self.name.chars().find(|c| RESERVED_NAME_CHARS.contains(c)) {
            return Err(Error::InvalidConfig(format!(
                "name '{}' contains reserved character '{}'",
                self.name, c
            )));
        }
        if self.url.is_empty() {
            return Err(Error::InvalidConfig("url must not be empty".to_string()));
        }
        self.id_generator()?;
        Ok(())
    }

    /// Identifier generator described by this configuration
    pub fn id_generator(&self) -> Result<AlphabetIdGenerator> {
        AlphabetIdGenerator::new(&self.id_alphabet, self.id_length)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# DeepBase configuration
#
# Namespace: documents are stored as "<name>:<key>"
name = "db"

# Store address
url = "redis://localhost:6379"

# Identifiers generated by add(): alphabet and length
id_alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz"
id_length = 10
"#
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DeepBaseConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::SerializationError(msg) => Error::InvalidConfig(format!(
                "failed to parse config file '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::SerializationError(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
