//! Random identifiers for appended entries
//!
//! `add` files a value under a fresh identifier segment. Identifiers are
//! fixed-length strings over a fixed alphabet; with the defaults (52 letters,
//! length 10) there are 52^10 ≈ 1.4e17 of them, and collisions are not
//! checked.

use crate::error::{Error, Result};
use rand::Rng;

/// Default identifier alphabet: ASCII upper- and lowercase letters
pub const DEFAULT_ID_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default identifier length
pub const DEFAULT_ID_LENGTH: usize = 10;

/// Source of identifier segments
pub trait IdGenerator: Send + Sync {
    /// Produce a new identifier
    fn generate(&self) -> String;
}

/// Uniform random identifiers over an alphabet
#[derive(Debug, Clone)]
pub struct AlphabetIdGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl AlphabetIdGenerator {
    /// Create a generator
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the alphabet is empty, contains the path separator,
    /// or `length` is zero.
    pub fn new(alphabet: &str, length: usize) -> Result<Self> {
        let mut chars: Vec<char> = alphabet.chars().collect();
        chars.sort_unstable();
        chars.dedup();
        if chars.is_empty() {
            return Err(Error::InvalidConfig(
                "identifier alphabet must not be empty".to_string(),
            ));
        }
        if chars.contains(&crate::path::SEPARATOR) {
            return Err(Error::InvalidConfig(format!(
                "identifier alphabet must not contain '{}'",
                crate::path::SEPARATOR
            )));
        }
        if length == 0 {
            return Err(Error::InvalidConfig(
                "identifier length must be greater than zero".to_string(),
            ));
        }
        Ok(AlphabetIdGenerator {
            alphabet: chars,
            length,
        })
    }

    /// Identifier length
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for AlphabetIdGenerator {
    fn default() -> Self {
        AlphabetIdGenerator {
            alphabet: DEFAULT_ID_ALPHABET.chars().collect(),
            length: DEFAULT_ID_LENGTH,
        }
    }
}

impl IdGenerator for AlphabetIdGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())])
            .collect()
    }
}
