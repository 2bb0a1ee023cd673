//! Name-keyed dispatch over the available ciphers.

use crate::des::Des;
use crate::errors::CipherError;
use crate::hill::HillCipher;

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A text-in, text-out cipher addressable by name.
pub trait Cipher: Send + Sync {
    /// Identifier the cipher is registered under.
    fn name(&self) -> &str;

    fn encryption(&self, message: &str, key: &str) -> Result<String, CipherError>;

    fn decryption(&self, message: &str, key: &str) -> Result<String, CipherError>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encryption,
    Decryption,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Encryption => "encryption",
            Operation::Decryption => "decryption",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encryption" => Ok(Operation::Encryption),
            "decryption" => Ok(Operation::Decryption),
            other => Err(CipherError::UnknownAlgorithmOrOperation {
                algorithm: String::new(),
                operation: other.to_string(),
            }),
        }
    }
}

lazy_static! {
    /// Registry holding `"des"` and `"hillCipher"` with their default parameters.
    pub static ref DEFAULT_REGISTRY: Registry = Registry::with_defaults();
}

/// Ciphers by name.
#[derive(Default)]
pub struct Registry {
    ciphers: BTreeMap<String, Box<dyn Cipher>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("ciphers", &self.names())
            .finish()
    }
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with [`Des`] and [`HillCipher`] under their default parameters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Des::default()));
        registry.register(Box::new(HillCipher::default()));
        registry
    }

    /// Adds `cipher` under its name, returning the cipher it replaces, if any.
    pub fn register(&mut self, cipher: Box<dyn Cipher>) -> Option<Box<dyn Cipher>> {
        self.ciphers.insert(cipher.name().to_string(), cipher)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Cipher> {
        self.ciphers.get(name).map(Box::as_ref)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.ciphers.keys().map(String::as_str).collect()
    }

    /// Runs `operation` (`"encryption"` or `"decryption"`) of the cipher named `algorithm`.
    ///
    /// # Errors
    ///
    /// `UnknownAlgorithmOrOperation` if either name is not known, otherwise whatever the cipher reports.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::registry::Registry;
    /// let registry = Registry::with_defaults();
    /// let ciphertext = registry.run("hillCipher", "hill", "help", "encryption").unwrap();
    /// assert_eq!(ciphertext, "aniq");
    /// assert!(registry.run("rot13", "", "help", "encryption").is_err());
    /// ```
    pub fn run(
        &self,
        algorithm: &str,
        key: &str,
        message: &str,
        operation: &str,
    ) -> Result<String, CipherError> {
        let unknown = || CipherError::UnknownAlgorithmOrOperation {
            algorithm: algorithm.to_string(),
            operation: operation.to_string(),
        };

        let cipher = self.get(algorithm).ok_or_else(unknown)?;
        let operation: Operation = operation.parse().map_err(|_| unknown())?;

        debug!(
            "{} {} of {} characters",
            algorithm,
            operation,
            message.chars().count()
        );

        match operation {
            Operation::Encryption => cipher.encryption(message, key),
            Operation::Decryption => cipher.decryption(message, key),
        }
    }
}
