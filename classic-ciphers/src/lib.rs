//! Classical education-grade ciphers: DES with a chained-block mode and the Hill
//! cipher, selectable by name through a [`Registry`].
//!
//! ```
//! # use classic_ciphers::run_algorithm;
//! let ciphertext = run_algorithm("des", "haytham", "haythams", "encryption").unwrap();
//! let plaintext = run_algorithm("des", "haytham", &ciphertext, "decryption").unwrap();
//! assert_eq!(plaintext, "haythams");
//! ```

pub mod bits;
pub mod des;
pub mod errors;
pub mod hill;
pub mod preset;
pub mod registry;
pub mod ring;

pub use errors::CipherError;
pub use registry::{Cipher, DEFAULT_REGISTRY, Operation, Registry};

/// Runs `operation` of `algorithm` on the default registry.
pub fn run_algorithm(
    algorithm: &str,
    key: &str,
    message: &str,
    operation: &str,
) -> Result<String, CipherError> {
    DEFAULT_REGISTRY.run(algorithm, key, message, operation)
}
