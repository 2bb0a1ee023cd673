//! # Hill Cipher
//!
//! Polygraphic substitution: text is cut into `n`-symbol blocks, each block is a
//! vector over Z_m (m = alphabet size) and is multiplied by the `n x n` key matrix.
//! Decryption multiplies by the modular inverse of the key matrix.

use crate::errors::CipherError;
use crate::preset::alphabet::{Alphabet, PADDING_SYMBOL, STANDARD_ALPHABET, STANDARD_SYMBOLS};
use crate::registry::Cipher;
use crate::ring::inverse::{check_invertible, inverse};
use crate::ring::matrix_ops::matrix_vector_mul;
use crate::ring::{Matrix, Ring, Vector};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

/// Registry name of [`HillCipher`].
pub const NAME: &str = "hillCipher";

/// Configuration of a [`HillCipher`]. Defaults to the 27-symbol [`STANDARD_SYMBOLS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillParams {
    /// Symbols in index order; the alphabet size is the modulus.
    pub alphabet: String,
}

impl Default for HillParams {
    fn default() -> Self {
        HillParams {
            alphabet: STANDARD_SYMBOLS.to_string(),
        }
    }
}

impl HillParams {
    /// Reads parameters from JSON; a missing alphabet takes the default.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::hill::HillParams;
    /// let params = HillParams::from_json(r#"{"alphabet":"01 "}"#).unwrap();
    /// assert_eq!(params.alphabet, "01 ");
    /// assert_eq!(HillParams::from_json("{}").unwrap(), HillParams::default());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CipherError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::hill::HillParams;
    /// let json = HillParams::default().to_json().unwrap();
    /// assert_eq!(json, r#"{"alphabet":"abcdefghijklmnopqrstuvwxyz "}"#);
    /// ```
    pub fn to_json(&self) -> Result<String, CipherError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Hill cipher over an [`Alphabet`]; all arithmetic is modulo the alphabet size.
#[derive(Debug, Clone)]
pub struct HillCipher {
    alphabet: Alphabet,
    ring: Ring,
}

impl Default for HillCipher {
    fn default() -> Self {
        HillCipher {
            alphabet: STANDARD_ALPHABET.clone(),
            ring: Ring {
                modulus: STANDARD_ALPHABET.len() as u64,
            },
        }
    }
}

impl HillCipher {
    /// Builds a cipher over the configured alphabet; its size becomes the modulus.
    ///
    /// # Errors
    ///
    /// Whatever [`Alphabet::try_with`] rejects: duplicate or uppercase symbols,
    /// fewer than two symbols, or no [`PADDING_SYMBOL`].
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::hill::{HillCipher, HillParams};
    /// let params = HillParams { alphabet: "abcdefghijklmnopqrstuvwxy ".to_string() };
    /// let hill = HillCipher::try_with(&params).unwrap();
    /// assert_eq!(hill.ring().modulus(), 26);
    ///
    /// let params = HillParams { alphabet: "aab ".to_string() };
    /// assert!(HillCipher::try_with(&params).is_err());
    /// ```
    pub fn try_with(params: &HillParams) -> Result<Self, CipherError> {
        let alphabet = Alphabet::try_with(&params.alphabet)?;
        let ring = alphabet.ring()?;
        Ok(HillCipher { alphabet, ring })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Lowercases `text`, right-pads it with spaces to a multiple of `block_size`
    /// and maps every `block_size` characters to a vector of alphabet indices.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::hill::HillCipher;
    /// let hill = HillCipher::default();
    /// assert_eq!(hill.encode("Hey", 2).unwrap(), vec![vec![7, 4], vec![24, 26]]);
    /// ```
    pub fn encode(&self, text: &str, block_size: usize) -> Result<Vec<Vector>, CipherError> {
        if block_size == 0 {
            return Err(CipherError::InvalidParameters(
                "block size must be positive".to_string(),
            ));
        }

        let mut indices = text
            .to_lowercase()
            .chars()
            .map(|c| self.alphabet.index_of(c))
            .collect::<Result<Vector, CipherError>>()?;

        let padding = self.alphabet.index_of(PADDING_SYMBOL)?;
        while indices.len() % block_size != 0 {
            indices.push(padding);
        }

        Ok(indices.chunks(block_size).map(<[i64]>::to_vec).collect())
    }

    /// Maps index vectors back to text.
    pub fn decode(&self, rows: &[Vector]) -> Result<String, CipherError> {
        rows.iter()
            .flatten()
            .map(|&index| self.alphabet.symbol_at(index))
            .collect()
    }

    /// Builds the `n x n` key matrix, `n = floor(sqrt(key length))`.
    ///
    /// # Errors
    ///
    /// * `MalformedInput` for an empty key or symbols outside the alphabet,
    /// * `InvalidMatrixShape` if the key length is not a perfect square,
    /// * `NotInvertible` if the key matrix has a zero on its diagonal.
    pub fn derive_key_matrix(&self, key: &str) -> Result<Matrix, CipherError> {
        let length = key.chars().count();
        if length == 0 {
            return Err(CipherError::MalformedInput(
                "Hill key must not be empty".to_string(),
            ));
        }

        let matrix = self.encode(key, length.isqrt())?;
        check_invertible(&matrix)?;

        debug!(
            "Hill key matrix: [{}]",
            matrix.iter().map(|row| row.iter().join(" ")).join("; ")
        );
        Ok(matrix)
    }

    /// `c = K * p mod m` for every block `p` of the plaintext.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::hill::HillCipher;
    /// let hill = HillCipher::default();
    /// assert_eq!(hill.encryption("help", "hill").unwrap(), "aniq");
    /// assert_eq!(hill.decryption("aniq", "hill").unwrap(), "help");
    /// ```
    pub fn encryption(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        let key_matrix = self.derive_key_matrix(key)?;
        self.transform(&key_matrix, plaintext)
    }

    /// `p = K^-1 * c mod m` for every block `c` of the ciphertext.
    ///
    /// Fails with `NoModularInverse` when the key's determinant shares a factor with `m`.
    /// Keys of 81 or more symbols encrypt, but their matrix is too large to invert
    /// and decryption fails with `InvalidMatrixShape`.
    pub fn decryption(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let key_matrix = self.derive_key_matrix(key)?;
        let inverse_matrix = inverse(&key_matrix, &self.ring)?;
        self.transform(&inverse_matrix, ciphertext)
    }

    fn transform(&self, matrix: &Matrix, text: &str) -> Result<String, CipherError> {
        let rows = self
            .encode(text, matrix.len())?
            .iter()
            .map(|block| matrix_vector_mul(matrix, block, &self.ring))
            .collect::<Result<Vec<Vector>, CipherError>>()?;

        self.decode(&rows)
    }
}

impl Cipher for HillCipher {
    fn name(&self) -> &str {
        NAME
    }

    fn encryption(&self, message: &str, key: &str) -> Result<String, CipherError> {
        HillCipher::encryption(self, message, key)
    }

    fn decryption(&self, message: &str, key: &str) -> Result<String, CipherError> {
        HillCipher::decryption(self, message, key)
    }
}
