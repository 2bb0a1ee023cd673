//! # DES Module
//!
//! DES block function with a chained (CBC) mode over text.
//!
//! Ciphertext is the textual `'0'`/`'1'` rendering of the IV followed by one
//! 64-bit cipher block per plaintext block. The last plaintext block is padded
//! with zero bits, so decrypted text may end in `'\0'` characters.
//!
//! [`DesParams::sbox_width`] selects how S-box outputs are written. The default
//! of four digits is standard DES. Zero writes them without leading zeros, as
//! the browser demo this cipher is paired with does, and reproduces its vectors.

pub mod block;
pub mod key_schedule;
pub mod round;

use crate::bits::BinaryString;
use crate::errors::CipherError;
use crate::registry::Cipher;
use block::{BLOCK_BITS, feistel};
use key_schedule::{KEY_BITS, SubKeys};
use round::SBOX_OUTPUT_BITS;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Registry name of [`Des`].
pub const NAME: &str = "des";

/// IV used when none is configured.
pub const DEFAULT_IV: &str = "abcdefgh";

/// Configuration of the chained mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesParams {
    /// Eight characters whose bits seed the chain.
    pub iv: String,
    /// Minimum number of binary digits per S-box output, at most [`SBOX_OUTPUT_BITS`].
    pub sbox_width: usize,
}

impl Default for DesParams {
    fn default() -> Self {
        DesParams {
            iv: DEFAULT_IV.to_string(),
            sbox_width: SBOX_OUTPUT_BITS,
        }
    }
}

impl DesParams {
    /// Reads parameters from JSON; missing fields take their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::des::DesParams;
    /// let params = DesParams::from_json(r#"{"iv":"12345678"}"#).unwrap();
    /// assert_eq!(params.iv, "12345678");
    /// assert_eq!(params.sbox_width, 4);
    /// assert_eq!(DesParams::from_json("{}").unwrap(), DesParams::default());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CipherError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::des::DesParams;
    /// let json = DesParams::default().to_json().unwrap();
    /// assert_eq!(json, r#"{"iv":"abcdefgh","sbox_width":4}"#);
    /// ```
    pub fn to_json(&self) -> Result<String, CipherError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// DES in CBC mode over text messages and text keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Des {
    iv: BinaryString,
    sbox_width: usize,
}

impl Default for Des {
    fn default() -> Self {
        Des {
            iv: BinaryString::from_bytes(DEFAULT_IV.as_bytes()),
            sbox_width: SBOX_OUTPUT_BITS,
        }
    }
}

impl Des {
    /// Validates `params`: the IV must encode to exactly one block and the
    /// S-box width must not exceed [`SBOX_OUTPUT_BITS`].
    pub fn try_with(params: &DesParams) -> Result<Self, CipherError> {
        let iv = BinaryString::from_text(&params.iv)
            .map_err(|e| CipherError::InvalidParameters(format!("IV: {}", e)))?;

        if iv.len() != BLOCK_BITS {
            return Err(CipherError::InvalidParameters(format!(
                "IV must encode to {} bits ({} characters), got {} bits",
                BLOCK_BITS,
                BLOCK_BITS / 8,
                iv.len()
            )));
        }

        if params.sbox_width > SBOX_OUTPUT_BITS {
            return Err(CipherError::InvalidParameters(format!(
                "S-box width must be at most {}, got {}",
                SBOX_OUTPUT_BITS, params.sbox_width
            )));
        }

        Ok(Des {
            iv,
            sbox_width: params.sbox_width,
        })
    }

    /// The IV, which is also the first block of every ciphertext.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::des::Des;
    /// let des = Des::default();
    /// let ciphertext = des.encryption("", "key").unwrap();
    /// assert_eq!(des.iv().to_string(), ciphertext);
    /// assert_eq!(des.iv().to_text(), "abcdefgh");
    /// ```
    pub fn iv(&self) -> &BinaryString {
        &self.iv
    }

    /// Minimum digits per S-box output; see [`round::round`].
    pub fn sbox_width(&self) -> usize {
        self.sbox_width
    }

    /// Derives the round keys from key text, right-padded with zero bits or truncated to 64 bits.
    pub fn sub_keys(key: &str) -> Result<SubKeys, CipherError> {
        let key_bits = BinaryString::from_text(key)?;
        if key_bits.len() != KEY_BITS {
            debug!("fitting a {}-bit DES key to {} bits", key_bits.len(), KEY_BITS);
        }
        SubKeys::derive(&key_bits.fit_to(KEY_BITS))
    }

    /// Encrypts `plaintext` into the IV followed by the cipher blocks, as `'0'`/`'1'` text.
    ///
    /// # Errors
    ///
    /// `MalformedInput` for characters above U+00FF in the plaintext or the key.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::des::Des;
    /// let des = Des::default();
    /// let ciphertext = des.encryption("haythams", "haytham").unwrap();
    /// assert_eq!(ciphertext.len(), 128);
    /// assert_eq!(des.decryption(&ciphertext, "haytham").unwrap(), "haythams");
    /// ```
    pub fn encryption(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        let keys = Self::sub_keys(key)?;
        let blocks = BinaryString::from_text(plaintext)?.blocks(BLOCK_BITS)?;

        let mut chain = self.iv.clone();
        let mut ciphertext = self.iv.clone();
        for (i, block) in blocks.iter().enumerate() {
            let encrypted = feistel(&block.xor(&chain)?, &keys, self.sbox_width)?;
            trace!("block {}: {} -> {}", i, block, encrypted);
            ciphertext.append(&encrypted);
            chain = encrypted;
        }

        Ok(ciphertext.to_string())
    }

    /// Reverses [`Des::encryption`]; the first block of `ciphertext` is taken as the IV.
    ///
    /// A trailing partial block is zero-padded. Padding of the last plaintext
    /// block is not stripped.
    ///
    /// # Errors
    ///
    /// `MalformedInput` for an empty ciphertext or characters other than `'0'` and `'1'`.
    pub fn decryption(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let bits: BinaryString = ciphertext.parse()?;
        if bits.is_empty() {
            return Err(CipherError::MalformedInput(
                "ciphertext must contain at least the IV block".to_string(),
            ));
        }

        let keys = Self::sub_keys(key)?.reversed();
        let blocks = bits.blocks(BLOCK_BITS)?;

        let mut plain = BinaryString::default();
        for pair in blocks.windows(2) {
            let decrypted = feistel(&pair[1], &keys, self.sbox_width)?.xor(&pair[0])?;
            trace!("block {} -> {}", pair[1], decrypted);
            plain.append(&decrypted);
        }

        Ok(plain.to_text())
    }
}

impl Cipher for Des {
    fn name(&self) -> &str {
        NAME
    }

    fn encryption(&self, message: &str, key: &str) -> Result<String, CipherError> {
        Des::encryption(self, message, key)
    }

    fn decryption(&self, message: &str, key: &str) -> Result<String, CipherError> {
        Des::decryption(self, message, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IV_BITS: &str = "0110000101100010011000110110010001100101011001100110011101101000";

    #[test]
    fn test_single_block_vectors() -> Result<(), CipherError> {
        let des = Des::default();

        let short_key = des.encryption("haythams", "haytham")?;
        assert_eq!(
            short_key,
            format!("{}{}", IV_BITS, "1100110000100110100110101111100111010100100101100001100010101100")
        );
        assert_eq!(des.decryption(&short_key, "haytham")?, "haythams");

        let full_key = des.encryption("haythams", "haythams")?;
        assert_eq!(
            full_key,
            format!("{}{}", IV_BITS, "1000101111001000010100000101000101001011110111101110100000111011")
        );
        Ok(())
    }

    #[test]
    fn test_unpadded_sbox_outputs_match_browser_vector() -> Result<(), CipherError> {
        let des = Des::try_with(&DesParams::from_json(r#"{"sbox_width":0}"#)?)?;
        let ciphertext = des.encryption("haythams", "haythams")?;
        assert_eq!(
            ciphertext,
            format!("{}{}", IV_BITS, "0101111000000110001100000110011001111100000001101110101011101010")
        );
        assert_eq!(des.decryption(&ciphertext, "haythams")?, "haythams");
        assert_ne!(Des::default().encryption("haythams", "haythams")?, ciphertext);
        Ok(())
    }

    #[test]
    fn test_unpadded_multi_block_round_trip() -> Result<(), CipherError> {
        let params = DesParams {
            sbox_width: 0,
            ..DesParams::default()
        };
        let des = Des::try_with(&params)?;
        let ciphertext = des.encryption("hello world!", "secretky")?;
        assert_eq!(ciphertext.len(), 192);
        assert_eq!(des.decryption(&ciphertext, "secretky")?, "hello world!\0\0\0\0");
        Ok(())
    }

    #[test]
    fn test_rejected_sbox_width() {
        let params = DesParams {
            sbox_width: SBOX_OUTPUT_BITS + 1,
            ..DesParams::default()
        };
        assert!(matches!(
            Des::try_with(&params),
            Err(CipherError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_two_full_blocks() -> Result<(), CipherError> {
        let des = Des::default();
        let ciphertext = des.encryption("abcdefghijklmnop", "password")?;
        assert_eq!(
            ciphertext,
            [
                IV_BITS,
                "0111100000011100111101000110000110111011011001100000011010101101",
                "1111111000111011001111000000001101101101000101010001101101110011",
            ]
            .concat()
        );
        assert_eq!(des.decryption(&ciphertext, "password")?, "abcdefghijklmnop");
        Ok(())
    }

    #[test]
    fn test_partial_last_block_keeps_padding() -> Result<(), CipherError> {
        let des = Des::default();
        let ciphertext = des.encryption("hello world!", "secretky")?;
        assert_eq!(ciphertext.len(), 192);
        assert_eq!(des.decryption(&ciphertext, "secretky")?, "hello world!\0\0\0\0");
        Ok(())
    }

    #[test]
    fn test_empty_plaintext_is_the_iv() -> Result<(), CipherError> {
        let des = Des::default();
        let ciphertext = des.encryption("", "haytham")?;
        assert_eq!(ciphertext, IV_BITS);
        assert_eq!(des.decryption(&ciphertext, "haytham")?, "");
        Ok(())
    }

    #[test]
    fn test_malformed_ciphertexts() {
        let des = Des::default();
        assert!(matches!(
            des.decryption("", "key"),
            Err(CipherError::MalformedInput(_))
        ));
        assert!(matches!(
            des.decryption("01x1", "key"),
            Err(CipherError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_long_keys_are_truncated() -> Result<(), CipherError> {
        let des = Des::default();
        assert_eq!(
            des.encryption("x", "a much longer key than eight")?,
            des.encryption("x", "a much l")?
        );
        Ok(())
    }

    #[test]
    fn test_custom_iv() -> Result<(), CipherError> {
        let des = Des::try_with(&DesParams::from_json(r#"{"iv":"12345678"}"#)?)?;
        let ciphertext = des.encryption("secret", "key")?;
        assert_eq!(
            ciphertext,
            "0011000100110010001100110011010000110101001101100011011100111000\
             0010101101111100100110001110111000011101010101011010001000010110"
        );
        // the IV travels with the ciphertext
        assert_eq!(Des::default().decryption(&ciphertext, "key")?, "secret\0\0");
        Ok(())
    }

    #[test]
    fn test_rejected_ivs() {
        for iv in ["short", "far too long", "ivwith€"] {
            let params = DesParams {
                iv: iv.to_string(),
                ..DesParams::default()
            };
            assert!(matches!(
                Des::try_with(&params),
                Err(CipherError::InvalidParameters(_))
            ));
        }
        assert!(DesParams::from_json("{\"iv\":").is_err());
    }

    #[test]
    fn test_default_matches_default_params() {
        assert_eq!(Des::try_with(&DesParams::default()).unwrap(), Des::default());
        let json = DesParams::default().to_json().unwrap();
        assert_eq!(DesParams::from_json(&json).unwrap(), DesParams::default());
    }
}
