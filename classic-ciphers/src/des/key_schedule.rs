use crate::bits::BinaryString;
use crate::errors::CipherError;
use crate::preset::des_tables::{PC1, PC2, ROTATIONS};

/// Number of Feistel rounds, one subkey each.
pub const ROUNDS: usize = 16;

/// Key width accepted by [`SubKeys::derive`].
pub const KEY_BITS: usize = 64;

/// The 16 round keys of 48 bits derived from one DES key, in encryption order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubKeys(Vec<BinaryString>);

impl SubKeys {
    /// Runs the key schedule on a 64-bit key.
    ///
    /// PC-1 drops the parity bits, the two 28-bit halves are rotated left by the
    /// per-round schedule, and PC-2 picks 48 bits from their concatenation.
    pub fn derive(key: &BinaryString) -> Result<Self, CipherError> {
        if key.len() != KEY_BITS {
            return Err(CipherError::MalformedInput(format!(
                "DES key must be {} bits, got {}",
                KEY_BITS,
                key.len()
            )));
        }

        let permuted = key.permute(&PC1)?;
        let mut c = permuted.first_half();
        let mut d = permuted.second_half();

        let mut keys = Vec::with_capacity(ROUNDS);
        for &shift in ROTATIONS.iter() {
            c = c.circular_shift(shift);
            d = d.circular_shift(shift);
            keys.push(c.concat(&d).permute(&PC2)?);
        }

        Ok(SubKeys(keys))
    }

    /// Same keys, last round first; running the Feistel network with them decrypts.
    pub fn reversed(&self) -> Self {
        SubKeys(self.0.iter().rev().cloned().collect())
    }

    /// Round keys in the order the Feistel rounds consume them.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::bits::BinaryString;
    /// # use classic_ciphers::des::key_schedule::SubKeys;
    /// let keys = SubKeys::derive(&BinaryString::from_text("haythams").unwrap()).unwrap();
    /// assert_eq!(keys.iter().count(), 16);
    /// assert!(keys.iter().all(|key| key.len() == 48));
    /// assert_eq!(keys.reversed().iter().next(), keys.iter().last());
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &BinaryString> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
