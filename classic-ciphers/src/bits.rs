//! # Bit strings
//!
//! [`BinaryString`] is the representation DES works on between its stages. It is
//! stored as a packed MSB-first bit vector and rendered as a text of `'0'` / `'1'`
//! characters, which is also the ciphertext format DES exposes.

use crate::errors::CipherError;

use bitvec::field::BitField;
use bitvec::prelude::{BitVec, Msb0};

use std::fmt;
use std::str::FromStr;

/// Bits per character in [`BinaryString::from_text`].
pub const BITS_PER_CHAR: usize = 8;

/// An unsigned bit vector, most significant bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryString(BitVec<u8, Msb0>);

impl BinaryString {
    /// `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        BinaryString(BitVec::repeat(false, len))
    }

    /// The binary digits of `value`, most significant first, left-padded with zeros to `width`.
    ///
    /// No digits are dropped, so `width = 0` gives the shortest rendering, `"0"` for zero.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::bits::BinaryString;
    /// assert_eq!(BinaryString::from_value(5, 4).to_string(), "0101");
    /// assert_eq!(BinaryString::from_value(5, 0).to_string(), "101");
    /// assert_eq!(BinaryString::from_value(0, 0).to_string(), "0");
    /// ```
    pub fn from_value(value: u32, width: usize) -> Self {
        let digits = (u32::BITS - value.leading_zeros()).max(1);
        (0..digits)
            .rev()
            .map(|shift| (value >> shift) & 1 == 1)
            .collect::<Self>()
            .pad_binary(width)
    }

    /// Bits of `bytes`, 8 per byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        BinaryString(BitVec::from_slice(bytes))
    }

    /// Encodes every character as its code point in exactly 8 bits.
    ///
    /// # Errors
    ///
    /// `MalformedInput` for characters above U+00FF, which do not fit into 8 bits.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::bits::BinaryString;
    /// let bits = BinaryString::from_text("hay").unwrap();
    /// assert_eq!(bits.to_string(), "011010000110000101111001");
    /// ```
    pub fn from_text(text: &str) -> Result<Self, CipherError> {
        let bytes = text
            .chars()
            .map(|c| {
                u8::try_from(c).map_err(|_| {
                    CipherError::MalformedInput(format!(
                        "character {:?} does not fit into {} bits",
                        c, BITS_PER_CHAR
                    ))
                })
            })
            .collect::<Result<Vec<u8>, CipherError>>()?;

        Ok(BinaryString(BitVec::from_vec(bytes)))
    }

    /// Decodes consecutive 8-bit groups back into characters.
    ///
    /// A trailing group shorter than 8 bits is dropped.
    pub fn to_text(&self) -> String {
        self.0
            .chunks_exact(BITS_PER_CHAR)
            .map(|byte| char::from(byte.load_be::<u8>()))
            .collect()
    }

    /// Numeric value of the bits; only the low 32 bits are kept for longer strings.
    pub fn value(&self) -> u32 {
        self.0
            .iter()
            .by_vals()
            .fold(0u32, |acc, bit| (acc << 1) | u32::from(bit))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reorders bits by a table of 1-based source positions: `out[i] = self[table[i] - 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::bits::BinaryString;
    /// let bits: BinaryString = "1001".parse().unwrap();
    /// assert_eq!(bits.permute(&[2, 1, 3, 4]).unwrap().to_string(), "0101");
    /// assert_eq!(bits.permute(&[4, 4]).unwrap().to_string(), "11");
    /// assert!(bits.permute(&[5]).is_err());
    /// ```
    pub fn permute(&self, table: &[usize]) -> Result<Self, CipherError> {
        table
            .iter()
            .map(|&position| {
                position
                    .checked_sub(1)
                    .and_then(|index| self.0.get(index).map(|bit| *bit))
                    .ok_or_else(|| {
                        CipherError::MalformedInput(format!(
                            "permutation position {} is outside an input of {} bits",
                            position,
                            self.len()
                        ))
                    })
            })
            .collect()
    }

    /// Like [`permute`](Self::permute), but positions past the end of a short input are skipped.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::bits::BinaryString;
    /// let bits: BinaryString = "101".parse().unwrap();
    /// assert_eq!(bits.permute_within(&[3, 5, 1, 4, 2]).to_string(), "110");
    /// ```
    pub fn permute_within(&self, table: &[usize]) -> Self {
        table
            .iter()
            .filter_map(|&position| {
                position
                    .checked_sub(1)
                    .and_then(|index| self.0.get(index).map(|bit| *bit))
            })
            .collect()
    }

    /// Bitwise XOR of two equally long strings.
    ///
    /// # Errors
    ///
    /// `MalformedInput` when the lengths differ.
    pub fn xor(&self, other: &Self) -> Result<Self, CipherError> {
        if self.len() != other.len() {
            return Err(CipherError::MalformedInput(format!(
                "cannot xor {} bits with {} bits",
                self.len(),
                other.len()
            )));
        }

        Ok(self
            .0
            .iter()
            .by_vals()
            .zip(other.0.iter().by_vals())
            .map(|(a, b)| a ^ b)
            .collect())
    }

    /// Leading half; for odd lengths the middle bit belongs to the second half.
    pub fn first_half(&self) -> Self {
        BinaryString(self.0[..self.len() / 2].to_bitvec())
    }

    /// Trailing half.
    pub fn second_half(&self) -> Self {
        BinaryString(self.0[self.len() / 2..].to_bitvec())
    }

    /// Rotates left by `shift` positions.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::bits::BinaryString;
    /// let bits: BinaryString = "1001".parse().unwrap();
    /// assert_eq!(bits.circular_shift(2).to_string(), "0110");
    /// assert_eq!(bits.circular_shift(5).to_string(), "0011");
    /// ```
    pub fn circular_shift(&self, shift: usize) -> Self {
        let mut bits = self.0.clone();
        if !bits.is_empty() {
            let len = bits.len();
            bits.rotate_left(shift % len);
        }
        BinaryString(bits)
    }

    /// Left-pads with zero bits until the length reaches `width`.
    pub fn pad_binary(&self, width: usize) -> Self {
        let missing = width.saturating_sub(self.len());
        let mut bits = BitVec::repeat(false, missing);
        bits.extend_from_bitslice(&self.0);
        BinaryString(bits)
    }

    /// Right-pads with zero bits until the length reaches `width`, or truncates to `width`.
    pub fn fit_to(&self, width: usize) -> Self {
        let mut bits = self.0.clone();
        bits.resize(width, false);
        BinaryString(bits)
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        let mut bits = self.0.clone();
        bits.extend_from_bitslice(&other.0);
        BinaryString(bits)
    }

    /// Appends `other` in place.
    pub fn append(&mut self, other: &Self) {
        self.0.extend_from_bitslice(&other.0);
    }

    /// Splits into `width`-bit blocks, zero-padding the last block on the right.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::bits::BinaryString;
    /// let bits: BinaryString = "10110".parse().unwrap();
    /// let blocks: Vec<String> = bits.blocks(2).unwrap().iter().map(|b| b.to_string()).collect();
    /// assert_eq!(blocks, ["10", "11", "00"]);
    /// ```
    pub fn blocks(&self, width: usize) -> Result<Vec<Self>, CipherError> {
        if width == 0 {
            return Err(CipherError::InvalidParameters(
                "block width must be positive".to_string(),
            ));
        }

        Ok(self
            .0
            .chunks(width)
            .map(|chunk| BinaryString(chunk.to_bitvec()).fit_to(width))
            .collect())
    }
}

impl FromIterator<bool> for BinaryString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        BinaryString(iter.into_iter().collect())
    }
}

impl FromStr for BinaryString {
    type Err = CipherError;

    /// Parses a text of `'0'` / `'1'` characters; anything else is `MalformedInput`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(i, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(CipherError::MalformedInput(format!(
                    "expected a binary digit at position {}, found {:?}",
                    i, other
                ))),
            })
            .collect()
    }
}

impl fmt::Display for BinaryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
