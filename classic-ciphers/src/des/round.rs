use crate::bits::BinaryString;
use crate::errors::CipherError;
use crate::preset::des_tables::{E, P, S_BOXES};

/// Width of an S-box input group.
pub const GROUP_BITS: usize = 6;

/// Width of an S-box output.
pub const SBOX_OUTPUT_BITS: usize = 4;

/// Width of the Feistel function output.
pub const HALF_BITS: usize = 32;

/// Row and column of a 6-bit group: the outer bits pick the row, the inner four the column.
///
/// # Example
///
/// ```
/// # use classic_ciphers::des::round::sbox_coordinates;
/// assert_eq!(sbox_coordinates(0b100001), (3, 0));
/// assert_eq!(sbox_coordinates(0b011110), (0, 15));
/// ```
pub fn sbox_coordinates(group: u8) -> (usize, usize) {
    let row = ((group >> 4) & 0b10) | (group & 0b1);
    let column = (group >> 1) & 0b1111;
    (row as usize, column as usize)
}

/// Looks a 6-bit group up in S-box `index`; the result is always `<= 15`.
pub fn substitute(index: usize, group: u8) -> Result<u8, CipherError> {
    let sbox = S_BOXES.get(index).ok_or_else(|| {
        CipherError::InvalidParameters(format!(
            "there are {} S-boxes, no box {}",
            S_BOXES.len(),
            index
        ))
    })?;
    let (row, column) = sbox_coordinates(group);
    Ok(sbox[row][column])
}

/// The Feistel function `f(R, K)`: expand to 48 bits, mix in the round key,
/// substitute through the S-boxes and permute the 32-bit result.
///
/// Each S-box output is written with at least `sbox_width` binary digits. With
/// [`SBOX_OUTPUT_BITS`] this is standard DES. Narrower widths drop leading zeros,
/// the substituted string comes out shorter than 32 bits, `P` skips positions
/// past its end and the result is right-padded with zero bits.
pub fn round(
    half: &BinaryString,
    key: &BinaryString,
    sbox_width: usize,
) -> Result<BinaryString, CipherError> {
    let mixed = half.permute(&E)?.xor(key)?;

    let mut substituted = BinaryString::default();
    for (index, group) in mixed.blocks(GROUP_BITS)?.iter().enumerate() {
        let value = substitute(index, group.value() as u8)?;
        substituted.append(&BinaryString::from_value(u32::from(value), sbox_width));
    }

    Ok(substituted.permute_within(&P).fit_to(HALF_BITS))
}
