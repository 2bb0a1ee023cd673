use crate::bits::BinaryString;
use crate::des::key_schedule::SubKeys;
use crate::des::round::round;
use crate::errors::CipherError;
use crate::preset::des_tables::{FP, IP};

use log::trace;

/// DES block width.
pub const BLOCK_BITS: usize = 64;

/// Runs one 64-bit block through IP, the 16 Feistel rounds and FP.
///
/// The halves are swapped before FP, so the same routine decrypts when given
/// [`SubKeys::reversed`]. `sbox_width` is passed on to [`round`].
pub fn feistel(
    block: &BinaryString,
    keys: &SubKeys,
    sbox_width: usize,
) -> Result<BinaryString, CipherError> {
    if block.len() != BLOCK_BITS {
        return Err(CipherError::MalformedInput(format!(
            "DES block must be {} bits, got {}",
            BLOCK_BITS,
            block.len()
        )));
    }

    let permuted = block.permute(&IP)?;
    let mut left = permuted.first_half();
    let mut right = permuted.second_half();

    for (i, key) in keys.iter().enumerate() {
        let next = left.xor(&round(&right, key, sbox_width)?)?;
        left = right;
        right = next;
        trace!("round {:>2}: L={} R={}", i + 1, left, right);
    }

    right.concat(&left).permute(&FP)
}
