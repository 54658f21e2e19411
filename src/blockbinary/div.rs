//! Unrounded multiply/divide kernels (`urmul`/`urdiv`).

use crate::block::{self, Block};
use crate::blockbinary::number::BlockBinary;
use crate::error::NumError;

impl<B: Block> BlockBinary<B> {
    /// Faithful (unrounded) product: `self * rhs` at full `2N`-bit width,
    /// no truncation.
    pub fn urmul(&self, rhs: &Self) -> BlockBinary<B> {
        let (sign_a, mag_a) = self.magnitude();
        let (sign_b, mag_b) = rhs.magnitude();
        let n = mag_a.blocks.len().max(mag_b.blocks.len());
        let mut product = vec![B::zero(); 2 * n];
        let mask_bits = u32::from(B::BITS);

        for i in 0..n {
            let ai = mag_a.blocks.get(i).copied().unwrap_or(B::zero()).as_u128();
            if ai == 0 {
                continue;
            }
            let mut carry: u128 = 0;
            for j in 0..n {
                let bj = mag_b.blocks.get(j).copied().unwrap_or(B::zero()).as_u128();
                let idx = i + j;
                let sum = ai * bj + product[idx].as_u128() + carry;
                product[idx] = B::from_u128_lossy(sum & full_mask(mask_bits));
                carry = sum >> mask_bits;
            }
            let mut k = i + n;
            while carry > 0 {
                let sum = product[k].as_u128() + carry;
                product[k] = B::from_u128_lossy(sum & full_mask(mask_bits));
                carry = sum >> mask_bits;
                k += 1;
            }
        }

        let result_nbits = self.nbits + rhs.nbits;
        let mut result = BlockBinary::from_blocks(result_nbits, product);
        if sign_a != sign_b {
            result = result.negate();
        }
        result
    }

    /// Computes `self / rhs` and `self % rhs` together. Inputs are
    /// widened to an `nbits + 1`-bit working width to represent `|minval|`
    /// exactly; the quotient's sign is the XOR of the operand signs and
    /// the remainder's sign follows the dividend.
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self), NumError> {
        if rhs.is_zero_value() {
            return Err(NumError::DivideByZero);
        }
        let work_bits = self.nbits + 1;
        let (sign_a, mag_a) = widen_magnitude(self, work_bits);
        let (sign_b, mag_b) = widen_magnitude(rhs, work_bits);

        let (quot, rem) = unsigned_div_rem(&mag_a, &mag_b, work_bits);

        let mut quot = BlockBinary::from_blocks(self.nbits, quot.blocks);
        if sign_a != sign_b {
            quot = quot.negate();
        }
        let mut rem = BlockBinary::from_blocks(self.nbits, rem.blocks);
        if sign_a {
            rem = rem.negate();
        }
        Ok((quot, rem))
    }

    /// `urdiv`: computes `self / rhs` with `extra` (4) additional
    /// fractional bits of quotient beyond the integer result, yielding a
    /// `2N + extra`-bit quotient together with a remainder whose
    /// non-zero-ness is the final sticky bit. Used by `fixpnt` division,
    /// which pre-shifts its numerator so the quotient already lands at
    /// the right scale.
    pub fn urdiv(&self, rhs: &Self, extra: usize) -> Result<(BlockBinary<B>, bool), NumError> {
        if rhs.is_zero_value() {
            return Err(NumError::DivideByZero);
        }
        let (sign_a, mag_a) = widen_magnitude(self, self.nbits + 1);
        let (sign_b, mag_b) = widen_magnitude(rhs, rhs.nbits + 1);

        let shifted_bits = mag_a.nbits + self.nbits + extra;
        let mut shifted_blocks = mag_a.blocks.clone();
        shifted_blocks.resize(shifted_bits.div_ceil(B::BITS as usize).max(1), B::zero());
        block::shift_left_bits(&mut shifted_blocks, self.nbits + extra);
        let shifted = BlockBinary::from_blocks(shifted_bits, shifted_blocks);

        let work_bits = shifted_bits.max(mag_b.nbits);
        let (_, num) = widen_magnitude(&shifted, work_bits);
        let (_, den) = widen_magnitude(&mag_b, work_bits);

        let result_bits = self.nbits * 2 + extra;
        let (quot, rem) = unsigned_div_rem(&num, &den, work_bits);
        let mut quot = BlockBinary::from_blocks(result_bits, quot.blocks);
        if sign_a != sign_b {
            quot = quot.negate();
        }
        Ok((quot, !rem.is_zero_value()))
    }
}

fn full_mask(bits: u32) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

/// Returns `(sign, magnitude)` with the magnitude re-materialized at
/// `work_bits` (which must be `>= value.nbits`), so that `|minval|` is
/// representable without overflowing back on itself.
fn widen_magnitude<B: Block>(value: &BlockBinary<B>, work_bits: usize) -> (bool, BlockBinary<B>) {
    let sign = value.sign_bit();
    let widened = value.sign_extend(work_bits.max(value.nbits));
    let mag = if sign { widened.negate() } else { widened };
    (sign, mag)
}

/// Binary restoring division of two unsigned magnitudes, both held in
/// `work_bits`-wide storage. Returns `(quotient, remainder)` at the same
/// width.
fn unsigned_div_rem<B: Block>(
    num: &BlockBinary<B>,
    den: &BlockBinary<B>,
    work_bits: usize,
) -> (BlockBinary<B>, BlockBinary<B>) {
    let nblocks = work_bits.div_ceil(B::BITS as usize).max(1);
    let mut quotient = vec![B::zero(); nblocks];
    let mut remainder = vec![B::zero(); nblocks];

    for i in (0..work_bits).rev() {
        block::shift_left_bits(&mut remainder, 1);
        if block::test_bit(&num.blocks, i) {
            block::set_bit(&mut remainder, 0, true);
        }
        if block::cmp_unsigned(&remainder, &den.blocks) != std::cmp::Ordering::Less {
            block::sub_with_borrow(&mut remainder, &den.blocks);
            block::set_bit(&mut quotient, i, true);
        }
    }

    (
        BlockBinary::from_blocks(work_bits, quotient),
        BlockBinary::from_blocks(work_bits, remainder),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urmul_is_full_width_product() {
        let a = BlockBinary::<u8>::from_i128(8, 100);
        let b = BlockBinary::<u8>::from_i128(8, 100);
        let wide = a.urmul(&b);
        assert_eq!(wide.nbits(), 16);
        assert_eq!(wide.to_i128(), 10_000);
    }

    #[test]
    fn urmul_handles_negative_operands() {
        let a = BlockBinary::<u8>::from_i128(8, -5);
        let b = BlockBinary::<u8>::from_i128(8, 12);
        let wide = a.urmul(&b);
        assert_eq!(wide.to_i128(), -60);
    }

    #[test]
    fn div_rem_matches_truncating_division() {
        let a = BlockBinary::<u8>::from_i128(8, -17);
        let b = BlockBinary::<u8>::from_i128(8, 5);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q.to_i128(), -3);
        assert_eq!(r.to_i128(), -2);
    }

    #[test]
    fn div_rem_rejects_zero_divisor() {
        let a = BlockBinary::<u8>::from_i128(8, 10);
        let zero = BlockBinary::<u8>::zero(8);
        assert!(a.div_rem(&zero).is_err());
    }
}
