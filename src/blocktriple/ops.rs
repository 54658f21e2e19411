//! Arithmetic on [`BlockTriple`]: align-shift-add, product, and
//! unrounded-division kernels, plus the special-value rules shared by
//! all of them — NaN contagion, and indeterminate forms (`inf - inf`,
//! `0 * inf`, `inf / inf`, `0 / 0`) producing a signalling NaN.

use crate::blockbinary::BlockBinary;
use crate::blocktriple::number::BlockTriple;

/// Widens `t`'s magnitude to `width` bits and left-shifts it by `shift`,
/// then reattaches its sign as a two's-complement value. Used to bring
/// two triples' significands onto a common exponent before a signed add.
fn signed_at(t: &BlockTriple, width: usize, shift: usize) -> BlockBinary<u64> {
    let widened = t.significant.resize(width) << shift;
    if t.sign {
        widened.negate()
    } else {
        widened
    }
}

/// Left-normalizes `mag` so its leading set bit sits at the top of its
/// current storage width, decrementing `exp` by the same shift so the
/// represented value `mag * 2^exp` is unchanged. Spec §4.5: "if the
/// resulting leading bit is 0, normalise left and decrement scale." A
/// post-cancellation sum can leave several leading zero bits above the
/// true leading bit; left here, `rounding_decision`'s guard/round/sticky
/// extraction would otherwise be starved of the low-order bits it needs.
fn normalize(mag: BlockBinary<u64>, exp: isize) -> (BlockBinary<u64>, isize) {
    if mag.is_zero_value() {
        return (mag, exp);
    }
    let msb = mag.find_msb().max(0) as usize;
    let top = mag.nbits() - 1;
    let shift = top - msb;
    if shift == 0 {
        (mag, exp)
    } else {
        (mag << shift, exp - shift as isize)
    }
}

impl BlockTriple {
    /// `a + b`: NaN is contagious (a signalling operand poisons the
    /// result as signalling); like-signed infinities add to an infinity
    /// of that sign, opposite-signed infinities are the indeterminate
    /// form `inf + (-inf)` and produce a signalling NaN. Finite
    /// operands are aligned onto their common (smaller) exponent and
    /// added exactly — no bits are discarded here; this type carries
    /// the exact sum forward and leaves the single correctly-rounded
    /// truncation to `cfloat::convert`.
    pub fn add(a: &BlockTriple, b: &BlockTriple) -> BlockTriple {
        if a.is_nan() || b.is_nan() {
            let signaling = a.is_signaling() || b.is_signaling();
            let sign = if a.is_nan() { a.sign } else { b.sign };
            return BlockTriple::nan(sign, signaling);
        }
        if a.is_infinite() || b.is_infinite() {
            return match (a.is_infinite(), b.is_infinite()) {
                (true, true) if a.sign == b.sign => BlockTriple::infinity(a.sign),
                (true, true) => BlockTriple::nan(true, true),
                (true, false) => BlockTriple::infinity(a.sign),
                (false, true) => BlockTriple::infinity(b.sign),
                (false, false) => unreachable!(),
            };
        }
        if a.is_zero() && b.is_zero() {
            return BlockTriple::zero(a.sign && b.sign);
        }
        if a.is_zero() {
            return b.clone();
        }
        if b.is_zero() {
            return a.clone();
        }

        let exp = a.exp.min(b.exp);
        let shift_a = (a.exp - exp) as usize;
        let shift_b = (b.exp - exp) as usize;
        let width = a.significant.nbits().max(b.significant.nbits()) + shift_a.max(shift_b) + 2;
        let sum = signed_at(a, width, shift_a) + signed_at(b, width, shift_b);
        let (sign, mag) = sum.magnitude();
        let (mag, exp) = normalize(mag, exp);
        BlockTriple::finite(sign, exp, mag)
    }

    /// `a - b`: `add(a, -b)`.
    pub fn sub(a: &BlockTriple, b: &BlockTriple) -> BlockTriple {
        BlockTriple::add(a, &b.negate())
    }

    /// `a * b`: significands multiply exactly via
    /// [`BlockBinary::urmul`] (no precision lost); `0 * inf` is the
    /// indeterminate form and produces a signalling NaN; otherwise
    /// zero/infinity dominate per the usual sign-of-product rule.
    pub fn mul(a: &BlockTriple, b: &BlockTriple) -> BlockTriple {
        if a.is_nan() || b.is_nan() {
            let signaling = a.is_signaling() || b.is_signaling();
            let sign = if a.is_nan() { a.sign } else { b.sign };
            return BlockTriple::nan(sign, signaling);
        }
        if a.is_infinite() || b.is_infinite() {
            if a.is_zero() || b.is_zero() {
                return BlockTriple::nan(true, true);
            }
            return BlockTriple::infinity(a.sign ^ b.sign);
        }
        if a.is_zero() || b.is_zero() {
            return BlockTriple::zero(a.sign ^ b.sign);
        }
        let significant = a.significant.urmul(&b.significant);
        BlockTriple::finite(a.sign ^ b.sign, a.exp + b.exp, significant)
    }

    /// `a / b`: uses [`BlockBinary::urdiv`] to carry extra
    /// guard/round/sticky precision in the quotient beyond what the
    /// eventual target format needs, so `cfloat::convert`'s rounding
    /// step still sees a faithful sticky bit. Division by zero produces
    /// a correctly-signed infinity (or, for `0/0`, a signalling NaN);
    /// `inf/inf` is the other indeterminate form.
    pub fn div(a: &BlockTriple, b: &BlockTriple) -> BlockTriple {
        if a.is_nan() || b.is_nan() {
            let signaling = a.is_signaling() || b.is_signaling();
            let sign = if a.is_nan() { a.sign } else { b.sign };
            return BlockTriple::nan(sign, signaling);
        }
        if a.is_infinite() && b.is_infinite() {
            return BlockTriple::nan(true, true);
        }
        if a.is_infinite() {
            return BlockTriple::infinity(a.sign ^ b.sign);
        }
        if b.is_infinite() {
            return BlockTriple::zero(a.sign ^ b.sign);
        }
        if b.is_zero() {
            return if a.is_zero() {
                BlockTriple::nan(true, true)
            } else {
                BlockTriple::infinity(a.sign ^ b.sign)
            };
        }
        if a.is_zero() {
            return BlockTriple::zero(a.sign ^ b.sign);
        }

        const EXTRA: usize = 32;
        let (mut quot, sticky) = a
            .significant
            .urdiv(&b.significant, EXTRA)
            .expect("checked non-zero above");
        if sticky {
            quot = quot.clone() | BlockBinary::from_u128(quot.nbits(), 1);
        }
        let exp = a.exp - b.exp - (a.significant.nbits() + EXTRA) as isize;
        BlockTriple::finite(a.sign ^ b.sign, exp, quot)
    }
}
