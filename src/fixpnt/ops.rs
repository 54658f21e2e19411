use std::fmt;
use std::str::FromStr;

use crate::blockbinary::BlockBinary;
use crate::error::NumError;
use crate::fixpnt::number::FixedPoint;
use crate::fixpnt::FixedContext;
use crate::integer::{Integer, IntegerContext};
use crate::ops::{RoundedAbs, RoundedAdd, RoundedDiv, RoundedMul, RoundedNeg, RoundedSub};
use crate::real::Real;
use crate::round::{should_round_up, RoundingContext};

impl FixedPoint {
    /// `+`, `-`: delegate straight to the underlying `blockbinary`
    /// add/sub — the implicit `2^(-scale)` weighting is preserved by
    /// construction, no extra rounding needed.
    pub fn add(&self, rhs: &Self) -> Self {
        let wide_a = self.bits.sign_extend(self.ctx.nbits() + 1);
        let wide_b = rhs.bits.sign_extend(self.ctx.nbits() + 1);
        let bits = self.ctx.apply_overflow(wide_a + wide_b);
        FixedPoint { bits, ctx: self.ctx }
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        let wide_a = self.bits.sign_extend(self.ctx.nbits() + 1);
        let wide_b = rhs.bits.sign_extend(self.ctx.nbits() + 1);
        let bits = self.ctx.apply_overflow(wide_a - wide_b);
        FixedPoint { bits, ctx: self.ctx }
    }

    pub fn neg(&self) -> Self {
        let wide = self.bits.sign_extend(self.ctx.nbits() + 1).negate();
        let bits = self.ctx.apply_overflow(wide);
        FixedPoint { bits, ctx: self.ctx }
    }

    /// `|self|`: negates when the sign bit is set, through the same
    /// overflow policy as `neg` (the most negative value saturates to
    /// `maxpos` under `Overflow::Saturate` rather than staying negative).
    pub fn abs(&self) -> Self {
        if self.bits.sign_bit() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// `*`: computes the full `2N`-bit product, applies the rounding
    /// oracle at bit position `scale`, shifts right by `scale`, and
    /// increments per the oracle's verdict.
    pub fn mul(&self, rhs: &Self) -> Self {
        let product = self.bits.urmul(&rhs.bits); // width 2 * nbits, scale 2 * scale
        let scale = self.ctx.scale();
        if scale == 0 {
            let bits = self.ctx.apply_overflow(product);
            return FixedPoint { bits, ctx: self.ctx };
        }
        let (sign, mag) = product.magnitude();
        let decision = mag.rounding_mode(scale - 1);
        let truncated = mag >> scale;
        let lsb_is_one = crate::block::test_bit(truncated.blocks(), 0);
        let (_, direction) = self.ctx.rounding_mode().to_direction(sign);
        let rounded = if should_round_up(decision, &direction, lsb_is_one) {
            truncated + BlockBinary::from_i128(truncated.nbits(), 1)
        } else {
            truncated
        };
        let widened = rounded.resize(self.ctx.nbits() + 1);
        let signed = if sign { widened.negate() } else { widened };
        let bits = self.ctx.apply_overflow(signed);
        FixedPoint { bits, ctx: self.ctx }
    }

    /// `/`: the numerator is pre-shifted left by `scale` bits (plus a
    /// few guard bits) so the quotient already lands at scale
    /// `2^(-scale)`; rounding bits decide the last-place adjustment.
    pub fn div(&self, rhs: &Self) -> Result<Self, NumError> {
        if rhs.bits.is_zero() {
            return Err(NumError::DivideByZero);
        }
        const GUARD_BITS: usize = 4;
        let shift = self.ctx.scale() + GUARD_BITS;
        let work_bits = self.ctx.nbits() + shift + 2;
        let numerator = self.bits.sign_extend(work_bits) << shift;
        let denominator = rhs.bits.sign_extend(work_bits);
        let (mut quot, rem) = numerator.div_rem(&denominator)?;
        if !rem.is_zero() {
            // The pre-shift buys `GUARD_BITS` extra quotient bits below the
            // target scale, but `div_rem` still truncates: a non-zero
            // remainder means the true quotient has more weight below what
            // was computed. Folding it into the LSB keeps the rounding
            // oracle below from mistaking a truncated tie for an exact one.
            quot = quot | BlockBinary::from_i128(quot.nbits(), 1);
        }

        let (sign, mag) = quot.magnitude();
        let decision = mag.rounding_mode(GUARD_BITS - 1);
        let truncated = mag >> GUARD_BITS;
        let lsb_is_one = crate::block::test_bit(truncated.blocks(), 0);
        let (_, direction) = self.ctx.rounding_mode().to_direction(sign);
        let rounded = if should_round_up(decision, &direction, lsb_is_one) {
            truncated + BlockBinary::from_i128(truncated.nbits(), 1)
        } else {
            truncated
        };
        let widened = rounded.resize(self.ctx.nbits() + 1);
        let signed = if sign { widened.negate() } else { widened };
        let bits = self.ctx.apply_overflow(signed);
        Ok(FixedPoint { bits, ctx: self.ctx })
    }

    /// Renders as `"-1234.5678"`: a decimal integer part, then,
    /// when `scale > 0`, exactly `scale` decimal fraction digits,
    /// zero-padded on the left and never truncated on the right.
    pub fn to_decimal_string(&self) -> String {
        let scale = self.ctx.scale();
        if self.bits.is_zero() {
            return if scale == 0 { "0".to_string() } else { format!("0.{}", "0".repeat(scale)) };
        }
        let (sign, mag) = self.bits.magnitude();
        let raw = mag.to_i128() as u128;
        let int_part = raw >> scale;
        let mut out = String::new();
        if sign {
            out.push('-');
        }
        out.push_str(&int_part.to_string());
        if scale > 0 {
            let frac_mask = (1u128 << scale) - 1;
            let frac_bits = raw & frac_mask;
            // frac_bits / 2^scale as a `scale`-decimal-digit fraction:
            // multiply up to a decimal numerator, then divide by the
            // (exact) power-of-two denominator via a plain shift.
            let ten_pow = 10u128.checked_pow(scale as u32).expect("scale too wide for decimal string emission");
            let frac_decimal = (frac_bits * ten_pow) >> scale;
            out.push('.');
            out.push_str(&format!("{:0width$}", frac_decimal, width = scale));
        }
        out
    }

    /// Parses the grammar shared with `integer` (an optional leading
    /// `-`, then `[0-9']+` or `0x[0-9A-F']+`) as a native integer `v`,
    /// and assigns it the same way [`Self::from_i128`] does:
    /// `bb = v << scale`.
    pub fn parse_with(ctx: FixedContext, s: &str) -> Result<Self, NumError> {
        let v = Integer::parse_with(IntegerContext::new(128), s)?;
        Ok(FixedPoint::from_i128(ctx, v.to_i128()))
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

/// `FromStr` needs a context to construct into; `(64, 32)` is the
/// canonical default, matching a native `i32.32` split other contexts
/// in this crate default to when one is needed but not supplied.
impl FromStr for FixedPoint {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, NumError> {
        FixedPoint::parse_with(FixedContext::new(64, 32), s)
    }
}

impl RoundedNeg for FixedContext {
    fn neg(&self, src: &Self::Rounded) -> Self::Rounded {
        src.neg()
    }

    fn neg_from<N: Real>(&self, src: &N) -> Self::Rounded {
        self.round_from(src).neg()
    }
}

impl RoundedAbs for FixedContext {
    fn abs(&self, src: &Self::Rounded) -> Self::Rounded {
        src.abs()
    }

    fn abs_from<N: Real>(&self, src: &N) -> Self::Rounded {
        self.round_from(src).abs()
    }
}

impl RoundedAdd for FixedContext {
    fn add(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded {
        src1.add(src2)
    }

    fn add_from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded {
        self.round_from(src1).add(&self.round_from(src2))
    }
}

impl RoundedSub for FixedContext {
    fn sub(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded {
        src1.sub(src2)
    }

    fn sub_from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded {
        self.round_from(src1).sub(&self.round_from(src2))
    }
}

impl RoundedMul for FixedContext {
    fn mul(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded {
        src1.mul(src2)
    }

    fn mul_from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded {
        self.round_from(src1).mul(&self.round_from(src2))
    }
}

impl RoundedDiv for FixedContext {
    fn div(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded {
        src1.div(src2).unwrap_or_else(|_| self.zero())
    }

    fn div_from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded {
        self.round_from(src1).div(&self.round_from(src2)).unwrap_or_else(|_| self.zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixpnt::Overflow;

    fn fx(ctx: FixedContext, v: i128) -> FixedPoint {
        FixedPoint::from_i128(ctx, v)
    }

    #[test]
    fn bounds_match_scale() {
        let ctx = FixedContext::new(8, 4);
        assert_eq!(ctx.zero().to_f64(), 0.0);
        assert!(ctx.maxpos().to_f64() > 0.0);
        assert!(ctx.maxneg().to_f64() < 0.0);
    }

    #[test]
    fn modular_add_wraps() {
        let ctx = FixedContext::new(8, 4).with_overflow(Overflow::Wrap);
        // 0x14 + 0x0C = 0x20 at (8,4)
        let a = FixedPoint {
            bits: BlockBinary::from_u128(8, 0x14),
            ctx,
        };
        let b = FixedPoint {
            bits: BlockBinary::from_u128(8, 0x0C),
            ctx,
        };
        let sum = a.add(&b);
        assert_eq!(sum.bits().blocks()[0] as u128, 0x20);
    }

    #[test]
    fn saturating_mul_clamps_to_maxpos() {
        let ctx = FixedContext::new(8, 4).with_overflow(Overflow::Saturate);
        let a = FixedPoint {
            bits: BlockBinary::from_u128(8, 0x7F),
            ctx,
        };
        let product = a.mul(&a);
        assert_eq!(*product.bits(), ctx.maxpos().bits);
    }

    #[test]
    fn wrapping_mul_does_not_clamp() {
        let ctx = FixedContext::new(8, 4).with_overflow(Overflow::Wrap);
        let a = fx(ctx, 0); // placeholder to exercise constructor path
        let _ = a;
        let raw = FixedPoint {
            bits: BlockBinary::from_u128(8, 0x7F),
            ctx,
        };
        let product = raw.mul(&raw);
        assert_eq!(product.bits().blocks()[0] as u128, 0x31);
    }

    #[test]
    fn decimal_string_pads_fraction_digits() {
        let ctx = FixedContext::new(16, 4);
        let half = fx(ctx, 0).add(&FixedPoint {
            bits: BlockBinary::from_u128(16, 0x8), // 0.5 at scale 4
            ctx,
        });
        assert_eq!(half.to_decimal_string(), "0.5000");
    }

    #[test]
    fn decimal_string_handles_negative_values() {
        let ctx = FixedContext::new(16, 4);
        let v = FixedPoint::from_i128(ctx, -3);
        assert_eq!(v.to_decimal_string(), "-3.0000");
    }

    #[test]
    fn parse_with_assigns_like_from_i128() {
        let ctx = FixedContext::new(16, 4);
        let parsed = FixedPoint::parse_with(ctx, "-7").unwrap();
        assert_eq!(parsed, FixedPoint::from_i128(ctx, -7));
    }
}
