//! Arithmetic, encoding-space increment/decrement, native-float
//! interop, and string conversion for [`CFloat`].

use std::fmt;
use std::str::FromStr;

use crate::block::{set_bit, test_bit};
use crate::blockbinary::BlockBinary;
use crate::blocktriple::BlockTriple;
use crate::cfloat::number::CFloat;
use crate::cfloat::round::CFloatContext;
use crate::error::NumError;
use crate::ops::{RoundedAbs, RoundedAdd, RoundedDiv, RoundedMul, RoundedNeg, RoundedSub};
use crate::real::Real;
use crate::round::RoundingContext;

impl CFloat {
    pub fn add(&self, rhs: &Self) -> Self {
        self.ctx.convert(&BlockTriple::add(&self.ctx.decode(&self.bits), &self.ctx.decode(&rhs.bits)))
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        self.ctx.convert(&BlockTriple::sub(&self.ctx.decode(&self.bits), &self.ctx.decode(&rhs.bits)))
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        self.ctx.convert(&BlockTriple::mul(&self.ctx.decode(&self.bits), &self.ctx.decode(&rhs.bits)))
    }

    pub fn div(&self, rhs: &Self) -> Self {
        self.ctx.convert(&BlockTriple::div(&self.ctx.decode(&self.bits), &self.ctx.decode(&rhs.bits)))
    }

    /// Fails with [`NumError::OperandIsNan`] instead of quietly
    /// propagating a signalling NaN, when `self.ctx()` has
    /// `trap_on_nan` enabled (strict mode). Quiet mode (the default)
    /// never fails; the unchecked [`Self::add`] above always stays
    /// quiet regardless of the context's trap setting.
    pub fn add_checked(&self, rhs: &Self) -> Result<Self, NumError> {
        self.reject_trapped_nan(rhs)?;
        Ok(self.add(rhs))
    }

    pub fn sub_checked(&self, rhs: &Self) -> Result<Self, NumError> {
        self.reject_trapped_nan(rhs)?;
        Ok(self.sub(rhs))
    }

    pub fn mul_checked(&self, rhs: &Self) -> Result<Self, NumError> {
        self.reject_trapped_nan(rhs)?;
        Ok(self.mul(rhs))
    }

    pub fn div_checked(&self, rhs: &Self) -> Result<Self, NumError> {
        self.reject_trapped_nan(rhs)?;
        Ok(self.div(rhs))
    }

    fn reject_trapped_nan(&self, rhs: &Self) -> Result<(), NumError> {
        if self.ctx.traps_on_nan() && (self.is_signaling_nan() || rhs.is_signaling_nan()) {
            return Err(NumError::OperandIsNan);
        }
        Ok(())
    }

    pub fn neg(&self) -> Self {
        self.negate_bits()
    }

    /// `|self|`: clears the sign bit. On a NaN this clears the qNaN/sNaN
    /// sign-bit discriminant along with it, same as clearing the sign bit
    /// of any other encoding — `abs` does not special-case NaN payloads.
    pub fn abs(&self) -> Self {
        if self.sign_bit() {
            self.negate_bits()
        } else {
            self.clone()
        }
    }

    /// The mantissa/exponent fields concatenated as one unsigned value
    /// (everything but the sign bit): `(exp_field << F) | frac_field`.
    fn magnitude_field(&self) -> u128 {
        (self.exponent_field() << self.ctx.f()) | self.fraction_field()
    }

    fn max_magnitude_field(&self) -> u128 {
        (1u128 << (self.ctx.es() + self.ctx.f())) - 1
    }

    fn with_sign_and_magnitude(&self, sign: bool, mag: u128) -> CFloat {
        let f = self.ctx.f();
        let nbits = self.ctx.nbits();
        let mut blocks = vec![0u64; nbits.div_ceil(64).max(1)];
        for i in 0..(self.ctx.es() + f) {
            if ((mag >> i) & 1) == 1 {
                set_bit(&mut blocks, i, true);
            }
        }
        if sign {
            set_bit(&mut blocks, nbits - 1, true);
        }
        CFloat::from_bits(self.ctx, BlockBinary::from_blocks(nbits, blocks))
    }

    /// Next encoding in the walk: `+0` through `+subnormals`,
    /// `+normals`, `+supernormals`, `+inf`, `qNaN`, `sNaN`, `-inf`,
    /// `-supernormals`, `-normals`, `-subnormals`, `-0`. The magnitude
    /// field (exponent and fraction together) increases monotonically
    /// on the positive side and decreases on the negative side;
    /// `+qNaN -> sNaN` flips the sign instead, and `-0` is a
    /// self-loop.
    pub fn next(&self) -> Self {
        let sign = self.sign_bit();
        let mag = self.magnitude_field();
        let max = self.max_magnitude_field();
        if !sign {
            if mag == max {
                self.with_sign_and_magnitude(true, max)
            } else {
                self.with_sign_and_magnitude(false, mag + 1)
            }
        } else if mag == 0 {
            self.with_sign_and_magnitude(true, 0)
        } else {
            self.with_sign_and_magnitude(true, mag - 1)
        }
    }

    /// Inverse of [`Self::next`]. `+0` is likewise kept as a self-loop
    /// for symmetry with `-0`'s documented behavior.
    pub fn prev(&self) -> Self {
        let sign = self.sign_bit();
        let mag = self.magnitude_field();
        let max = self.max_magnitude_field();
        if !sign {
            if mag == 0 {
                self.with_sign_and_magnitude(false, 0)
            } else {
                self.with_sign_and_magnitude(false, mag - 1)
            }
        } else if mag == max {
            self.with_sign_and_magnitude(false, max)
        } else {
            self.with_sign_and_magnitude(true, mag + 1)
        }
    }

    /// Reconstructs this value as an `f64`: a bit-for-bit fast path when
    /// the context is IEEE binary64, otherwise the general
    /// decode-and-sum-weights path shared with [`crate::fixpnt::FixedPoint::to_f64`].
    pub fn to_f64(&self) -> f64 {
        if self.ctx.nbits() == 64 && self.ctx.es() == 11 {
            let mut raw: u64 = 0;
            for i in 0..64 {
                if test_bit(self.bits.blocks(), i) {
                    raw |= 1u64 << i;
                }
            }
            return f64::from_bits(raw);
        }
        if self.is_nan_value() {
            return f64::NAN;
        }
        if self.is_infinite_value() {
            return if self.sign_bit() { f64::NEG_INFINITY } else { f64::INFINITY };
        }
        if self.is_zero_value() {
            return if self.sign_bit() { -0.0 } else { 0.0 };
        }
        let triple = self.ctx.decode(&self.bits);
        let mut acc = 0.0f64;
        let sig = triple.significant();
        for i in 0..sig.nbits() {
            if test_bit(sig.blocks(), i) {
                acc += 2f64.powi((triple.exp_lsb() + i as isize) as i32);
            }
        }
        if triple.sign() {
            -acc
        } else {
            acc
        }
    }

    /// Builds a `CFloat` under `ctx` from a native `f64`: a bit-for-bit
    /// fast path for IEEE binary64, otherwise decode the native bits
    /// into a [`BlockTriple`] and round through `convert`.
    pub fn from_f64(ctx: CFloatContext, v: f64) -> Self {
        if ctx.nbits() == 64 && ctx.es() == 11 {
            return CFloat::from_bits(ctx, BlockBinary::from_u128(64, v.to_bits() as u128));
        }
        ctx.convert(&BlockTriple::from_f64_bits(v))
    }

    /// As [`Self::from_f64`], for `f32` (with the `f32`/`es=8` fast path).
    pub fn from_f32(ctx: CFloatContext, v: f32) -> Self {
        if ctx.nbits() == 32 && ctx.es() == 8 {
            return CFloat::from_bits(ctx, BlockBinary::from_u128(32, v.to_bits() as u128));
        }
        Self::from_f64(ctx, v as f64)
    }

    pub fn to_f32(&self) -> f32 {
        if self.ctx.nbits() == 32 && self.ctx.es() == 8 {
            let mut raw: u32 = 0;
            for i in 0..32 {
                if test_bit(self.bits.blocks(), i) {
                    raw |= 1u32 << i;
                }
            }
            return f32::from_bits(raw);
        }
        self.to_f64() as f32
    }
}

impl RoundedNeg for CFloatContext {
    fn neg(&self, src: &Self::Rounded) -> Self::Rounded {
        src.neg()
    }

    fn neg_from<N: Real>(&self, src: &N) -> Self::Rounded {
        self.round_from(src).neg()
    }
}

impl RoundedAbs for CFloatContext {
    fn abs(&self, src: &Self::Rounded) -> Self::Rounded {
        src.abs()
    }

    fn abs_from<N: Real>(&self, src: &N) -> Self::Rounded {
        self.round_from(src).abs()
    }
}

impl RoundedAdd for CFloatContext {
    fn add(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded {
        src1.add(src2)
    }

    fn add_from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded {
        self.round_from(src1).add(&self.round_from(src2))
    }
}

impl RoundedSub for CFloatContext {
    fn sub(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded {
        src1.sub(src2)
    }

    fn sub_from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded {
        self.round_from(src1).sub(&self.round_from(src2))
    }
}

impl RoundedMul for CFloatContext {
    fn mul(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded {
        src1.mul(src2)
    }

    fn mul_from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded {
        self.round_from(src1).mul(&self.round_from(src2))
    }
}

impl RoundedDiv for CFloatContext {
    fn div(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded {
        src1.div(src2)
    }

    fn div_from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded {
        self.round_from(src1).div(&self.round_from(src2))
    }
}

/// Renders as the `double` projection of this value.
impl fmt::Display for CFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

/// Parses the exact-bit-pattern grammar `0b<bits>.<ebits>.<fbits>`,
/// e.g. `0b0.01111111.00000000000000000000000` for binary32's `1.0`.
impl CFloat {
    pub fn parse_with(ctx: CFloatContext, s: &str) -> Result<Self, NumError> {
        let rest = s.strip_prefix("0b").ok_or(NumError::ParseFailure { kind: "cfloat" })?;
        let mut parts = rest.split('.');
        let sign_str = parts.next().ok_or(NumError::ParseFailure { kind: "cfloat" })?;
        let exp_str = parts.next().ok_or(NumError::ParseFailure { kind: "cfloat" })?;
        let frac_str = parts.next().ok_or(NumError::ParseFailure { kind: "cfloat" })?;
        if parts.next().is_some() {
            return Err(NumError::ParseFailure { kind: "cfloat" });
        }
        if sign_str.len() != 1 || exp_str.len() != ctx.es() || frac_str.len() != ctx.f() {
            return Err(NumError::ParseFailure { kind: "cfloat" });
        }
        let sign = parse_bit(sign_str)?;
        let nbits = ctx.nbits();
        let mut blocks = vec![0u64; nbits.div_ceil(64).max(1)];
        for (i, ch) in frac_str.chars().rev().enumerate() {
            if bit_char(ch)? {
                set_bit(&mut blocks, i, true);
            }
        }
        for (i, ch) in exp_str.chars().rev().enumerate() {
            if bit_char(ch)? {
                set_bit(&mut blocks, ctx.f() + i, true);
            }
        }
        if sign {
            set_bit(&mut blocks, nbits - 1, true);
        }
        Ok(CFloat::from_bits(ctx, BlockBinary::from_blocks(nbits, blocks)))
    }
}

fn parse_bit(s: &str) -> Result<bool, NumError> {
    bit_char(s.chars().next().ok_or(NumError::ParseFailure { kind: "cfloat" })?)
}

fn bit_char(c: char) -> Result<bool, NumError> {
    match c {
        '0' => Ok(false),
        '1' => Ok(true),
        _ => Err(NumError::ParseFailure { kind: "cfloat" }),
    }
}

/// A `FromStr` impl needs a fixed `CFloatContext`, which the grammar
/// itself does not carry; [`CFloat::parse_with`] is the entry point
/// actually used. This impl exists for types that can supply one
/// canonically — the IEEE binary64 context — matching the fast path
/// used elsewhere for native-float interop.
impl FromStr for CFloat {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, NumError> {
        CFloat::parse_with(CFloatContext::new(64, 11), s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ieee_binary32_bit_pattern_decodes_to_one() {
        let ctx = CFloatContext::new(32, 8);
        let cf = CFloat::from_bits(ctx, BlockBinary::from_u128(32, 0x3F80_0000));
        assert_eq!(cf.to_f32(), 1.0);
    }

    #[test]
    fn division_round_trips_through_double() {
        let ctx = CFloatContext::new(32, 8);
        let one = CFloat::from_f32(ctx, 1.0);
        let three = CFloat::from_f32(ctx, 3.0);
        let third = one.div(&three);
        assert!((third.to_f64() - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn next_from_positive_zero_is_smallest_subnormal() {
        let ctx = CFloatContext::new(8, 2).with_subnormals(true).with_supernormals(true);
        let zero = ctx.zero(false);
        let stepped = zero.next();
        assert_eq!(stepped, ctx.minpos());
    }

    #[test]
    fn next_at_negative_zero_is_a_self_loop() {
        let ctx = CFloatContext::new(8, 2).with_subnormals(true).with_supernormals(true);
        let neg_zero = ctx.zero(true);
        let stepped = neg_zero.next();
        assert!(stepped.sign_bit());
        assert!(stepped.is_zero_value());
    }

    #[test]
    fn next_at_quiet_nan_flips_to_signaling() {
        let ctx = CFloatContext::new(8, 2).with_subnormals(true).with_supernormals(true);
        let qnan = ctx.qnan();
        let stepped = qnan.next();
        assert!(stepped.is_signaling_nan());
    }

    #[test]
    fn parse_ieee_binary32_one() {
        let text = format!("0b0.{}.{}", "01111111", "0".repeat(23));
        let ctx = CFloatContext::new(32, 8);
        let cf = CFloat::parse_with(ctx, &text).unwrap();
        assert_eq!(cf.to_f32(), 1.0);
    }
}
