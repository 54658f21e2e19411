use std::cmp::Ordering;

use crate::blockbinary::BlockBinary;
use crate::fixpnt::FixedContext;
use crate::real::Real;
use crate::round::RoundingContext;

/// A binary fixed-point value: an `N`-bit two's-complement
/// integer `bits` whose numerical value is `bits * 2^(-scale)`.
#[derive(Clone, Debug)]
pub struct FixedPoint {
    pub(crate) bits: BlockBinary<u64>,
    pub(crate) ctx: FixedContext,
}

impl FixedPoint {
    pub fn ctx(&self) -> &FixedContext {
        &self.ctx
    }

    pub fn bits(&self) -> &BlockBinary<u64> {
        &self.bits
    }

    /// Assigns from a native integer `v`: `bb = v << scale`, saturating
    /// or wrapping per policy if that overflows the format.
    pub fn from_i128(ctx: FixedContext, v: i128) -> Self {
        let shifted = BlockBinary::<u64>::from_i128(ctx.nbits() + ctx.scale() + 1, v) << ctx.scale();
        let bits = ctx.apply_overflow(shifted);
        FixedPoint { bits, ctx }
    }

    /// Assigns from a native `f64`: decodes sign/exponent/mantissa,
    /// shifts so the radix lands at bit `scale`, and rounds
    /// ties-to-even over the discarded guard/round/sticky bits via the
    /// same [`crate::round::RoundingContext::round_from`] path every
    /// other format's rounding conversion goes through, saturating or
    /// wrapping the result per the context's overflow policy.
    pub fn from_f64(ctx: FixedContext, v: f64) -> Self {
        ctx.round_from(&crate::blocktriple::BlockTriple::from_f64_bits(v))
    }

    /// As [`Self::from_f64`], for `f32`.
    pub fn from_f32(ctx: FixedContext, v: f32) -> Self {
        Self::from_f64(ctx, v as f64)
    }

    /// Reconstructs the value as an `f64` by summing each set bit's
    /// weight `2^(i - scale)`; this crate has no `long double` to
    /// target, so there is no wider-precision variant.
    pub fn to_f64(&self) -> f64 {
        let (sign, mag) = self.bits.magnitude();
        let mut acc = 0.0f64;
        for i in 0..mag.nbits() {
            if crate::block::test_bit(mag.blocks(), i) {
                acc += 2f64.powi(i as i32 - self.ctx.scale() as i32);
            }
        }
        if sign {
            -acc
        } else {
            acc
        }
    }
}

impl Real for FixedPoint {
    fn sign(&self) -> bool {
        self.bits.sign()
    }

    fn exp(&self) -> Option<isize> {
        if self.bits.is_zero() {
            None
        } else {
            Some(-(self.ctx.scale() as isize))
        }
    }

    fn e(&self) -> Option<isize> {
        self.bits.e().map(|e| e - self.ctx.scale() as isize)
    }

    fn n(&self) -> Option<isize> {
        self.exp()
    }

    fn c(&self) -> Option<BlockBinary<u64>> {
        self.bits.c()
    }

    fn m(&self) -> Option<BlockBinary<u64>> {
        self.bits.m()
    }

    fn p(&self) -> usize {
        self.bits.p()
    }

    fn is_nar(&self) -> bool {
        false
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn is_infinite(&self) -> bool {
        false
    }

    fn is_zero(&self) -> bool {
        self.bits.is_zero()
    }

    fn is_negative(&self) -> Option<bool> {
        self.bits.is_negative()
    }

    fn is_numerical(&self) -> bool {
        true
    }
}

impl PartialEq for FixedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for FixedPoint {}

impl PartialOrd for FixedPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.bits.partial_cmp(&other.bits)
    }
}

impl Ord for FixedPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits.cmp(&other.bits)
    }
}
