use std::cmp::Ordering;

use crate::blockbinary::BlockBinary;
use crate::cfloat::CFloatContext;
use crate::real::Real;

/// A decoded view of a [`CFloat`]'s membership, derived purely from its
/// bit pattern: the discriminant is never stored separately, only ever
/// derived from the bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Zero,
    Subnormal,
    Normal,
    Supernormal,
    Infinite,
    Nan,
}

/// An `N`-bit configurable IEEE-754-style floating-point encoding: 1
/// sign bit, `ES` exponent bits, `F = N - 1 - ES` fraction bits, with
/// policy-controlled subnormals, supernormals, and saturation carried
/// on [`CFloatContext`].
///
/// Like [`crate::integer::Integer`] and [`crate::fixpnt::FixedPoint`],
/// this crate fixes the storage block type to `u64` and carries `N`/`ES`
/// at runtime on the context rather than as const generics; see
/// `DESIGN.md`.
#[derive(Clone, Debug)]
pub struct CFloat {
    pub(crate) bits: BlockBinary<u64>,
    pub(crate) ctx: CFloatContext,
}

impl CFloat {
    pub fn ctx(&self) -> &CFloatContext {
        &self.ctx
    }

    pub fn bits(&self) -> &BlockBinary<u64> {
        &self.bits
    }

    pub(crate) fn from_bits(ctx: CFloatContext, bits: BlockBinary<u64>) -> Self {
        CFloat { bits, ctx }
    }

    /// The sign bit (MSB).
    pub fn sign_bit(&self) -> bool {
        crate::block::test_bit(self.bits.blocks(), self.ctx.nbits() - 1)
    }

    /// The raw biased exponent field, as an unsigned value.
    pub fn exponent_field(&self) -> u128 {
        let mut v: u128 = 0;
        for i in 0..self.ctx.es() {
            if crate::block::test_bit(self.bits.blocks(), self.ctx.f() + i) {
                v |= 1u128 << i;
            }
        }
        v
    }

    /// The raw fraction field, as an unsigned value.
    pub fn fraction_field(&self) -> u128 {
        let mut v: u128 = 0;
        for i in 0..self.ctx.f() {
            if crate::block::test_bit(self.bits.blocks(), i) {
                v |= 1u128 << i;
            }
        }
        v
    }

    /// Derives this value's [`Encoding`] class purely from its bits.
    pub fn encoding(&self) -> Encoding {
        let ctx = &self.ctx;
        let exp_field = self.exponent_field();
        let frac = self.fraction_field();
        if exp_field == 0 {
            if frac == 0 {
                Encoding::Zero
            } else {
                Encoding::Subnormal
            }
        } else if exp_field == ctx.all_ones_exp() {
            if frac == ctx.all_ones_frac() {
                Encoding::Nan
            } else if frac == ctx.inf_encoding() {
                Encoding::Infinite
            } else if ctx.sup() {
                Encoding::Supernormal
            } else {
                Encoding::Nan
            }
        } else {
            Encoding::Normal
        }
    }

    pub fn is_zero_value(&self) -> bool {
        matches!(self.encoding(), Encoding::Zero)
    }

    pub fn is_nan_value(&self) -> bool {
        matches!(self.encoding(), Encoding::Nan)
    }

    pub fn is_infinite_value(&self) -> bool {
        matches!(self.encoding(), Encoding::Infinite)
    }

    pub fn is_normal(&self) -> bool {
        matches!(self.encoding(), Encoding::Normal)
    }

    pub fn is_denormal(&self) -> bool {
        matches!(self.encoding(), Encoding::Subnormal)
    }

    pub fn is_supernormal(&self) -> bool {
        matches!(self.encoding(), Encoding::Supernormal)
    }

    /// True for a signalling NaN (sign bit set on the NaN encoding);
    /// meaningless (returns `false`) on anything else.
    pub fn is_signaling_nan(&self) -> bool {
        self.is_nan_value() && self.sign_bit()
    }

    /// Flips the sign bit in place, leaving every other bit untouched.
    pub(crate) fn negate_bits(&self) -> Self {
        let mut blocks = self.bits.blocks().to_vec();
        let sign_pos = self.ctx.nbits() - 1;
        let was_set = crate::block::test_bit(&blocks, sign_pos);
        crate::block::set_bit(&mut blocks, sign_pos, !was_set);
        CFloat {
            bits: BlockBinary::from_blocks(self.ctx.nbits(), blocks),
            ctx: self.ctx,
        }
    }
}

impl PartialEq for CFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.is_nan_value() || other.is_nan_value() {
            return false;
        }
        if self.is_zero_value() && other.is_zero_value() {
            return true;
        }
        self.bits == other.bits
    }
}

impl PartialOrd for CFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan_value() || other.is_nan_value() {
            return None;
        }
        match (self.sign_bit(), other.sign_bit()) {
            (true, false) if !self.is_zero_value() || !other.is_zero_value() => Some(Ordering::Less),
            (false, true) if !self.is_zero_value() || !other.is_zero_value() => Some(Ordering::Greater),
            (false, false) => Some(self.bits.cmp(&other.bits)),
            // Both negative: larger magnitude bit pattern is the smaller value.
            _ => Some(other.bits.cmp(&self.bits)),
        }
    }
}

impl Real for CFloat {
    fn sign(&self) -> bool {
        self.sign_bit()
    }

    fn exp(&self) -> Option<isize> {
        self.ctx.decode(&self.bits).exp()
    }

    fn e(&self) -> Option<isize> {
        self.ctx.decode(&self.bits).e()
    }

    fn n(&self) -> Option<isize> {
        self.exp()
    }

    fn c(&self) -> Option<BlockBinary<u64>> {
        self.ctx.decode(&self.bits).c()
    }

    fn m(&self) -> Option<BlockBinary<u64>> {
        self.ctx.decode(&self.bits).m()
    }

    fn p(&self) -> usize {
        self.ctx.decode(&self.bits).p()
    }

    fn is_nar(&self) -> bool {
        self.is_nan_value() || self.is_infinite_value()
    }

    fn is_finite(&self) -> bool {
        !self.is_nar()
    }

    fn is_infinite(&self) -> bool {
        self.is_infinite_value()
    }

    fn is_zero(&self) -> bool {
        self.is_zero_value()
    }

    fn is_negative(&self) -> Option<bool> {
        if self.is_nan_value() {
            None
        } else {
            Some(self.sign_bit() && !self.is_zero_value())
        }
    }

    fn is_numerical(&self) -> bool {
        !self.is_nan_value()
    }
}
