use crate::block::test_bit;
use crate::blockbinary::BlockBinary;
use crate::blocktriple::BlockTriple;
use crate::cfloat::number::CFloat;
use crate::real::Real;
use crate::round::{should_round_up, RoundingContext, RoundingMode};

/// Configuration for [`CFloat`]: total bit width `nbits`, exponent width
/// `es`, and the three policy flags — `sub` (subnormals),
/// `sup` (supernormals), `sat` (saturate instead of projecting to ±∞ on
/// overflow) — plus a rounding mode for native-float ingress.
#[derive(Clone, Copy, Debug)]
pub struct CFloatContext {
    nbits: usize,
    es: usize,
    sub: bool,
    sup: bool,
    sat: bool,
    trap_on_nan: bool,
    rm: RoundingMode,
}

impl CFloatContext {
    /// Constructs a new context. `N > ES + 1` and `1 <= ES <= 20`;
    /// subnormals and supernormals are off and saturation is off by
    /// default, matching IEEE-754's own projective behavior at the
    /// range boundary — except at `ES = 1`, where spec.md §3 requires
    /// both on unconditionally (an `ES = 1` encoding has only two
    /// exponent codes, too few to reserve one for NaN/Inf and still
    /// have a normal range), so they default on there and
    /// `with_subnormals`/`with_supernormals` refuse to turn either off.
    pub fn new(nbits: usize, es: usize) -> Self {
        assert!(nbits > es + 1, "cfloat needs at least one fraction bit");
        assert!((1..=20).contains(&es), "cfloat exponent width must be in 1..=20");
        let mandatory = es == 1;
        CFloatContext {
            nbits,
            es,
            sub: mandatory,
            sup: mandatory,
            sat: false,
            trap_on_nan: false,
            rm: RoundingMode::NearestTiesToEven,
        }
    }

    pub fn with_subnormals(mut self, sub: bool) -> Self {
        assert!(sub || self.es != 1, "cfloat with es=1 requires subnormals enabled");
        self.sub = sub;
        self
    }

    pub fn with_supernormals(mut self, sup: bool) -> Self {
        assert!(sup || self.es != 1, "cfloat with es=1 requires supernormals enabled");
        self.sup = sup;
        self
    }

    pub fn with_saturating(mut self, sat: bool) -> Self {
        self.sat = sat;
        self
    }

    /// Enables or disables strict mode for signalling NaN operands:
    /// when enabled, [`CFloat::add_checked`]/`sub_checked`/`mul_checked`/
    /// `div_checked` fail with [`crate::NumError::OperandIsNan`] instead
    /// of quietly producing the usual NaN-contagion result.
    pub fn with_trap_on_nan(mut self, trap: bool) -> Self {
        self.trap_on_nan = trap;
        self
    }

    pub fn traps_on_nan(&self) -> bool {
        self.trap_on_nan
    }

    pub fn with_rounding_mode(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    pub fn nbits(&self) -> usize {
        self.nbits
    }

    pub fn es(&self) -> usize {
        self.es
    }

    /// `F = N - 1 - ES`, the trailing fraction width.
    pub fn f(&self) -> usize {
        self.nbits - 1 - self.es
    }

    pub fn sub(&self) -> bool {
        self.sub
    }

    pub fn sup(&self) -> bool {
        self.sup
    }

    pub fn sat(&self) -> bool {
        self.sat
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rm
    }

    /// `2^(ES-1) - 1`.
    pub fn exp_bias(&self) -> isize {
        (1isize << (self.es - 1)) - 1
    }

    /// The reserved all-ones exponent field value, `2^ES - 1`.
    pub fn all_ones_exp(&self) -> u128 {
        (1u128 << self.es) - 1
    }

    /// The reserved all-ones fraction field value, `2^F - 1` (the qNaN /
    /// sNaN pattern).
    pub fn all_ones_frac(&self) -> u128 {
        if self.f() == 0 {
            0
        } else {
            (1u128 << self.f()) - 1
        }
    }

    /// `111...10`: all-ones with the LSB cleared — the fraction pattern
    /// reserved for ±∞.
    pub fn inf_encoding(&self) -> u128 {
        self.all_ones_frac() & !1u128
    }

    /// The unbiased exponent of the largest normal, `(2^ES - 2) - bias`.
    /// At `ES = 1` this formula collapses to `0`, but with `Sup`
    /// mandatory at that width (see [`Self::new`]) the all-ones exponent
    /// field is itself a valid supernormal rather than the NaN/Inf
    /// reservation, so the largest representable exponent is `1`, not
    /// `0` — matching the original `cfloat` implementation's `ES == 1`
    /// special case.
    pub fn max_exp(&self) -> isize {
        if self.es == 1 {
            1
        } else {
            self.all_ones_exp() as isize - 1 - self.exp_bias()
        }
    }

    /// The unbiased exponent of the smallest normal, `1 - bias`.
    pub fn min_exp_normal(&self) -> isize {
        1 - self.exp_bias()
    }

    /// The unbiased exponent of the LSB of the smallest subnormal,
    /// `min_exp_normal - F`.
    pub fn min_exp_subnormal(&self) -> isize {
        self.min_exp_normal() - self.f() as isize
    }

    /// `reciprocal_shift[ES] = bias - 1`: the constant such that a
    /// subnormal result's right-shift amount is
    /// `-(exponent + reciprocal_shift)`. It falls out of requiring that
    /// shift to equal `min_exp_normal - exponent`.
    pub fn reciprocal_shift(&self) -> isize {
        self.exp_bias() - 1
    }

    fn assemble(&self, sign: bool, biased_exp: u128, fraction: u128) -> BlockBinary<u64> {
        let mut blocks = vec![0u64; self.nbits.div_ceil(64).max(1)];
        for i in 0..self.f() {
            if ((fraction >> i) & 1) == 1 {
                crate::block::set_bit(&mut blocks, i, true);
            }
        }
        for i in 0..self.es {
            if ((biased_exp >> i) & 1) == 1 {
                crate::block::set_bit(&mut blocks, self.f() + i, true);
            }
        }
        if sign {
            crate::block::set_bit(&mut blocks, self.nbits - 1, true);
        }
        BlockBinary::from_blocks(self.nbits, blocks)
    }

    pub fn zero(&self, sign: bool) -> CFloat {
        CFloat::from_bits(*self, self.assemble(sign, 0, 0))
    }

    pub fn infinity(&self, sign: bool) -> CFloat {
        CFloat::from_bits(*self, self.assemble(sign, self.all_ones_exp(), self.inf_encoding()))
    }

    /// NaN of this format; the sign bit itself is the signalling flag
    /// (sign=1 is sNaN, sign=0 is qNaN), not a free sign.
    pub fn nan(&self, signaling: bool) -> CFloat {
        CFloat::from_bits(*self, self.assemble(signaling, self.all_ones_exp(), self.all_ones_frac()))
    }

    /// The quiet NaN of this format (sign bit clear).
    pub fn qnan(&self) -> CFloat {
        self.nan(false)
    }

    /// The signalling NaN of this format (sign bit set).
    pub fn snan(&self) -> CFloat {
        self.nan(true)
    }

    /// The smallest positive representable value: the smallest
    /// subnormal if `sub` is enabled, else the smallest normal.
    pub fn minpos(&self) -> CFloat {
        if self.sub {
            CFloat::from_bits(*self, self.assemble(false, 0, 1))
        } else {
            CFloat::from_bits(*self, self.assemble(false, 1, 0))
        }
    }

    pub fn minneg(&self) -> CFloat {
        self.minpos().negate_bits()
    }

    /// The largest finite representable value (the largest normal, or
    /// the largest supernormal if `sup` is enabled).
    pub fn maxpos(&self) -> CFloat {
        if self.sup {
            CFloat::from_bits(*self, self.assemble(false, self.all_ones_exp(), self.inf_encoding() - 1))
        } else {
            CFloat::from_bits(*self, self.assemble(false, self.all_ones_exp() - 1, self.all_ones_frac()))
        }
    }

    pub fn maxneg(&self) -> CFloat {
        self.maxpos().negate_bits()
    }

    fn signed_maxbound(&self, sign: bool) -> CFloat {
        if sign {
            self.maxneg()
        } else {
            self.maxpos()
        }
    }

    /// Decodes a raw bit pattern into the [`BlockTriple`] normal form
    /// arithmetic is computed in. Special-value membership is derived
    /// purely from the exponent/fraction fields, never stored
    /// separately as its own discriminant.
    pub fn decode(&self, bits: &BlockBinary<u64>) -> BlockTriple {
        let sign = test_bit(bits.blocks(), self.nbits - 1);
        let exp_field = field(bits, self.f(), self.es());
        let frac = field(bits, 0, self.f());

        if exp_field == 0 {
            if frac == 0 {
                return BlockTriple::zero(sign);
            }
            // Subnormal: value = frac * 2^min_exp_subnormal, regardless of
            // whether `sub` policy is set — decoding an existing pattern
            // is not gated by the policy that produced it.
            return BlockTriple::finite(
                sign,
                self.min_exp_subnormal(),
                BlockBinary::from_u128(self.f().max(1), frac),
            );
        }

        if exp_field == self.all_ones_exp() {
            if frac == self.all_ones_frac() {
                return BlockTriple::nan(sign, sign);
            }
            if frac == self.inf_encoding() {
                return BlockTriple::infinity(sign);
            }
            if self.sup {
                // Supernormal: the same hidden-bit-plus-fraction shape
                // as a normal, just one exponent step past the largest
                // normal — a deliberate simplification relative to a
                // denser supernormal encoding scheme, documented in
                // `DESIGN.md`.
                let significant = (1u128 << self.f()) | frac;
                let exp = self.all_ones_exp() as isize - self.exp_bias() - self.f() as isize;
                return BlockTriple::finite(sign, exp, BlockBinary::from_u128(self.f() + 2, significant));
            }
            return BlockTriple::nan(sign, sign);
        }

        let significant = (1u128 << self.f()) | frac;
        let exp = exp_field as isize - self.exp_bias() - self.f() as isize;
        BlockTriple::finite(sign, exp, BlockBinary::from_u128(self.f() + 2, significant))
    }

    /// Re-encodes an (extended-precision) [`BlockTriple`] into this
    /// context's bit pattern: special values short
    /// circuit, then the result is range-checked and, in range, rounded
    /// to `F` fraction bits at whatever biased exponent it lands on.
    pub fn convert(&self, triple: &BlockTriple) -> CFloat {
        if triple.is_nan() {
            return self.nan(triple.is_signaling());
        }
        if triple.is_infinite() {
            return self.infinity(triple.sign());
        }
        if triple.is_zero() {
            return self.zero(triple.sign());
        }

        let sign = triple.sign();
        let exponent = triple.scale();
        let underflow_bound = if self.sub { self.min_exp_subnormal() } else { self.min_exp_normal() };

        if exponent < underflow_bound {
            if self.sub && self.halfway_rounds_up_to_minpos(triple) {
                return self.apply_sign(self.minpos(), sign);
            }
            return self.zero(sign);
        }
        if exponent > self.max_exp() {
            return if self.sat { self.signed_maxbound(sign) } else { self.infinity(sign) };
        }

        let is_subnormal_result = exponent < self.min_exp_normal();
        let adjustment = if is_subnormal_result {
            (-(exponent + self.reciprocal_shift())) as usize
        } else {
            0
        };
        let (_, direction) = self.rm.to_direction(sign);
        let (round_up, shift) = triple.rounding_decision(self.f(), adjustment, &direction);
        let mut fraction = extract_bits(triple.significant(), shift, self.f());
        if round_up {
            fraction += 1;
        }

        let mut biased_exp: u128 = if is_subnormal_result {
            0
        } else {
            (exponent + self.exp_bias()) as u128
        };
        if fraction == 1u128 << self.f() {
            fraction = 0;
            biased_exp += 1;
        }
        if biased_exp == self.all_ones_exp() {
            fraction = self.inf_encoding();
        }

        let encoded = CFloat::from_bits(*self, self.assemble(sign, biased_exp, fraction));
        if encoded.is_nan_value() {
            // Mandatory post-process: rounding overflow must never
            // manufacture a NaN.
            return if self.sat { self.signed_maxbound(sign) } else { self.infinity(sign) };
        }
        encoded
    }

    fn apply_sign(&self, val: CFloat, sign: bool) -> CFloat {
        if val.sign_bit() == sign {
            val
        } else {
            val.negate_bits()
        }
    }

    fn halfway_rounds_up_to_minpos(&self, triple: &BlockTriple) -> bool {
        let boundary = self.min_exp_subnormal();
        let local_pos = (boundary - 1 - triple.exp_lsb()).max(0) as usize;
        let decision = triple.significant().rounding_mode(local_pos);
        let (_, direction) = self.rm.to_direction(triple.sign());
        should_round_up(decision, &direction, false)
    }
}

fn field(bits: &BlockBinary<u64>, start: usize, width: usize) -> u128 {
    let mut v: u128 = 0;
    for i in 0..width {
        if test_bit(bits.blocks(), start + i) {
            v |= 1u128 << i;
        }
    }
    v
}

fn extract_bits(significant: &BlockBinary<u64>, shift: usize, count: usize) -> u128 {
    let mut v: u128 = 0;
    for i in 0..count {
        if test_bit(significant.blocks(), shift + i) {
            v |= 1u128 << i;
        }
    }
    v
}

impl RoundingContext for CFloatContext {
    type Rounded = CFloat;

    fn round(&self, val: &Self::Rounded) -> Self::Rounded {
        self.convert(&self.decode(val.bits()))
    }

    fn round_from<T: Real>(&self, val: &T) -> Self::Rounded {
        if val.is_nar() {
            return if val.is_infinite() {
                self.infinity(val.sign())
            } else {
                self.qnan()
            };
        }
        if val.is_zero() {
            return self.zero(val.sign());
        }
        let exp = val.exp().expect("finite non-zero Real must have an exponent");
        let c = val.c().expect("finite non-zero Real must have a significand");
        let triple = BlockTriple::finite(val.sign(), exp, c.resize(c.nbits() + 2));
        self.convert(&triple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn es_one_defaults_to_mandatory_sub_and_sup_and_max_exp_one() {
        let ctx = CFloatContext::new(3, 1);
        assert!(ctx.sub());
        assert!(ctx.sup());
        assert_eq!(ctx.max_exp(), 1);
    }

    #[test]
    #[should_panic(expected = "subnormals")]
    fn es_one_rejects_disabling_subnormals() {
        CFloatContext::new(3, 1).with_subnormals(false);
    }

    #[test]
    #[should_panic(expected = "supernormals")]
    fn es_one_rejects_disabling_supernormals() {
        CFloatContext::new(3, 1).with_supernormals(false);
    }

    #[test]
    fn ieee_binary32_fast_path_decodes_one() {
        let ctx = CFloatContext::new(32, 8);
        let bits = BlockBinary::<u64>::from_u128(32, 0x3F800000);
        let cf = CFloat::from_bits(ctx, bits);
        let triple = ctx.decode(cf.bits());
        assert_eq!(triple.scale(), 0);
        assert!(!triple.sign());
    }

    #[test]
    fn overflow_without_saturation_projects_to_infinity() {
        let ctx = CFloatContext::new(8, 2).with_subnormals(true).with_supernormals(true);
        let sum = ctx.maxpos().bits.clone();
        let triple_a = ctx.decode(&sum);
        let triple = BlockTriple::add(&triple_a, &triple_a);
        let result = ctx.convert(&triple);
        assert!(result.is_infinite_value());
        assert!(!result.sign_bit());
    }

    #[test]
    fn overflow_with_saturation_clamps_to_maxpos() {
        let ctx = CFloatContext::new(8, 2)
            .with_subnormals(true)
            .with_supernormals(true)
            .with_saturating(true);
        let triple_a = ctx.decode(ctx.maxpos().bits());
        let triple = BlockTriple::add(&triple_a, &triple_a);
        let result = ctx.convert(&triple);
        assert_eq!(result, ctx.maxpos());
    }

    #[test]
    fn signaling_nan_plus_one_stays_signaling() {
        let ctx = CFloatContext::new(8, 2).with_subnormals(true).with_supernormals(true);
        let snan = ctx.decode(ctx.snan().bits());
        let one = ctx.decode(ctx.minpos().bits());
        let result = ctx.convert(&BlockTriple::add(&snan, &one));
        assert!(result.is_nan_value());
        assert!(result.is_signaling_nan());
    }

    #[test]
    fn catastrophic_cancellation_renormalizes_before_rounding() {
        // 1040.0 (exp_field=25, frac=16) - 1024.0 (exp_field=25, frac=0)
        // = 16.0 exactly; the subtraction cancels down to a 5-bit
        // significant, well short of F=10 fraction bits, and must
        // renormalize before `convert` extracts the fraction.
        let ctx = CFloatContext::new(16, 5);
        let a = CFloat::parse_with(ctx, "0b0.11001.0000010000").unwrap();
        let b = CFloat::parse_with(ctx, "0b0.11001.0000000000").unwrap();
        let triple = BlockTriple::sub(&ctx.decode(a.bits()), &ctx.decode(b.bits()));
        let result = ctx.convert(&triple);
        assert_eq!(result.to_f64(), 16.0);
    }
}
