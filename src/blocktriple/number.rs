use crate::blockbinary::BlockBinary;
use crate::real::Real;
use crate::round::{should_round_up, RoundingDirection};

/// The class of value a [`BlockTriple`] carries: zero, finite, infinite,
/// or NaN. Finite values store their magnitude in `significant`/`exp`;
/// the other variants are pure tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Zero,
    Finite,
    Infinite,
    Nan { signaling: bool },
}

/// The internal arithmetic normal form `cfloat` operations are computed
/// in: `(-1)^sign * significant * 2^exp`, where `significant` is a
/// non-negative integer magnitude of whatever width the producing
/// operation needs (representation width for a decoded value, the full
/// `2N`-bit product for a multiply, ...).
///
/// This type carries no `Op` type tag: `add`/`mul`/`div` each build a
/// result of the width they naturally produce (the same way
/// [`BlockBinary::urmul`] returns a `2N`-bit product without a
/// caller-chosen output width), rather than branching on a stored
/// discriminant. The width growth each operator needs falls out of
/// this directly.
#[derive(Clone, Debug)]
pub struct BlockTriple {
    pub(crate) sign: bool,
    pub(crate) exp: isize,
    pub(crate) significant: BlockBinary<u64>,
    pub(crate) kind: Kind,
}

impl BlockTriple {
    /// Signed zero.
    pub fn zero(sign: bool) -> Self {
        BlockTriple {
            sign,
            exp: 0,
            significant: BlockBinary::zero(1),
            kind: Kind::Zero,
        }
    }

    /// Signed infinity.
    pub fn infinity(sign: bool) -> Self {
        BlockTriple {
            sign,
            exp: 0,
            significant: BlockBinary::zero(1),
            kind: Kind::Infinite,
        }
    }

    /// NaN; `signaling` distinguishes sNaN (contagious and trap-eligible)
    /// from qNaN.
    pub fn nan(sign: bool, signaling: bool) -> Self {
        BlockTriple {
            sign,
            exp: 0,
            significant: BlockBinary::zero(1),
            kind: Kind::Nan { signaling },
        }
    }

    /// A finite value `(-1)^sign * significant * 2^exp`. A zero
    /// `significant` collapses to [`Self::zero`] regardless of `exp`,
    /// since there is no distinct "zero at a scale" state.
    pub fn finite(sign: bool, exp: isize, significant: BlockBinary<u64>) -> Self {
        if significant.is_zero_value() {
            return Self::zero(sign);
        }
        BlockTriple {
            sign,
            exp,
            significant,
            kind: Kind::Finite,
        }
    }

    pub fn sign(&self) -> bool {
        self.sign
    }

    /// For a finite, non-zero value: the exponent of the LSB of
    /// `significant`, i.e. `value = significant * 2^exp`.
    pub fn exp_lsb(&self) -> isize {
        self.exp
    }

    pub fn significant(&self) -> &BlockBinary<u64> {
        &self.significant
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.kind, Kind::Zero)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self.kind, Kind::Infinite)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.kind, Kind::Nan { .. })
    }

    pub fn is_signaling(&self) -> bool {
        matches!(self.kind, Kind::Nan { signaling: true })
    }

    /// The binary exponent of the leading set bit: `scale` in the
    /// `(-1)^s * significant * 2^(scale - radix)` framing, i.e. `e()` of
    /// [`Real`] but returning a bare `isize` since this is only ever
    /// called on finite, non-zero triples.
    pub fn scale(&self) -> isize {
        self.exp + self.significant.find_msb().max(0) as isize
    }

    /// Negates in place of sign; every `Kind` (including zero, infinity,
    /// and NaN) carries a sign, so this just flips the flag.
    pub fn negate(&self) -> Self {
        BlockTriple { sign: !self.sign, ..self.clone() }
    }

    /// Decodes a native `f64`'s IEEE-754 bit pattern into the triple it
    /// represents, shared by every format in this crate whose native-float
    /// ingress is not an exact bit-for-bit fast path.
    pub fn from_f64_bits(v: f64) -> Self {
        let bits = v.to_bits();
        let sign = bits >> 63 == 1;
        let exp_field = ((bits >> 52) & 0x7FF) as i64;
        let frac = bits & 0xF_FFFF_FFFF_FFFF;
        if exp_field == 0x7FF {
            return if frac == 0 {
                BlockTriple::infinity(sign)
            } else {
                BlockTriple::nan(sign, (frac & (1 << 51)) == 0)
            };
        }
        if exp_field == 0 && frac == 0 {
            return BlockTriple::zero(sign);
        }
        let (significant, exp) = if exp_field == 0 {
            (frac as u128, -1074i64)
        } else {
            ((frac as u128) | (1u128 << 52), exp_field as i64 - 1075)
        };
        BlockTriple::finite(sign, exp as isize, BlockBinary::from_u128(54, significant))
    }

    /// The rounding-decision oracle: given that the target encoding
    /// keeps `frac_bits` bits below the hidden bit, plus an additional
    /// `adjustment` bits of right shift (non-zero only when the target
    /// lands in its subnormal region and must shift further right
    /// before rounding, inside `convert`), returns whether to round up
    /// and the total right shift needed to align `significant` to the
    /// target's LSB. `direction` resolves an exact tie, per the target
    /// context's configured rounding mode.
    pub fn rounding_decision(&self, frac_bits: usize, adjustment: usize, direction: &RoundingDirection) -> (bool, usize) {
        let msb = self.significant.find_msb().max(0) as usize;
        let natural_shift = msb.saturating_sub(frac_bits);
        let shift = natural_shift + adjustment;
        if shift == 0 {
            return (false, 0);
        }
        let decision = self.significant.rounding_mode(shift - 1);
        let lsb_is_one = crate::block::test_bit(self.significant.blocks(), shift);
        let up = should_round_up(decision, direction, lsb_is_one);
        (up, shift)
    }
}

impl Real for BlockTriple {
    fn sign(&self) -> bool {
        self.sign
    }

    fn exp(&self) -> Option<isize> {
        if matches!(self.kind, Kind::Finite) {
            Some(self.exp)
        } else {
            None
        }
    }

    fn e(&self) -> Option<isize> {
        if matches!(self.kind, Kind::Finite) {
            Some(self.scale())
        } else {
            None
        }
    }

    fn n(&self) -> Option<isize> {
        self.exp()
    }

    fn c(&self) -> Option<BlockBinary<u64>> {
        match self.kind {
            Kind::Finite => Some(self.significant.clone()),
            Kind::Zero => Some(BlockBinary::zero(1)),
            _ => None,
        }
    }

    fn m(&self) -> Option<BlockBinary<u64>> {
        self.c().map(|mag| if self.sign { mag.negate() } else { mag })
    }

    fn p(&self) -> usize {
        if matches!(self.kind, Kind::Finite) {
            self.significant.p()
        } else {
            0
        }
    }

    fn is_nar(&self) -> bool {
        matches!(self.kind, Kind::Infinite | Kind::Nan { .. })
    }

    fn is_finite(&self) -> bool {
        matches!(self.kind, Kind::Zero | Kind::Finite)
    }

    fn is_infinite(&self) -> bool {
        BlockTriple::is_infinite(self)
    }

    fn is_zero(&self) -> bool {
        BlockTriple::is_zero(self)
    }

    fn is_negative(&self) -> Option<bool> {
        if matches!(self.kind, Kind::Nan { .. }) {
            None
        } else {
            Some(self.sign && !BlockTriple::is_zero(self))
        }
    }

    fn is_numerical(&self) -> bool {
        !matches!(self.kind, Kind::Nan { .. })
    }
}
