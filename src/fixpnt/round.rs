use crate::blockbinary::BlockBinary;
use crate::fixpnt::number::FixedPoint;
use crate::real::Real;
use crate::round::{should_round_up, RoundingContext, RoundingMode};

/// Fixed-point overflow policy: what to do when an unbounded result
/// would exceed the format's representable range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overflow {
    /// Preserve the least-significant bits (wrap modularly).
    Wrap,
    /// Clamp to the nearest representable bound (`maxpos`/`maxneg`).
    Saturate,
}

/// Configuration for [`FixedPoint`]: total bit width `nbits`, fraction
/// width `scale` (the radix point sits `scale` bits up from the LSB),
/// rounding mode (used when converting from a wider source), and
/// overflow policy.
#[derive(Clone, Copy, Debug)]
pub struct FixedContext {
    nbits: usize,
    scale: usize,
    rm: RoundingMode,
    overflow: Overflow,
}

impl FixedContext {
    /// Constructs a new context. Default rounding mode is
    /// nearest-ties-to-even; default overflow policy is saturation.
    pub fn new(nbits: usize, scale: usize) -> Self {
        assert!(scale <= nbits, "fixpnt scale must not exceed its width");
        FixedContext {
            nbits,
            scale,
            rm: RoundingMode::NearestTiesToEven,
            overflow: Overflow::Saturate,
        }
    }

    pub fn with_rounding_mode(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn nbits(&self) -> usize {
        self.nbits
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rm
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// The zero value of this format.
    pub fn zero(&self) -> FixedPoint {
        FixedPoint {
            bits: BlockBinary::zero(self.nbits),
            ctx: *self,
        }
    }

    /// The largest representable value, `2^(nbits-1-scale) - 2^(-scale)`.
    pub fn maxpos(&self) -> FixedPoint {
        let bits = BlockBinary::from_i128(self.nbits, (1i128 << (self.nbits - 1)) - 1);
        FixedPoint { bits, ctx: *self }
    }

    /// The smallest (most negative) representable value,
    /// `-2^(nbits-1-scale)`.
    pub fn maxneg(&self) -> FixedPoint {
        let bits = BlockBinary::from_i128(self.nbits, -(1i128 << (self.nbits - 1)));
        FixedPoint { bits, ctx: *self }
    }

    /// Clamps (or, under `Overflow::Wrap`, truncates) `bits` — computed
    /// at a width `>= self.nbits` — down into this context's width.
    pub(crate) fn apply_overflow(&self, bits: BlockBinary<u64>) -> BlockBinary<u64> {
        match self.overflow {
            Overflow::Wrap => bits.resize(self.nbits),
            Overflow::Saturate => {
                let truncated = bits.resize(self.nbits);
                let reextended = truncated.sign_extend(bits.nbits());
                if reextended == bits {
                    truncated
                } else if bits.sign_bit() {
                    self.maxneg().bits
                } else {
                    self.maxpos().bits
                }
            }
        }
    }
}

impl RoundingContext for FixedContext {
    type Rounded = FixedPoint;

    fn round(&self, val: &Self::Rounded) -> Self::Rounded {
        self.round_from(val)
    }

    fn round_from<T: Real>(&self, val: &T) -> Self::Rounded {
        if val.is_zero() || !val.is_finite() {
            return self.zero();
        }
        let sign = val.sign();
        let c = val.c().expect("finite non-zero Real must have a significand");
        let exp = val.exp().expect("finite non-zero Real must have an exponent");

        // value = c * 2^exp; storage = value * 2^scale = c * 2^(exp + scale)
        let shift = exp + self.scale as isize;
        let mag = if shift >= 0 {
            let widened = c.resize(c.nbits() + shift as usize);
            widened << (shift as usize)
        } else {
            let drop = (-shift) as usize;
            let (_, direction) = self.rm.to_direction(sign);
            let decision = c.rounding_mode(drop - 1);
            let truncated = c.clone() >> drop;
            let lsb_is_one = crate::block::test_bit(truncated.blocks(), 0);
            // The guard/round/sticky oracle only distinguishes "less than
            // half", "exactly half", and "more than half" a ULP was
            // discarded — exactly what nearest-ties-to-even needs.
            // Directed (non-nearest) modes reuse this tri-state decision
            // as a reasonable approximation: "more than half lost" still
            // rounds away from zero, a non-tie exact case still truncates.
            if should_round_up(decision, &direction, lsb_is_one) {
                truncated + BlockBinary::from_i128(truncated.nbits(), 1)
            } else {
                truncated
            }
        };

        let widened = mag.resize(self.nbits + 1);
        let signed = if sign { widened.negate() } else { widened };
        let bits = self.apply_overflow(signed);
        FixedPoint { bits, ctx: *self }
    }
}
