use std::cmp::Ordering;

use crate::block::{self, Block, RoundingDecision};
use crate::error::NumError;
use crate::real::Real;

/// A signed two's-complement integer over `⌈N/|B|⌉` blocks of type `B`.
///
/// `N` (the bit width) is carried at runtime in `nbits`, not as a const
/// generic. Every public constructor and mutator re-establishes the
/// padding invariant: bits at positions `>= nbits` are always zero in
/// storage, even though the value they encode is sign-extended.
#[derive(Clone, Debug)]
pub struct BlockBinary<B: Block> {
    pub(crate) nbits: usize,
    pub(crate) blocks: Vec<B>,
}

fn nblocks_for<B: Block>(nbits: usize) -> usize {
    nbits.div_ceil(B::BITS as usize).max(1)
}

impl<B: Block> BlockBinary<B> {
    /// Constructs the zero value of the given bit width.
    pub fn zero(nbits: usize) -> Self {
        assert!(nbits > 0, "blockbinary must have at least one bit");
        BlockBinary {
            nbits,
            blocks: vec![B::zero(); nblocks_for::<B>(nbits)],
        }
    }

    /// Constructs from a signed native value, sign-extending into the
    /// full `nbits` width.
    pub fn from_i128(nbits: usize, v: i128) -> Self {
        Self::from_pattern(nbits, v as u128, v < 0)
    }

    /// Constructs from an unsigned native value, zero-extending into the
    /// full `nbits` width.
    pub fn from_u128(nbits: usize, v: u128) -> Self {
        Self::from_pattern(nbits, v, false)
    }

    fn from_pattern(nbits: usize, pattern: u128, negative: bool) -> Self {
        assert!(nbits > 0, "blockbinary must have at least one bit");
        let bits = B::BITS as usize;
        let nblocks = nblocks_for::<B>(nbits);
        let sign_ext: u128 = if negative { u128::MAX } else { 0 };
        let mut blocks = vec![B::zero(); nblocks];
        for (k, slot) in blocks.iter_mut().enumerate() {
            let shift = k * bits;
            let limb: u128 = if shift >= 128 {
                sign_ext
            } else if shift == 0 {
                pattern
            } else {
                (pattern >> shift) | (sign_ext << (128 - shift))
            };
            *slot = B::from_u128_lossy(limb);
        }
        let mut out = BlockBinary { nbits, blocks };
        out.mask_msu();
        out
    }

    /// Reconstructs a value from already-masked raw blocks (used
    /// internally by the multiply/divide kernels, which compute blocks
    /// directly rather than through [`Self::from_i128`]).
    pub(crate) fn from_blocks(nbits: usize, mut blocks: Vec<B>) -> Self {
        blocks.resize(nblocks_for::<B>(nbits), B::zero());
        let mut out = BlockBinary { nbits, blocks };
        out.mask_msu();
        out
    }

    /// Total bit width.
    pub fn nbits(&self) -> usize {
        self.nbits
    }

    /// Raw little-endian blocks.
    pub fn blocks(&self) -> &[B] {
        &self.blocks
    }

    pub(crate) fn mask_msu(&mut self) {
        let k = self.blocks.len() - 1;
        let m = block::mask_msu::<B>(self.nbits, self.blocks.len());
        self.blocks[k] = self.blocks[k] & m;
    }

    /// The sign bit: bit `nbits - 1`.
    pub fn sign_bit(&self) -> bool {
        block::test_bit(&self.blocks, self.nbits - 1)
    }

    pub fn is_zero_value(&self) -> bool {
        self.blocks.iter().all(|b| *b == B::zero())
    }

    /// Two's-complement negation: `!self + 1`, re-masked.
    pub fn negate(&self) -> Self {
        let mut blocks: Vec<B> = self.blocks.iter().map(|b| !*b).collect();
        block::add_with_carry(&mut blocks, &[B::one()]);
        Self::from_blocks(self.nbits, blocks)
    }

    /// Absolute value: `self.magnitude().1`. The most negative value has
    /// no positive two's-complement counterpart at this width, so its
    /// `abs` is itself — the same fixed point negation has there.
    pub fn abs(&self) -> Self {
        self.magnitude().1
    }

    /// Decomposes into `(sign, magnitude)`, where magnitude is the
    /// unsigned absolute value stored as an `nbits`-wide `BlockBinary`
    /// (note: for the most negative value, the magnitude itself
    /// overflows back to the same bit pattern — callers needing the
    /// true magnitude of `minval` should work in an `nbits + 1` width,
    /// the same widening division uses).
    pub fn magnitude(&self) -> (bool, Self) {
        let sign = self.sign_bit();
        if sign {
            (true, self.negate())
        } else {
            (false, self.clone())
        }
    }

    /// Scans from the most significant block down, and within it from
    /// high bit to low, for the highest set bit among the `nbits` used
    /// bits. Returns `-1` for zero.
    pub fn find_msb(&self) -> isize {
        for i in (0..self.nbits).rev() {
            if block::test_bit(&self.blocks, i) {
                return i as isize;
            }
        }
        -1
    }

    /// Exposes the rounding-decision oracle at LSB position `pos`:
    /// whether the bits below `pos` round a truncation at `pos` down, to
    /// a tie, or up.
    pub fn rounding_mode(&self, pos: usize) -> RoundingDecision {
        block::rounding_oracle(&self.blocks, pos)
    }

    /// Widens an `nbits`-wide value into an `new_nbits`-wide one
    /// (`new_nbits >= nbits`), sign-extending.
    pub fn sign_extend(&self, new_nbits: usize) -> Self {
        assert!(new_nbits >= self.nbits);
        let negative = self.sign_bit();
        let nblocks = nblocks_for::<B>(new_nbits);
        let mut blocks = self.blocks.clone();
        blocks.resize(nblocks, if negative { B::from_u128_lossy(u128::MAX) } else { B::zero() });
        Self::from_blocks(new_nbits, blocks)
    }

    /// Reinterprets `self`'s bit pattern (truncating or sign-extending
    /// as needed) at a different bit width.
    pub fn resize(&self, new_nbits: usize) -> Self {
        if new_nbits >= self.nbits {
            self.sign_extend(new_nbits)
        } else {
            Self::from_blocks(new_nbits, self.blocks.clone())
        }
    }

    /// Tests bit `i` (0 = LSB), the checked counterpart of the internal
    /// `block::test_bit` primitive: fails with [`NumError::OutOfBounds`]
    /// rather than silently reading zero, since a caller-supplied index
    /// past `nbits` here is a programming error the type system cannot
    /// catch for us.
    pub fn get_bit(&self, i: usize) -> Result<bool, NumError> {
        if i >= self.nbits {
            return Err(NumError::OutOfBounds { index: i, bound: self.nbits });
        }
        Ok(block::test_bit(&self.blocks, i))
    }

    /// Sets bit `i` (0 = LSB) and re-establishes the padding invariant;
    /// see [`Self::get_bit`] for the bounds-checking rationale.
    pub fn set_bit(&mut self, i: usize, v: bool) -> Result<(), NumError> {
        if i >= self.nbits {
            return Err(NumError::OutOfBounds { index: i, bound: self.nbits });
        }
        block::set_bit(&mut self.blocks, i, v);
        self.mask_msu();
        Ok(())
    }

    /// Converts to `i128`, sign-extending from `self`'s sign bit above
    /// `nbits` and truncating below it.
    pub fn to_i128(&self) -> i128 {
        let mut v: u128 = 0;
        for i in 0..self.nbits.min(128) {
            if block::test_bit(&self.blocks, i) {
                v |= 1u128 << i;
            }
        }
        if self.sign_bit() && self.nbits < 128 {
            v |= u128::MAX << self.nbits;
        }
        v as i128
    }
}

impl<B: Block> Real for BlockBinary<B> {
    fn sign(&self) -> bool {
        self.sign_bit()
    }

    fn exp(&self) -> Option<isize> {
        if self.is_zero_value() {
            None
        } else {
            Some(0)
        }
    }

    fn e(&self) -> Option<isize> {
        if self.is_zero_value() {
            None
        } else {
            Some(self.find_msb())
        }
    }

    fn n(&self) -> Option<isize> {
        self.exp()
    }

    fn c(&self) -> Option<crate::blockbinary::BlockBinary<u64>> {
        if self.is_zero_value() {
            return None;
        }
        let (_, mag) = self.magnitude();
        let blocks: Vec<u64> = block::rebits(&mag.blocks, mag.nbits);
        Some(crate::blockbinary::BlockBinary::from_blocks(mag.nbits, blocks))
    }

    fn m(&self) -> Option<crate::blockbinary::BlockBinary<u64>> {
        self.c().map(|mag| if self.sign_bit() { mag.negate() } else { mag })
    }

    fn p(&self) -> usize {
        if self.is_zero_value() {
            0
        } else {
            (self.find_msb() + 1) as usize
        }
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
        self.is_zero_value()
    }

    fn is_negative(&self) -> Option<bool> {
        Some(self.sign_bit() && !self.is_zero_value())
    }

    fn is_numerical(&self) -> bool {
        true
    }
}

impl<B: Block> PartialEq for BlockBinary<B> {
    fn eq(&self, other: &Self) -> bool {
        self.nbits == other.nbits && self.blocks == other.blocks
    }
}

impl<B: Block> Eq for BlockBinary<B> {}

impl<B: Block> PartialOrd for BlockBinary<B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<B: Block> Ord for BlockBinary<B> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign_bit(), other.sign_bit()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // Same sign: two's-complement bit patterns of equal width order
            // the same way their raw unsigned values do.
            (true, true) | (false, false) => block::cmp_unsigned(&self.blocks, &other.blocks),
        }
    }
}
