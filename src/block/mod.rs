/*!
Storage-block primitives.

A "block" is a single unsigned storage unit of a number: a `u8`, `u16`,
`u32`, or `u64`. Every multi-precision format in this crate is, at the
bottom, a little-endian sequence of blocks (block 0 holds the least
significant bits). This module defines the [`Block`] trait unifying the
four native widths, and the bit/byte-granular primitives that every
higher-level format is built from: bit get/set, shifting,
carry-propagating addition, and the rounding-decision oracle.
*/

mod primitives;

pub use primitives::{
    add_with_carry, cmp_unsigned, mask_msu, rebits, rounding_oracle, set_bit, set_block,
    shift_left_bits, shift_right_bits_logical, sub_with_borrow, test_bit, Block, RoundingDecision,
};
