/*!
`blockbinary<N,B>`: a signed, two's-complement integer laid out over
block-sized limbs.

This is the storage type every format in this crate is ultimately built
from. A `BlockBinary<B>` owns `⌈N/|B|⌉` blocks of type `B` (one of `u8`,
`u16`, `u32`, `u64` — see [`crate::block::Block`]), little-endian, with
`N` itself carried at runtime rather than as a const generic (see the
crate-level docs for why: stable Rust cannot compute `⌈N/|B|⌉` from a
const-generic `N` and `B::BITS`).
*/

mod div;
mod number;
mod ops;

pub use number::BlockBinary;
