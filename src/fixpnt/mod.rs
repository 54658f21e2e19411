/*!
`fixpnt<N,R,Policy>`: a binary fixed-point number built over
[`crate::blockbinary::BlockBinary`] — an `N`-bit two's-complement integer
with an implicit radix point `R` bits up from the LSB, so its numerical
value is `bb * 2^(-R)`.

Like [`crate::integer`], this crate fixes the block type to `u64`; see
`DESIGN.md`. `Policy` (modular wraparound or saturation) is a field on
[`FixedContext`], not a type parameter, following the same
runtime-context idiom as the rest of the crate.
*/

mod number;
mod ops;
mod round;

pub use number::FixedPoint;
pub use round::{FixedContext, Overflow};
