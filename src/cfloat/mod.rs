/*!
`cfloat<N,ES>`: a configurable IEEE-754-style binary floating-point
format over [`crate::blockbinary::BlockBinary`] — 1 sign bit, `ES`
exponent bits, and `F = N - 1 - ES` fraction bits, with subnormals,
supernormals, and saturation as runtime policy flags on [`CFloatContext`]
rather than template parameters, following the same runtime-context idiom
as [`crate::integer`] and [`crate::fixpnt`].

Arithmetic is computed by decoding operands into the unbounded
[`crate::blocktriple::BlockTriple`] normal form, combining them there, and
rounding the single exact result back down through
[`CFloatContext::convert`] — one rounding step at the boundary rather
than rounding after every intermediate operation.
*/

mod number;
mod ops;
mod round;

pub use number::{CFloat, Encoding};
pub use round::CFloatContext;
