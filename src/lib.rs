/*!
`blocknum` is a library of arbitrary-precision binary number formats built
over fixed-width storage blocks: signed two's-complement integers
([`blockbinary`]), a thin native-integer-interop wrapper over them
([`integer`]), binary fixed-point numbers ([`fixpnt`]), and configurable
IEEE-754-style floating-point numbers ([`cfloat`]) that do their arithmetic
through an internal normal form ([`blocktriple`]).

Every format shares two traits: [`Real`] is the read-only query surface all
of them implement (sign, exponent, integer significand, ...), and
[`RoundingContext`] is the configuration value (bit width, policy flags, ...)
that knows how to round any [`Real`] into its own format.

This is the API documentation.
*/

pub mod block;
pub mod blockbinary;
pub mod blocktriple;
pub mod cfloat;
pub mod error;
pub mod fixpnt;
pub mod integer;
pub mod ops;
pub mod real;
pub mod round;

pub use crate::error::NumError;
pub use crate::real::Real;
pub use crate::round::{RoundingContext, RoundingMode};
