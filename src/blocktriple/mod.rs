/*!
`blocktriple`: the internal normal form `cfloat` arithmetic is actually
computed in — `(-1)^sign * significant * 2^(scale - radix)`, where
`radix` is the number of fraction bits inside `significant` and is
fixed by which operation produced the triple, not by an `Op` tag: each
operation builds its own correctly-shaped result directly rather than
branching on a shape enum.
*/

mod number;
mod ops;

pub use number::BlockTriple;
