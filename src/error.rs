/*!
The error taxonomy for this crate's fallible operations.

Most arithmetic in this crate is infallible by construction: operator
overloads always return a value, wrapping or saturating per the active
[`crate::round::RoundingContext`]'s policy. [`NumError`] covers the
handful of operations that cannot produce a sensible value at all
(division by zero), the strict-mode `_checked` counterparts of the
otherwise-quiet operators, and parsing.
*/

/// The kind of representable-range violation behind a
/// [`NumError::Overflow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowKind {
    /// The unbounded result was larger than the format's maximum.
    TooLarge,
    /// The unbounded result was smaller than the format's minimum.
    TooSmall,
}

/// Errors produced by this crate's fallible APIs.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumError {
    #[error("division by zero")]
    DivideByZero,
    #[error("result exceeds the representable range ({0:?})")]
    Overflow(OverflowKind),
    #[error("operation on a signalling NaN while trapping is enabled")]
    OperandIsNan,
    #[error("index out of bounds: {index} >= {bound}")]
    OutOfBounds { index: usize, bound: usize },
    #[error("could not parse {kind} literal")]
    ParseFailure { kind: &'static str },
}
