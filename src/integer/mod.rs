/*!
`integer<N,B>`: a thin, arbitrary-width signed integer view over
[`crate::blockbinary::BlockBinary`].

Unlike `blockbinary`'s raw `+`/`-`/`*`/`/` (which always wrap modularly),
`Integer` layers an overflow policy on top: quiet (wrap, the default) or
trapping (every arithmetic method returns an overflow error instead of a
wrapped value). Because that policy can turn a normally-infallible
operation into a fallible one depending on a runtime context, `Integer`
exposes its arithmetic as named methods returning `Result`, rather than
`std::ops` trait impls (which cannot vary their return type on a runtime
flag).

This crate fixes `Integer`'s block type to `u64` (the widest native
block) rather than carrying a second generic parameter `B` — see
`DESIGN.md` for the rationale. Code that needs a specific smaller block
type can use [`crate::blockbinary::BlockBinary`] directly.
*/

mod number;
mod ops;
mod round;

pub use number::Integer;
pub use round::IntegerContext;
