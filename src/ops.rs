/*!
Traits for rounded mathematical operations.

Implementations of these traits operate on [`Real`] types, rounding the
result according to a given [`RoundingContext`]. This crate's scope is
algebraic, not transcendental (no `sin`, `log`, `gamma`, ...), so unlike
a general-purpose arbitrary-precision library this only instantiates the
operators `blockbinary`, `fixpnt`, and `cfloat` actually implement.
*/

use crate::{Real, RoundingContext};

macro_rules! rounded_1ary {
    ($trait:ident, $imp:ident, $from:ident, $descr:expr) => {
        #[doc = "Rounded "]
        #[doc = $descr]
        #[doc = " for rounding contexts."]
        pub trait $trait: RoundingContext {
            #[doc = "Performs rounded `"]
            #[doc = $descr]
            #[doc = "`. Argument is the same format as the output. Use the\n            method prefixed by `"]
            #[doc = stringify!($from)]
            #[doc = "` if the input type differs."]
            fn $imp(&self, src: &Self::Rounded) -> Self::Rounded;

            #[doc = "Performs rounded `"]
            #[doc = $descr]
            #[doc = "` on any `Real`."]
            fn $from<N: Real>(&self, src: &N) -> Self::Rounded;
        }
    };
}

rounded_1ary!(RoundedNeg, neg, neg_from, "-x");
rounded_1ary!(RoundedAbs, abs, abs_from, "|x|");

macro_rules! rounded_2ary {
    ($trait:ident, $imp:ident, $from:ident, $descr:expr) => {
        #[doc = "Rounded "]
        #[doc = $descr]
        #[doc = " for rounding contexts."]
        pub trait $trait: RoundingContext {
            #[doc = "Performs rounded `"]
            #[doc = $descr]
            #[doc = "`. Arguments are the same format as the output. Use the\n            method prefixed by `"]
            #[doc = stringify!($from)]
            #[doc = "` if the input types differ."]
            fn $imp(&self, src1: &Self::Rounded, src2: &Self::Rounded) -> Self::Rounded;

            #[doc = "Performs rounded `"]
            #[doc = $descr]
            #[doc = "` on any pair of `Real`s."]
            fn $from<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Self::Rounded;
        }
    };
}

rounded_2ary!(RoundedAdd, add, add_from, "x + y");
rounded_2ary!(RoundedSub, sub, sub_from, "x - y");
rounded_2ary!(RoundedMul, mul, mul_from, "x * y");
rounded_2ary!(RoundedDiv, div, div_from, "x / y");
