use crate::blockbinary::BlockBinary;
use crate::integer::IntegerContext;
use crate::real::Real;

/// An arbitrary-width signed integer: identical storage to
/// `blockbinary`, with an overflow policy and native-integer ingress and
/// egress layered on top.
#[derive(Clone, Debug)]
pub struct Integer {
    pub(crate) bits: BlockBinary<u64>,
    pub(crate) ctx: IntegerContext,
}

impl Integer {
    /// Constructs from a native signed value, sign-extending into the
    /// context's width.
    pub fn from_i128(ctx: IntegerContext, v: i128) -> Self {
        Integer {
            bits: BlockBinary::from_i128(ctx.nbits(), v),
            ctx,
        }
    }

    /// Constructs the zero value of the given context.
    pub fn zero(ctx: IntegerContext) -> Self {
        Integer {
            bits: BlockBinary::zero(ctx.nbits()),
            ctx,
        }
    }

    pub fn ctx(&self) -> &IntegerContext {
        &self.ctx
    }

    pub fn bits(&self) -> &BlockBinary<u64> {
        &self.bits
    }

    /// Converts to `i128`, clipping and sign-extending from the sign
    /// bit above the native width.
    pub fn to_i128(&self) -> i128 {
        self.bits.to_i128()
    }

    pub fn to_i64(&self) -> i64 {
        self.to_i128() as i64
    }

    pub fn to_i32(&self) -> i32 {
        self.to_i128() as i32
    }
}

impl Real for Integer {
    fn sign(&self) -> bool {
        self.bits.sign()
    }

    fn exp(&self) -> Option<isize> {
        self.bits.exp()
    }

    fn e(&self) -> Option<isize> {
        self.bits.e()
    }

    fn n(&self) -> Option<isize> {
        self.bits.n()
    }

    fn c(&self) -> Option<BlockBinary<u64>> {
        self.bits.c()
    }

    fn m(&self) -> Option<BlockBinary<u64>> {
        self.bits.m()
    }

    fn p(&self) -> usize {
        self.bits.p()
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
        self.bits.is_zero()
    }

    fn is_negative(&self) -> Option<bool> {
        self.bits.is_negative()
    }

    fn is_numerical(&self) -> bool {
        true
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.bits.partial_cmp(&other.bits)
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bits.cmp(&other.bits)
    }
}
