use std::fmt;
use std::str::FromStr;

use crate::blockbinary::BlockBinary;
use crate::error::{NumError, OverflowKind};
use crate::integer::number::Integer;
use crate::integer::IntegerContext;

/// Checks whether `wide` (computed at `wide.nbits()`, strictly greater
/// than `target_nbits`) fits back into `target_nbits` without loss: if
/// truncating and re-sign-extending reproduces `wide` exactly, the
/// narrower width was sufficient.
fn check_overflow(wide: &BlockBinary<u64>, target_nbits: usize) -> Result<(), NumError> {
    let truncated = wide.resize(target_nbits);
    let reextended = truncated.sign_extend(wide.nbits());
    if reextended == *wide {
        Ok(())
    } else {
        let kind = if wide.sign_bit() {
            OverflowKind::TooSmall
        } else {
            OverflowKind::TooLarge
        };
        Err(NumError::Overflow(kind))
    }
}

impl Integer {
    pub fn add(&self, rhs: &Self) -> Result<Self, NumError> {
        let bits = self.bits.clone() + rhs.bits.clone();
        if self.ctx.traps_on_overflow() {
            let wide_a = self.bits.sign_extend(self.ctx.nbits() + 1);
            let wide_b = rhs.bits.sign_extend(self.ctx.nbits() + 1);
            check_overflow(&(wide_a + wide_b), self.ctx.nbits())?;
        }
        Ok(Integer { bits, ctx: self.ctx })
    }

    pub fn sub(&self, rhs: &Self) -> Result<Self, NumError> {
        let bits = self.bits.clone() - rhs.bits.clone();
        if self.ctx.traps_on_overflow() {
            let wide_a = self.bits.sign_extend(self.ctx.nbits() + 1);
            let wide_b = rhs.bits.sign_extend(self.ctx.nbits() + 1);
            check_overflow(&(wide_a - wide_b), self.ctx.nbits())?;
        }
        Ok(Integer { bits, ctx: self.ctx })
    }

    pub fn mul(&self, rhs: &Self) -> Result<Self, NumError> {
        let wide = self.bits.urmul(&rhs.bits);
        if self.ctx.traps_on_overflow() {
            check_overflow(&wide, self.ctx.nbits())?;
        }
        let bits = wide.resize(self.ctx.nbits());
        Ok(Integer { bits, ctx: self.ctx })
    }

    pub fn div(&self, rhs: &Self) -> Result<Self, NumError> {
        let (quot, _) = self.bits.div_rem(&rhs.bits)?;
        // The only possible overflow is `minval / -1`: `minval` is the
        // unique value whose two's-complement negation is itself.
        let is_minval = self.bits.sign_bit() && self.bits.negate() == self.bits;
        let divisor_is_minus_one = rhs.bits == BlockBinary::from_i128(self.ctx.nbits(), -1);
        if self.ctx.traps_on_overflow() && is_minval && divisor_is_minus_one {
            return Err(NumError::Overflow(OverflowKind::TooLarge));
        }
        Ok(Integer { bits: quot, ctx: self.ctx })
    }

    pub fn rem(&self, rhs: &Self) -> Result<Self, NumError> {
        let (_, rem) = self.bits.div_rem(&rhs.bits)?;
        Ok(Integer { bits: rem, ctx: self.ctx })
    }

    pub fn neg(&self) -> Result<Self, NumError> {
        let bits = self.bits.negate();
        if self.ctx.traps_on_overflow() {
            let wide = self.bits.sign_extend(self.ctx.nbits() + 1).negate();
            check_overflow(&wide, self.ctx.nbits())?;
        }
        Ok(Integer { bits, ctx: self.ctx })
    }

    /// `|self|`: negates when the sign bit is set. Subject to the same
    /// overflow check as `neg` at the most negative value, which has no
    /// positive two's-complement counterpart.
    pub fn abs(&self) -> Result<Self, NumError> {
        if self.bits.sign_bit() {
            self.neg()
        } else {
            Ok(self.clone())
        }
    }
}

/// Renders as a decimal signed integer.
impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i128())
    }
}

fn decimal_digit(c: char) -> Option<u32> {
    c.to_digit(10)
}

fn hex_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='F' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Accumulates `digits` (apostrophes ignored as separators) under
/// `radix`; wraps on overflow the same way `Integer::from_i128` wraps
/// at construction, rather than failing the parse.
fn parse_digits(digits: &str, radix: u128, digit_of: fn(char) -> Option<u32>) -> Result<u128, NumError> {
    let mut acc: u128 = 0;
    let mut saw_digit = false;
    for c in digits.chars() {
        if c == '\'' {
            continue;
        }
        let d = digit_of(c).ok_or(NumError::ParseFailure { kind: "integer" })?;
        acc = acc.wrapping_mul(radix).wrapping_add(d as u128);
        saw_digit = true;
    }
    if !saw_digit {
        return Err(NumError::ParseFailure { kind: "integer" });
    }
    Ok(acc)
}

impl Integer {
    /// Parses the decimal/hex grammar: an optional leading `-`,
    /// then either `[0-9']+` or `0x[0-9A-F']+` (apostrophes are digit
    /// separators and are ignored). A malformed string leaves no partial
    /// result — it is rejected outright.
    pub fn parse_with(ctx: IntegerContext, s: &str) -> Result<Self, NumError> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let magnitude = if let Some(hex) = rest.strip_prefix("0x") {
            parse_digits(hex, 16, hex_digit)?
        } else {
            parse_digits(rest, 10, decimal_digit)?
        };
        let value = if negative { -(magnitude as i128) } else { magnitude as i128 };
        Ok(Integer::from_i128(ctx, value))
    }
}

/// `FromStr` needs a context of its own to construct into; 64 bits
/// (matching native `i64`) is the canonical default, as elsewhere in
/// this crate's native-interop fast paths.
impl FromStr for Integer {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, NumError> {
        Integer::parse_with(IntegerContext::new(64), s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::IntegerContext;

    #[test]
    fn wrapping_add_matches_blockbinary() {
        let ctx = IntegerContext::new(16);
        let a = Integer::from_i128(ctx, 0x04D2);
        let b = Integer::from_i128(ctx, -0x2BCF); // 0xD431 as i16
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.to_i128() & 0xFFFF, 0xD903);
    }

    #[test]
    fn trapping_add_reports_overflow() {
        let ctx = IntegerContext::new(8).with_trap_on_overflow(true);
        let a = Integer::from_i128(ctx, 120);
        let b = Integer::from_i128(ctx, 100);
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn quiet_add_wraps_instead_of_erroring() {
        let ctx = IntegerContext::new(8);
        let a = Integer::from_i128(ctx, 120);
        let b = Integer::from_i128(ctx, 100);
        assert!(a.add(&b).is_ok());
    }

    #[test]
    fn negating_minval_overflows_when_trapping() {
        let ctx = IntegerContext::new(8).with_trap_on_overflow(true);
        let minval = Integer::from_i128(ctx, -128);
        assert!(minval.neg().is_err());
        let ctx = IntegerContext::new(8);
        let minval = Integer::from_i128(ctx, -128);
        assert_eq!(minval.neg().unwrap().to_i128() as i8, -128);
    }

    #[test]
    fn division_by_zero_errors_regardless_of_mode() {
        let ctx = IntegerContext::new(8);
        let a = Integer::from_i128(ctx, 10);
        let zero = Integer::zero(ctx);
        assert_eq!(a.div(&zero), Err(NumError::DivideByZero));
    }

    #[test]
    fn parses_negative_decimal_with_separators() {
        let ctx = IntegerContext::new(32);
        let v = Integer::parse_with(ctx, "-1'234").unwrap();
        assert_eq!(v.to_i128(), -1234);
    }

    #[test]
    fn parses_hex_literal() {
        let ctx = IntegerContext::new(16);
        let v = Integer::parse_with(ctx, "0xFF").unwrap();
        assert_eq!(v.to_i128() & 0xFFFF, 0xFF);
    }

    #[test]
    fn rejects_malformed_literal() {
        let ctx = IntegerContext::new(32);
        assert!(Integer::parse_with(ctx, "12x4").is_err());
        assert!(Integer::parse_with(ctx, "").is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let ctx = IntegerContext::new(32);
        let v = Integer::from_i128(ctx, -42);
        assert_eq!(v.to_string(), "-42");
        let parsed: Integer = "-42".parse().unwrap();
        assert_eq!(parsed.to_i128(), -42);
    }
}
