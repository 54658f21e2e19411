use blocknum::blockbinary::BlockBinary;
use blocknum::fixpnt::{FixedContext, FixedPoint, Overflow};

#[test]
fn saturating_add_clamps_at_the_boundary() {
    let ctx = FixedContext::new(8, 4).with_overflow(Overflow::Saturate);
    let sum = ctx.maxpos().add(&ctx.maxpos());
    assert_eq!(sum, ctx.maxpos());
}

#[test]
fn wrapping_add_does_not_clamp() {
    let ctx = FixedContext::new(8, 4).with_overflow(Overflow::Wrap);
    let sum = ctx.maxpos().add(&ctx.maxpos());
    assert_ne!(sum, ctx.maxpos());
}

#[test]
fn from_f64_lands_on_the_exact_bit_pattern_and_adds_correctly() {
    let ctx = FixedContext::new(8, 4);
    let a = FixedPoint::from_f64(ctx, 1.25); // 0x14
    let b = FixedPoint::from_f64(ctx, 0.75); // 0x0C
    assert_eq!(*a.bits(), BlockBinary::<u64>::from_i128(8, 0x14));
    assert_eq!(*b.bits(), BlockBinary::<u64>::from_i128(8, 0x0C));
    let sum = a.add(&b);
    assert_eq!(*sum.bits(), BlockBinary::<u64>::from_i128(8, 0x20));
    assert_eq!(sum.to_f64(), 2.0);
}

#[test]
fn maxpos_squared_saturates_but_wraps_under_modular_policy() {
    let sat = FixedContext::new(8, 4).with_overflow(Overflow::Saturate);
    let saturated = sat.maxpos().mul(&sat.maxpos());
    assert_eq!(saturated, sat.maxpos());

    let wrap = FixedContext::new(8, 4).with_overflow(Overflow::Wrap);
    let wrapped = wrap.maxpos().mul(&wrap.maxpos());
    assert_ne!(wrapped, wrap.maxpos());
}

#[test]
fn multiply_is_exact_when_representable() {
    let ctx = FixedContext::new(16, 4);
    let one = FixedPoint::from_i128(ctx, 1);
    let two = FixedPoint::from_i128(ctx, 2);
    let product = one.mul(&two);
    assert_eq!(product.to_f64(), 2.0);
}

#[test]
fn division_by_zero_errors() {
    let ctx = FixedContext::new(16, 8);
    let a = FixedPoint::from_i128(ctx, 5);
    let zero = ctx.zero();
    assert!(a.div(&zero).is_err());
}

#[test]
fn division_round_trips_through_double() {
    let ctx = FixedContext::new(32, 16);
    let one = FixedPoint::from_i128(ctx, 1);
    let three = FixedPoint::from_i128(ctx, 3);
    let third = one.div(&three).unwrap();
    assert!((third.to_f64() - 1.0 / 3.0).abs() < 1e-3);
}

#[test]
fn decimal_string_emits_exactly_scale_fraction_digits() {
    let ctx = FixedContext::new(16, 4);
    let v = FixedPoint::from_i128(ctx, 3);
    assert_eq!(v.to_decimal_string(), "3.0000");
}

#[test]
fn parse_with_matches_from_i128() {
    let ctx = FixedContext::new(16, 4);
    let parsed = FixedPoint::parse_with(ctx, "12").unwrap();
    assert_eq!(parsed, FixedPoint::from_i128(ctx, 12));
}

#[test]
fn abs_negates_only_when_negative() {
    let ctx = FixedContext::new(16, 4);
    let v = FixedPoint::from_i128(ctx, -7);
    assert_eq!(v.abs().to_f64(), 7.0);
    assert_eq!(ctx.maxpos().abs(), ctx.maxpos());
}

#[test]
fn abs_of_maxneg_saturates_under_saturating_policy() {
    let ctx = FixedContext::new(8, 4).with_overflow(Overflow::Saturate);
    assert_eq!(ctx.maxneg().abs(), ctx.maxpos());
}
