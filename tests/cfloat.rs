use blocknum::cfloat::{CFloat, CFloatContext};
use blocknum::NumError;

#[test]
fn ieee_binary32_round_trips_through_native_f32() {
    let ctx = CFloatContext::new(32, 8);
    let v = CFloat::from_f32(ctx, 1.5);
    assert_eq!(v.to_f32(), 1.5);
}

#[test]
fn arithmetic_matches_native_float_within_rounding() {
    let ctx = CFloatContext::new(32, 8);
    let a = CFloat::from_f32(ctx, 2.5);
    let b = CFloat::from_f32(ctx, 4.0);
    let sum = a.add(&b);
    let diff = b.sub(&a);
    let product = a.mul(&b);
    assert_eq!(sum.to_f32(), 6.5);
    assert_eq!(diff.to_f32(), 1.5);
    assert_eq!(product.to_f32(), 10.0);
}

#[test]
fn neg_flips_only_the_sign_bit() {
    let ctx = CFloatContext::new(32, 8);
    let v = CFloat::from_f32(ctx, 3.0);
    let negated = v.neg();
    assert_eq!(negated.to_f32(), -3.0);
    assert_eq!(negated.neg().to_f32(), 3.0);
}

#[test]
fn division_by_zero_produces_infinity() {
    let ctx = CFloatContext::new(32, 8);
    let one = CFloat::from_f32(ctx, 1.0);
    let zero = ctx.zero(false);
    let result = one.div(&zero);
    assert!(result.is_infinite_value());
    assert!(!result.sign_bit());
}

#[test]
fn next_and_prev_are_inverses_away_from_the_boundary() {
    let ctx = CFloatContext::new(16, 5).with_subnormals(true).with_supernormals(true);
    let one = CFloat::from_f32(ctx, 1.0);
    let stepped = one.next();
    assert_eq!(stepped.prev(), one);
}

#[test]
fn parse_with_reconstructs_the_exact_bit_pattern() {
    let ctx = CFloatContext::new(16, 5);
    let text = format!("0b0.{}.{}", "01111", "0".repeat(10));
    let parsed = CFloat::parse_with(ctx, &text).unwrap();
    assert_eq!(parsed.to_f64(), 1.0);
}

#[test]
fn parse_with_rejects_a_malformed_literal() {
    let ctx = CFloatContext::new(16, 5);
    assert!(CFloat::parse_with(ctx, "not-a-cfloat").is_err());
}

#[test]
fn display_emits_the_double_projection() {
    let ctx = CFloatContext::new(32, 8);
    let v = CFloat::from_f32(ctx, 0.5);
    assert_eq!(v.to_string(), "0.5");
}

#[test]
fn abs_clears_only_the_sign_bit() {
    let ctx = CFloatContext::new(32, 8);
    let v = CFloat::from_f32(ctx, -2.5);
    assert_eq!(v.abs().to_f32(), 2.5);
    assert_eq!(v.abs().abs().to_f32(), 2.5);
}

#[test]
fn trapping_on_nan_reports_operand_is_nan() {
    let ctx = CFloatContext::new(32, 8).with_trap_on_nan(true);
    let snan = ctx.snan();
    let one = CFloat::from_f32(ctx, 1.0);
    assert_eq!(snan.add_checked(&one), Err(NumError::OperandIsNan));
}

#[test]
fn maxpos_plus_maxpos_overflows_to_infinity_without_saturation() {
    let ctx = CFloatContext::new(8, 2).with_subnormals(true).with_supernormals(true);
    let sum = ctx.maxpos().add(&ctx.maxpos());
    assert!(sum.is_infinite_value());
    assert!(!sum.sign_bit());
}

#[test]
fn signaling_nan_plus_one_is_still_nan() {
    let ctx = CFloatContext::new(8, 2).with_subnormals(true).with_supernormals(true);
    let snan = ctx.snan();
    let one = CFloat::from_f32(ctx, 1.0);
    let sum = snan.add(&one);
    assert!(sum.is_nan_value());
}

#[test]
fn ieee_binary32_fast_path_decodes_one_point_zero_exactly() {
    let ctx = CFloatContext::new(32, 8);
    let text = format!("0b0.01111111.{}", "0".repeat(23));
    let v = CFloat::parse_with(ctx, &text).unwrap(); // bit pattern 0x3F800000
    assert_eq!(v.to_f64(), 1.0);
}

#[test]
fn one_third_round_trips_through_double_as_the_nearest_binary32() {
    let ctx = CFloatContext::new(32, 8);
    let one = CFloat::from_f32(ctx, 1.0);
    let three = CFloat::from_f32(ctx, 3.0);
    let third = one.div(&three);
    assert_eq!(third.to_f32().to_bits(), 0x3EAA_AAABu32);
    assert_eq!(third.to_f64(), f32::from_bits(0x3EAA_AAAB) as f64);
}

#[test]
fn quiet_mode_never_fails_on_a_signaling_nan() {
    let ctx = CFloatContext::new(32, 8);
    let snan = ctx.snan();
    let one = CFloat::from_f32(ctx, 1.0);
    let sum = snan.add_checked(&one).unwrap();
    assert!(sum.is_nan_value());
}
