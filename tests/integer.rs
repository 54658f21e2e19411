use blocknum::integer::{Integer, IntegerContext};
use blocknum::NumError;

#[test]
fn quiet_mode_wraps_on_overflow() {
    let ctx = IntegerContext::new(8);
    let a = Integer::from_i128(ctx, 127);
    let one = Integer::from_i128(ctx, 1);
    let sum = a.add(&one).unwrap();
    assert_eq!(sum.to_i128(), -128);
}

#[test]
fn trapping_mode_reports_overflow_instead_of_wrapping() {
    let ctx = IntegerContext::new(8).with_trap_on_overflow(true);
    let a = Integer::from_i128(ctx, 127);
    let one = Integer::from_i128(ctx, 1);
    assert!(a.add(&one).is_err());
}

#[test]
fn division_by_zero_always_errors() {
    let ctx = IntegerContext::new(16);
    let a = Integer::from_i128(ctx, 5);
    let zero = Integer::zero(ctx);
    assert_eq!(a.div(&zero), Err(NumError::DivideByZero));
}

#[test]
fn sixteen_bit_add_wraps_per_the_reference_scenario() {
    let ctx = IntegerContext::new(16);
    let a = Integer::from_i128(ctx, 1234);
    let b = Integer::from_i128(ctx, 54321);
    let sum = a.add(&b).unwrap();
    assert_eq!(sum.to_i128(), -9981);

    let trapping = IntegerContext::new(16).with_trap_on_overflow(true);
    let max = Integer::from_i128(trapping, 0x7FFF);
    let one = Integer::from_i128(trapping, 1);
    assert!(max.add(&one).is_err());
}

#[test]
fn decimal_and_hex_parsing_agree_with_from_i128() {
    let ctx = IntegerContext::new(32);
    let decimal = Integer::parse_with(ctx, "-1'000").unwrap();
    assert_eq!(decimal.to_i128(), -1000);

    let hex = Integer::parse_with(ctx, "0x3E8").unwrap();
    assert_eq!(hex.to_i128(), 1000);
}

#[test]
fn display_emits_decimal_signed_integer() {
    let ctx = IntegerContext::new(32);
    let v = Integer::from_i128(ctx, -256);
    assert_eq!(v.to_string(), "-256");
}

#[test]
fn abs_negates_only_when_negative() {
    let ctx = IntegerContext::new(16);
    let v = Integer::from_i128(ctx, -42);
    assert_eq!(v.abs().unwrap().to_i128(), 42);
    let v = Integer::from_i128(ctx, 42);
    assert_eq!(v.abs().unwrap().to_i128(), 42);
}

#[test]
fn abs_of_minval_overflows_when_trapping() {
    let ctx = IntegerContext::new(8).with_trap_on_overflow(true);
    let minval = Integer::from_i128(ctx, -128);
    assert!(minval.abs().is_err());
}
