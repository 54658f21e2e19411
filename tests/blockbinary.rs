use blocknum::blockbinary::BlockBinary;
use blocknum::NumError;

#[test]
fn arithmetic_wraps_modularly_at_width() {
    let a = BlockBinary::<u8>::from_i128(8, 120);
    let b = BlockBinary::<u8>::from_i128(8, 100);
    let sum = a + b;
    assert_eq!(sum.to_i128(), -36); // 220 truncated into 8-bit two's complement
}

#[test]
fn division_and_remainder_match_truncating_semantics() {
    let a = BlockBinary::<u64>::from_i128(16, -17);
    let b = BlockBinary::<u64>::from_i128(16, 5);
    assert_eq!((a.clone() / b.clone()).to_i128(), -3);
    assert_eq!((a % b).to_i128(), -2);
}

#[test]
fn urmul_produces_full_width_exact_product() {
    let a = BlockBinary::<u32>::from_i128(32, 70_000);
    let b = BlockBinary::<u32>::from_i128(32, 70_000);
    let wide = a.urmul(&b);
    assert_eq!(wide.nbits(), 64);
    assert_eq!(wide.to_i128(), 70_000i128 * 70_000);
}

#[test]
fn sign_extension_and_resize_preserve_value() {
    let a = BlockBinary::<u16>::from_i128(12, -200);
    let widened = a.sign_extend(24);
    assert_eq!(widened.to_i128(), -200);
    let narrowed = widened.resize(12);
    assert_eq!(narrowed.to_i128(), -200);
}

#[test]
fn ordering_respects_twos_complement_sign() {
    let neg = BlockBinary::<u8>::from_i128(8, -1);
    let pos = BlockBinary::<u8>::from_i128(8, 1);
    assert!(neg < pos);
}

#[test]
fn abs_is_identity_at_the_most_negative_value() {
    let minval = BlockBinary::<u8>::from_i128(8, -128);
    assert_eq!(minval.abs(), minval);
    let ordinary = BlockBinary::<u8>::from_i128(8, -5);
    assert_eq!(ordinary.abs().to_i128(), 5);
}

#[test]
fn four_bit_division_matches_the_reference_scenarios() {
    let dividend = BlockBinary::<u8>::from_i128(4, -8);
    let one = BlockBinary::<u8>::from_i128(4, 1);
    let three = BlockBinary::<u8>::from_i128(4, 3);
    assert_eq!((dividend.clone() / one.clone()).to_i128(), -8);
    assert_eq!((dividend.clone() % one).to_i128(), 0);
    assert_eq!((dividend.clone() / three.clone()).to_i128(), -2);
    assert_eq!((dividend % three).to_i128(), -2);
}

#[test]
fn get_bit_and_set_bit_reject_out_of_bounds_indices() {
    let mut a = BlockBinary::<u8>::from_i128(12, 0);
    assert!(a.get_bit(12).is_err());
    assert_eq!(a.set_bit(12, true), Err(NumError::OutOfBounds { index: 12, bound: 12 }));
    assert!(a.set_bit(3, true).is_ok());
    assert_eq!(a.get_bit(3), Ok(true));
}
