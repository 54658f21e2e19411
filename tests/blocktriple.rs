use blocknum::blockbinary::BlockBinary;
use blocknum::blocktriple::BlockTriple;

fn finite(sign: bool, exp: isize, v: u128) -> BlockTriple {
    BlockTriple::finite(sign, exp, BlockBinary::from_u128(64, v))
}

#[test]
fn add_exactly_sums_operands_at_different_scales() {
    let a = finite(false, -2, 0b1); // 0.25
    let b = finite(false, 0, 0b11); // 3
    let sum = BlockTriple::add(&a, &b);
    let value = (sum.significant().to_i128() as f64) * 2f64.powi(sum.exp_lsb() as i32);
    assert!((value - 3.25).abs() < 1e-9);
}

#[test]
fn mul_is_exact_and_sign_is_xor() {
    let a = finite(false, 0, 12);
    let b = finite(true, 0, 5);
    let product = BlockTriple::mul(&a, &b);
    assert!(product.sign());
    assert_eq!(product.significant().to_i128(), 60);
}

#[test]
fn zero_divided_by_zero_is_a_signaling_nan() {
    let zero_a = BlockTriple::zero(false);
    let zero_b = BlockTriple::zero(true);
    let result = BlockTriple::div(&zero_a, &zero_b);
    assert!(result.is_nan());
    assert!(result.is_signaling());
}

#[test]
fn infinity_dominates_finite_operands() {
    let inf = BlockTriple::infinity(false);
    let five = finite(false, 0, 5);
    let sum = BlockTriple::add(&inf, &five);
    assert!(sum.is_infinite());
    assert!(!sum.sign());
}

#[test]
fn opposite_signed_infinities_subtract_to_signaling_nan() {
    let pos_inf = BlockTriple::infinity(false);
    let result = BlockTriple::sub(&pos_inf, &pos_inf);
    assert!(result.is_nan());
    assert!(result.is_signaling());
}
