/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! End-to-end token-stream scenarios from spec §8, plus the algebraic
//! laws that must hold across dimensionally compatible inputs.

use qrpn::{evaluate_string, try_string, QrpnError, Quantity, Stack};

fn run(input: &str) -> Stack {
    let mut stack = Stack::new();
    evaluate_string(&mut stack, input).unwrap_or_else(|e| panic!("{input:?} failed: {e}"));
    stack
}

fn run_err(input: &str) -> QrpnError {
    let mut stack = Stack::new();
    evaluate_string(&mut stack, input).unwrap_err()
}

#[test]
fn base_unit_division() {
    let mut stack = run("1 m 1 s /");
    let top = stack.pop().unwrap();
    assert_eq!(top.value.re, 1.0);
    assert_eq!(top.unit, qrpn::dimension::Dimension::new([1, 0, -1, 0, 0, 0, 0]));
}

#[test]
fn addition_of_equivalent_units() {
    let mut stack = run("2 km 3 km +");
    let top = stack.pop().unwrap();
    assert_eq!(top.value.re, 5000.0);
    assert_eq!(format!("{top}"), "5000 m");
}

#[test]
fn conversion_round_trip_lands_on_zero() {
    let mut stack = run("1 inch 2.54 cm -");
    let top = stack.pop().unwrap();
    assert!(top.value.re.abs() < 1e-9);
    assert_eq!(top.unit, qrpn::dimension::Dimension::new([1, 0, 0, 0, 0, 0, 0]));
}

#[test]
fn quadratic_complex_roots() {
    let mut stack = run("1 2 3 quadratic");
    let r1 = stack.pop().unwrap();
    let r0 = stack.pop().unwrap();
    for root in [r0, r1] {
        assert!((root.value.re + 1.0).abs() < 1e-9);
        assert!((root.value.im.abs() - std::f64::consts::SQRT_2).abs() < 1e-9);
    }
}

#[test]
fn bearing_and_range_to_the_north() {
    let mut stack = run("0 0 0 6378000 m br");
    let range = stack.pop().unwrap();
    let bearing = stack.pop().unwrap();
    assert!(bearing.value.re.abs() < 1e-9);
    assert!((range.value.re - 6_371_000.0).abs() / 6_371_000.0 < 0.01);
}

#[test]
fn date_of_the_epoch() {
    let mut stack = run("1970-01-01T00:00:00Z date");
    let fields: Vec<f64> = (0..6).map(|_| stack.pop().unwrap().value.re).collect();
    assert_eq!(fields, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1970.0]);
}

#[test]
fn begin_until_counts_to_ten() {
    let mut stack = run("5 0 begin 1 + dup 10 ge until");
    assert_eq!(stack.pop().unwrap().value.re, 10.0);
}

#[test]
fn if_else_endif_selects_branch() {
    assert_eq!(run("1 if 42 else 7 endif").pop().unwrap().value.re, 42.0);
    assert_eq!(run("0 if 42 else 7 endif").pop().unwrap().value.re, 7.0);
}

#[test]
fn mismatched_units_addition_is_an_error() {
    assert_eq!(run_err("1 m 1 s +"), QrpnError::InconsistentUnits);
}

#[test]
fn odd_dimension_sqrt_is_rational_not_implemented() {
    assert_eq!(run_err("1 m sqrt"), QrpnError::RationalNotImplemented);
}

#[test]
fn integer_division_by_zero_is_domain_error() {
    assert_eq!(run_err("2 0 idiv"), QrpnError::Domain);
}

#[test]
fn pow_overflowing_dimension() {
    assert_eq!(run_err("1 m 200 pow"), QrpnError::DimensionOverflow);
}

#[test]
fn commutativity_of_addition_and_multiplication() {
    let mut forward = run("3 m 4 m +");
    let mut backward = run("4 m 3 m +");
    assert_eq!(forward.pop().unwrap().value, backward.pop().unwrap().value);

    let mut forward = run("3 m 4 s *");
    let mut backward = run("4 s 3 m *");
    assert_eq!(forward.pop().unwrap().value, backward.pop().unwrap().value);
}

#[test]
fn dup_mul_equals_square() {
    let mut via_dup = run("3 m dup mul");
    let mut via_square = run("3 m square");
    let a = via_dup.pop().unwrap();
    let b = via_square.pop().unwrap();
    assert_eq!(a.value, b.value);
    assert_eq!(a.unit, b.unit);
}

#[test]
fn square_then_sqrt_equals_abs() {
    let mut stack = run("-3 m square sqrt");
    let top = stack.pop().unwrap();
    assert!((top.value.re - 3.0).abs() < 1e-9);
}

#[test]
fn rcp_rcp_is_identity() {
    let mut stack = run("4 m rcp rcp");
    let top = stack.pop().unwrap();
    assert!((top.value.re - 4.0).abs() < 1e-9);
    assert_eq!(top.unit, qrpn::dimension::Dimension::new([1, 0, 0, 0, 0, 0, 0]));
}

#[test]
fn chs_chs_is_exact_identity() {
    let mut stack = run("4 m chs chs");
    let top = stack.pop().unwrap();
    assert_eq!(top.value.re, 4.0);
}

#[test]
fn choose_symmetry_and_base_case() {
    assert_eq!(run("10 3 choose").pop().unwrap().value.re, run("10 7 choose").pop().unwrap().value.re);
    assert_eq!(run("5 0 choose").pop().unwrap().value.re, 1.0);
}

#[test]
fn gcd_times_lcm_equals_product() {
    let g = run("12 18 gcd").pop().unwrap().value.re;
    let l = run("12 18 lcm").pop().unwrap().value.re;
    assert_eq!(g * l, 12.0 * 18.0);
}

#[test]
fn try_string_never_mutates_caller_stack() {
    let mut stack = Stack::new();
    stack.push(Quantity::real(2.0)).unwrap();
    let before = stack.snapshot();
    let _ = try_string(&stack, "sqrt");
    assert_eq!(stack.snapshot(), before);
}
