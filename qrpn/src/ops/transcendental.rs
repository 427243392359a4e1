/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use num_complex::Complex64;

use crate::error::QrpnError;
use crate::quantity::Quantity;
use crate::stack::Stack;

fn unary(
    stack: &mut Stack,
    f: impl FnOnce(Quantity) -> Result<Quantity, QrpnError>,
) -> Result<(), QrpnError> {
    stack.require(1)?;
    let snapshot = stack.snapshot();
    let a = stack.pop().unwrap();
    match f(a) {
        Ok(result) => {
            stack.push(result).unwrap();
            Ok(())
        }
        Err(err) => {
            stack.restore(snapshot);
            Err(err)
        }
    }
}

fn require_dimensionless_real(q: &Quantity) -> Result<f64, QrpnError> {
    if !q.is_dimensionless() {
        return Err(QrpnError::MustBeUnitless);
    }
    if !q.is_real() {
        return Err(QrpnError::MustBeReal);
    }
    Ok(q.value.re)
}

/// Real-valued family: dimensionless, real input, real output.
fn real_fn(stack: &mut Stack, f: impl FnOnce(f64) -> Result<f64, QrpnError>) -> Result<(), QrpnError> {
    unary(stack, |a| {
        let x = require_dimensionless_real(&a)?;
        Ok(Quantity::real(f(x)?))
    })
}

/// Complex-valued family: dimensionless input (possibly complex), complex
/// output.
fn complex_fn(
    stack: &mut Stack,
    f: impl FnOnce(Complex64) -> Complex64,
) -> Result<(), QrpnError> {
    unary(stack, |a| {
        if !a.is_dimensionless() {
            return Err(QrpnError::MustBeUnitless);
        }
        Ok(Quantity::new(f(a.value), crate::dimension::Dimension::DIMENSIONLESS))
    })
}

pub fn hav(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok((x / 2.0).sin().powi(2)))
}

pub fn crd(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(2.0 * (x / 2.0).sin()))
}

pub fn exsec(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(1.0 / x.cos() - 1.0))
}

pub fn ahav(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| {
        if !(0.0..=1.0).contains(&x) {
            return Err(QrpnError::Domain);
        }
        Ok(2.0 * x.sqrt().asin())
    })
}

pub fn acrd(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| {
        if !(-2.0..=2.0).contains(&x) {
            return Err(QrpnError::Domain);
        }
        Ok(2.0 * (x / 2.0).asin())
    })
}

pub fn aexsec(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| {
        let cos = 1.0 / (x + 1.0);
        if !(-1.0..=1.0).contains(&cos) {
            return Err(QrpnError::Domain);
        }
        Ok(cos.acos())
    })
}

pub fn floor(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(x.floor()))
}

pub fn ceil(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(x.ceil()))
}

pub fn round(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(x.round()))
}

/// Complementary error function via the Abramowitz & Stegun 7.1.26
/// rational approximation (max error ~1.5e-7); no dedicated erf crate is
/// in the dependency stack for this one function.
fn erf_approx(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();
    sign * y
}

pub fn erfc(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(1.0 - erf_approx(x)))
}

pub fn log2(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(x.log2()))
}

pub fn log10(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| {
        if x < 0.0 {
            return Err(QrpnError::MustBeNonnegative);
        }
        Ok(x.log10())
    })
}

pub fn tenlog(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| {
        if x < 0.0 {
            return Err(QrpnError::MustBeNonnegative);
        }
        Ok(10.0 * x.log10())
    })
}

pub fn itenlog(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(10f64.powf(x / 10.0)))
}

/// Real gamma function via the Lanczos approximation (g=7, n=9 table),
/// mirroring the source's call into libc `tgamma`.
fn gamma_lanczos(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    if x < 0.5 {
        std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * gamma_lanczos(1.0 - x))
    } else {
        let x = x - 1.0;
        let mut a = COEFFICIENTS[0];
        let t = x + G + 0.5;
        for (i, c) in COEFFICIENTS.iter().enumerate().skip(1) {
            a += c / (x + i as f64);
        }
        (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
    }
}

pub fn gamma(stack: &mut Stack) -> Result<(), QrpnError> {
    real_fn(stack, |x| Ok(gamma_lanczos(x)))
}

pub fn cos(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.cos())
}

pub fn sin(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.sin())
}

pub fn tan(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.tan())
}

pub fn tanh(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.tanh())
}

pub fn acos(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.acos())
}

pub fn asin(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.asin())
}

pub fn atan(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.atan())
}

pub fn exp(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.exp())
}

pub fn log(stack: &mut Stack) -> Result<(), QrpnError> {
    complex_fn(stack, |v| v.ln())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hav_matches_definition() {
        let mut s = Stack::new();
        s.push(Quantity::real(std::f64::consts::PI)).unwrap();
        hav(&mut s).unwrap();
        assert!((s.pop().unwrap().value.re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn log10_rejects_negative() {
        let mut s = Stack::new();
        s.push(Quantity::real(-1.0)).unwrap();
        assert_eq!(log10(&mut s).unwrap_err(), QrpnError::MustBeNonnegative);
    }

    #[test]
    fn gamma_of_five_is_twenty_four_factorial() {
        let mut s = Stack::new();
        s.push(Quantity::real(5.0)).unwrap();
        gamma(&mut s).unwrap();
        assert!((s.pop().unwrap().value.re - 24.0).abs() < 1e-6);
    }

    #[test]
    fn sin_of_dimensioned_input_is_rejected() {
        use crate::dimension::Dimension;
        let mut s = Stack::new();
        s.push(Quantity::new(Complex64::new(1.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0])))
            .unwrap();
        assert_eq!(sin(&mut s).unwrap_err(), QrpnError::MustBeUnitless);
    }
}
