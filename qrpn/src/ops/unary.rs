/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use num_complex::Complex64;

use crate::error::QrpnError;
use crate::quantity::Quantity;
use crate::stack::Stack;
use crate::value;

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

fn require_real(q: &Quantity) -> Result<(), QrpnError> {
    if q.is_real() {
        Ok(())
    } else {
        Err(QrpnError::MustBeReal)
    }
}

pub fn rcp(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| {
        if a.value == Complex64::new(0.0, 0.0) {
            return Err(QrpnError::Domain);
        }
        let unit = a.unit.negated()?;
        Ok(Quantity::new(Complex64::new(1.0, 0.0) / a.value, unit))
    })
}

pub fn chs(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| {
        Ok(Quantity::new(value::normalize_negative_zero_imaginary(-a.value), a.unit))
    })
}

pub fn abs(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| Ok(Quantity::new(Complex64::new(a.value.norm(), 0.0), a.unit)))
}

pub fn real(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| Ok(Quantity::new(Complex64::new(a.value.re, 0.0), a.unit)))
}

pub fn imaginary(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| Ok(Quantity::new(Complex64::new(a.value.im, 0.0), a.unit)))
}

pub fn arg(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| Ok(Quantity::real(a.value.arg())))
}

pub fn square(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| {
        let unit = a.unit.scaled(2)?;
        Ok(Quantity::new(value::powi_checked(a.value, 2), unit))
    })
}

pub fn sqrt(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| {
        let unit = a.unit.divided_exactly(2).ok_or(QrpnError::RationalNotImplemented)?;
        Ok(Quantity::new(a.value.sqrt(), unit))
    })
}

/// Next representable `f64` toward `+∞`.
fn next_after_f64(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    let bits = if x > 0.0 { bits + 1 } else { bits - 1 };
    f64::from_bits(bits)
}

/// Next representable `f32` toward `+∞`, widened back to `f64`.
fn next_after_f32(x: f64) -> f64 {
    let xf = x as f32;
    if xf.is_nan() || xf == f32::INFINITY {
        return xf as f64;
    }
    if xf == 0.0 {
        return f32::from_bits(1) as f64;
    }
    let bits = xf.to_bits();
    let bits = if xf > 0.0 { bits + 1 } else { bits - 1 };
    f32::from_bits(bits) as f64
}

pub fn nextafter(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| {
        require_real(&a)?;
        Ok(Quantity::new(Complex64::new(next_after_f64(a.value.re), 0.0), a.unit))
    })
}

pub fn nextafterf(stack: &mut Stack) -> Result<(), QrpnError> {
    unary(stack, |a| {
        require_real(&a)?;
        Ok(Quantity::new(Complex64::new(next_after_f32(a.value.re), 0.0), a.unit))
    })
}

fn binary_pow(
    stack: &mut Stack,
    exact_only: bool,
) -> Result<(), QrpnError> {
    stack.require(2)?;
    let snapshot = stack.snapshot();
    let exponent = stack.pop().unwrap();
    let base = stack.pop().unwrap();

    let result = (|| {
        if !exponent.is_dimensionless() {
            return Err(QrpnError::MustBeUnitless);
        }
        require_real(&exponent)?;

        if base.is_dimensionless() {
            let value = value::powc_checked(base.value, exponent.value);
            return Ok(Quantity::new(value, crate::dimension::Dimension::DIMENSIONLESS));
        }

        if !exponent.is_real_integer() {
            return Err(QrpnError::MustBeInteger);
        }
        let e = exponent.value.re as i32;
        let unit = if exact_only {
            base.unit.divided_exactly(e as i64).ok_or(QrpnError::RationalNotImplemented)?
        } else {
            base.unit.scaled(e as i64)?
        };
        Ok(Quantity::new(value::powi_checked(base.value, e), unit))
    })();

    match result {
        Ok(q) => {
            stack.push(q).unwrap();
            Ok(())
        }
        Err(err) => {
            stack.restore(snapshot);
            Err(err)
        }
    }
}

pub fn pow(stack: &mut Stack) -> Result<(), QrpnError> {
    binary_pow(stack, false)
}

pub fn rpow(stack: &mut Stack) -> Result<(), QrpnError> {
    binary_pow(stack, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;

    #[test]
    fn rcp_negates_dimension() {
        let mut s = Stack::new();
        s.push(Quantity::new(Complex64::new(2.0, 0.0), Dimension::new([0, 0, 1, 0, 0, 0, 0])))
            .unwrap();
        rcp(&mut s).unwrap();
        let top = s.pop().unwrap();
        assert_eq!(top.value.re, 0.5);
        assert_eq!(top.unit, Dimension::new([0, 0, -1, 0, 0, 0, 0]));
    }

    #[test]
    fn sqrt_of_odd_dimension_is_rational_not_implemented() {
        let mut s = Stack::new();
        s.push(Quantity::new(Complex64::new(4.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0])))
            .unwrap();
        assert_eq!(sqrt(&mut s).unwrap_err(), QrpnError::RationalNotImplemented);
    }

    #[test]
    fn square_then_sqrt_preserves_magnitude() {
        let mut s = Stack::new();
        s.push(Quantity::real(3.0)).unwrap();
        square(&mut s).unwrap();
        sqrt(&mut s).unwrap();
        assert!((s.pop().unwrap().value.re - 3.0).abs() < 1e-12);
    }

    #[test]
    fn pow_with_dimensioned_base_requires_integer_exponent() {
        let mut s = Stack::new();
        s.push(Quantity::new(Complex64::new(2.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0])))
            .unwrap();
        s.push(Quantity::real(0.5)).unwrap();
        assert_eq!(pow(&mut s).unwrap_err(), QrpnError::MustBeInteger);
    }

    #[test]
    fn pow_overflows_dimension_before_mutating() {
        let mut s = Stack::new();
        s.push(Quantity::new(Complex64::new(1.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0])))
            .unwrap();
        s.push(Quantity::real(200.0)).unwrap();
        assert_eq!(pow(&mut s).unwrap_err(), QrpnError::DimensionOverflow);
        assert_eq!(s.len(), 2);
    }
}
