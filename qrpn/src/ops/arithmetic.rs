/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use num_complex::Complex64;

use crate::dimension::Dimension;
use crate::error::QrpnError;
use crate::quantity::Quantity;
use crate::stack::Stack;

/// Pop two values (`a` below `b`), hand them to `f`, and push the result.
/// Restores the stack and propagates the error if `f` fails — this is the
/// one place the atomic snapshot-on-error rule lives for all binary ops.
fn binary(
    stack: &mut Stack,
    f: impl FnOnce(Quantity, Quantity) -> Result<Quantity, QrpnError>,
) -> Result<(), QrpnError> {
    stack.require(2)?;
    let snapshot = stack.snapshot();
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    match f(a, b) {
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

fn require_equivalent(a: &Quantity, b: &Quantity) -> Result<(), QrpnError> {
    if a.unit.equivalent(&b.unit) {
        Ok(())
    } else {
        Err(QrpnError::InconsistentUnits)
    }
}

fn require_real(q: &Quantity) -> Result<(), QrpnError> {
    if q.is_real() {
        Ok(())
    } else {
        Err(QrpnError::MustBeReal)
    }
}

pub fn add(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        Ok(Quantity::new(a.value + b.value, a.unit))
    })
}

pub fn sub(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        Ok(Quantity::new(a.value - b.value, a.unit))
    })
}

pub fn mul(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        let unit = a.unit.added(&b.unit)?;
        Ok(Quantity::new(a.value * b.value, unit))
    })
}

pub fn div(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        let unit = a.unit.subtracted(&b.unit)?;
        Ok(Quantity::new(a.value / b.value, unit))
    })
}

pub fn modulo(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        require_real(&a)?;
        require_real(&b)?;
        if b.value.re == 0.0 {
            return Err(QrpnError::Domain);
        }
        Ok(Quantity::new(Complex64::new(a.value.re % b.value.re, 0.0), a.unit))
    })
}

pub fn hypot(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        require_real(&a)?;
        require_real(&b)?;
        Ok(Quantity::new(
            Complex64::new(a.value.re.hypot(b.value.re), 0.0),
            a.unit,
        ))
    })
}

pub fn atan2(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        require_real(&a)?;
        require_real(&b)?;
        Ok(Quantity::real(a.value.re.atan2(b.value.re)))
    })
}

pub fn idiv(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        if !a.is_dimensionless() || !b.is_dimensionless() {
            return Err(QrpnError::MustBeUnitless);
        }
        if b.value.re == 0.0 {
            return Err(QrpnError::Domain);
        }
        Ok(Quantity::real((a.value.re / b.value.re).trunc()))
    })
}

/// Solve `a*x^2 + b*x + c = 0`, replacing the three coefficients with the
/// two roots. Picks the root with the larger-magnitude numerator first to
/// avoid catastrophic cancellation, then derives the second via Vieta's
/// formula.
pub fn quadratic(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(3)?;
    let snapshot = stack.snapshot();
    let c = stack.pop().unwrap();
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();

    let expected_c = match b.unit.scaled(2).and_then(|d| d.subtracted(&a.unit)) {
        Ok(d) => d,
        Err(err) => {
            stack.restore(snapshot);
            return Err(err);
        }
    };
    if !expected_c.equivalent(&c.unit) {
        stack.restore(snapshot);
        return Err(QrpnError::InconsistentUnits);
    }

    let result_unit = match b.unit.subtracted(&a.unit) {
        Ok(d) => d,
        Err(err) => {
            stack.restore(snapshot);
            return Err(err);
        }
    };

    let discriminant = b.value * b.value - Complex64::new(4.0, 0.0) * a.value * c.value;
    let sqrt_d = discriminant.sqrt();
    let r1 = if sqrt_d.re > 0.0 {
        (-b.value - sqrt_d) / (Complex64::new(2.0, 0.0) * a.value)
    } else {
        (-b.value + sqrt_d) / (Complex64::new(2.0, 0.0) * a.value)
    };
    let r0 = c.value / (a.value * r1);

    stack.push(Quantity::new(r1, result_unit)).unwrap();
    stack.push(Quantity::new(r0, result_unit)).unwrap();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_requires_equivalent_dims() {
        let mut s = Stack::new();
        s.push(Quantity::new(Complex64::new(1.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0])))
            .unwrap();
        s.push(Quantity::new(Complex64::new(1.0, 0.0), Dimension::new([0, 0, 1, 0, 0, 0, 0])))
            .unwrap();
        let err = add(&mut s).unwrap_err();
        assert_eq!(err, QrpnError::InconsistentUnits);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn mul_sums_dimensions() {
        let mut s = Stack::new();
        s.push(Quantity::real(1.0)).unwrap();
        s.push(Quantity::new(Complex64::new(1.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0])))
            .unwrap();
        mul(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().unit, Dimension::new([1, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn idiv_by_zero_is_domain_error() {
        let mut s = Stack::new();
        s.push(Quantity::real(2.0)).unwrap();
        s.push(Quantity::real(0.0)).unwrap();
        assert_eq!(idiv(&mut s).unwrap_err(), QrpnError::Domain);
    }

    #[test]
    fn quadratic_roots_are_complex_conjugates() {
        let mut s = Stack::new();
        s.push(Quantity::real(1.0)).unwrap();
        s.push(Quantity::real(2.0)).unwrap();
        s.push(Quantity::real(3.0)).unwrap();
        quadratic(&mut s).unwrap();
        let r1 = s.pop().unwrap();
        let r0 = s.pop().unwrap();
        assert!((r0.value.re - (-1.0)).abs() < 1e-9);
        assert!((r1.value.re - (-1.0)).abs() < 1e-9);
        assert!((r0.value.im.abs() - std::f64::consts::SQRT_2).abs() < 1e-9);
        assert!((r1.value.im.abs() - std::f64::consts::SQRT_2).abs() < 1e-9);
    }
}
