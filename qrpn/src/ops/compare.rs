/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use num_complex::Complex64;

use crate::error::QrpnError;
use crate::quantity::Quantity;
use crate::stack::Stack;

fn binary(
    stack: &mut Stack,
    f: impl FnOnce(Quantity, Quantity) -> Result<bool, QrpnError>,
) -> Result<(), QrpnError> {
    stack.require(2)?;
    let snapshot = stack.snapshot();
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    match f(a, b) {
        Ok(truthy) => {
            stack.push(Quantity::real(if truthy { 1.0 } else { 0.0 })).unwrap();
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

pub fn eq(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        Ok(a.value == b.value)
    })
}

pub fn lt(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        require_real(&a)?;
        require_real(&b)?;
        Ok(a.value.re < b.value.re)
    })
}

pub fn le(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        require_real(&a)?;
        require_real(&b)?;
        Ok(a.value.re <= b.value.re)
    })
}

pub fn gt(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        require_real(&a)?;
        require_real(&b)?;
        Ok(a.value.re > b.value.re)
    })
}

pub fn ge(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_equivalent(&a, &b)?;
        require_real(&a)?;
        require_real(&b)?;
        Ok(a.value.re >= b.value.re)
    })
}

fn require_dimensionless(q: &Quantity) -> Result<(), QrpnError> {
    if q.is_dimensionless() {
        Ok(())
    } else {
        Err(QrpnError::MustBeUnitless)
    }
}

pub fn and(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_dimensionless(&a)?;
        require_dimensionless(&b)?;
        let zero = Complex64::new(0.0, 0.0);
        Ok(a.value != zero && b.value != zero)
    })
}

pub fn or(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        require_dimensionless(&a)?;
        require_dimensionless(&b)?;
        let zero = Complex64::new(0.0, 0.0);
        Ok(a.value != zero || b.value != zero)
    })
}

pub fn not(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(1)?;
    let snapshot = stack.snapshot();
    let a = stack.pop().unwrap();
    let result = (|| {
        require_dimensionless(&a)?;
        Ok(a.value == Complex64::new(0.0, 0.0))
    })();
    match result {
        Ok(truthy) => {
            stack.push(Quantity::real(if truthy { 1.0 } else { 0.0 })).unwrap();
            Ok(())
        }
        Err(err) => {
            stack.restore(snapshot);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_requires_equivalent_dims() {
        use crate::dimension::Dimension;
        let mut s = Stack::new();
        s.push(Quantity::real(1.0)).unwrap();
        s.push(Quantity::new(num_complex::Complex64::new(1.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0])))
            .unwrap();
        assert_eq!(eq(&mut s).unwrap_err(), QrpnError::InconsistentUnits);
    }

    #[test]
    fn not_flips_truthiness() {
        let mut s = Stack::new();
        s.push(Quantity::real(0.0)).unwrap();
        not(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 1.0);
    }
}
