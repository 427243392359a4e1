/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use crate::error::QrpnError;
use crate::quantity::Quantity;
use crate::stack::Stack;

/// Largest integer exactly representable in `f64`, matching the `isprime`
/// domain limit from spec §4.5.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0; // 2^53

fn require_nonneg_int(q: &Quantity) -> Result<u64, QrpnError> {
    if !q.is_dimensionless() {
        return Err(QrpnError::MustBeUnitless);
    }
    if !q.is_real_integer() {
        return Err(QrpnError::MustBeInteger);
    }
    if q.value.re < 0.0 {
        return Err(QrpnError::MustBeNonnegative);
    }
    Ok(q.value.re as u64)
}

fn binary(
    stack: &mut Stack,
    f: impl FnOnce(u64, u64) -> Result<f64, QrpnError>,
) -> Result<(), QrpnError> {
    stack.require(2)?;
    let snapshot = stack.snapshot();
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    let result = (|| {
        let a = require_nonneg_int(&a)?;
        let b = require_nonneg_int(&b)?;
        f(a, b)
    })();
    match result {
        Ok(value) => {
            stack.push(Quantity::real(value)).unwrap();
            Ok(())
        }
        Err(err) => {
            stack.restore(snapshot);
            Err(err)
        }
    }
}

fn choose_exact(n: u64, k: u64) -> Result<f64, QrpnError> {
    if k > n {
        return Err(QrpnError::Domain);
    }
    let k = k.min(n - k);
    let mut result = 1.0f64;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    Ok(result.round())
}

pub fn choose(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, choose_exact)
}

fn gcd_u64(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd_u64(b, a % b)
    }
}

pub fn gcd(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| Ok(gcd_u64(a, b) as f64))
}

pub fn lcm(stack: &mut Stack) -> Result<(), QrpnError> {
    binary(stack, |a, b| {
        if a == 0 && b == 0 {
            return Ok(0.0);
        }
        Ok((a / gcd_u64(a, b)) as f64 * b as f64)
    })
}

pub fn isprime(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(1)?;
    let snapshot = stack.snapshot();
    let a = stack.pop().unwrap();
    let result = (|| {
        if !a.is_dimensionless() {
            return Err(QrpnError::MustBeUnitless);
        }
        if !a.is_real_integer() {
            return Err(QrpnError::MustBeInteger);
        }
        if a.value.re < 0.0 {
            return Err(QrpnError::MustBeNonnegative);
        }
        if a.value.re > MAX_EXACT_INT {
            return Err(QrpnError::Domain);
        }
        let n = a.value.re as u64;
        let is_prime = if n < 2 {
            false
        } else {
            let limit = (n as f64).sqrt().ceil() as u64;
            !(2..=limit).any(|d| n % d == 0)
        };
        Ok(if is_prime { 1.0 } else { 0.0 })
    })();
    match result {
        Ok(value) => {
            stack.push(Quantity::real(value)).unwrap();
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
    fn choose_is_symmetric() {
        let mut s = Stack::new();
        s.push(Quantity::real(10.0)).unwrap();
        s.push(Quantity::real(3.0)).unwrap();
        choose(&mut s).unwrap();
        let forward = s.pop().unwrap().value.re;

        s.push(Quantity::real(10.0)).unwrap();
        s.push(Quantity::real(7.0)).unwrap();
        choose(&mut s).unwrap();
        let backward = s.pop().unwrap().value.re;

        assert_eq!(forward, backward);
        assert_eq!(forward, 120.0);
    }

    #[test]
    fn gcd_times_lcm_equals_product() {
        let mut s = Stack::new();
        s.push(Quantity::real(12.0)).unwrap();
        s.push(Quantity::real(18.0)).unwrap();
        gcd(&mut s).unwrap();
        let g = s.pop().unwrap().value.re;

        s.push(Quantity::real(12.0)).unwrap();
        s.push(Quantity::real(18.0)).unwrap();
        lcm(&mut s).unwrap();
        let l = s.pop().unwrap().value.re;

        assert_eq!(g * l, 12.0 * 18.0);
    }

    #[test]
    fn isprime_detects_small_primes() {
        let mut s = Stack::new();
        s.push(Quantity::real(17.0)).unwrap();
        isprime(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 1.0);

        s.push(Quantity::real(18.0)).unwrap();
        isprime(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 0.0);
    }
}
