/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use chrono::{DateTime, Datelike, Timelike, Utc};
use num_complex::Complex64;

use crate::dimension::Dimension;
use crate::error::QrpnError;
use crate::quantity::Quantity;
use crate::stack::Stack;

/// `seconds -> year month day hour minute second`, broken down in UTC.
pub fn date(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(1)?;
    let snapshot = stack.snapshot();
    let top = stack.pop().unwrap();

    let result = (|| {
        if top.unit != Dimension::TIME {
            return Err(QrpnError::InconsistentUnits);
        }
        if !top.is_real() {
            return Err(QrpnError::MustBeReal);
        }
        let micros = (top.value.re * 1e6).round() as i64;
        let dt: DateTime<Utc> = DateTime::from_timestamp_micros(micros).ok_or(QrpnError::Domain)?;
        let fractional_second = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
        Ok([
            dt.year() as f64,
            dt.month() as f64,
            dt.day() as f64,
            dt.hour() as f64,
            dt.minute() as f64,
            fractional_second,
        ])
    })();

    match result {
        Ok(fields) => {
            for field in fields {
                stack.push(Quantity::real(field)).unwrap();
            }
            Ok(())
        }
        Err(err) => {
            stack.restore(snapshot);
            Err(err)
        }
    }
}

/// Repeatedly add adjacent pairs (bottom to top) while their dimensions
/// agree, reducing the whole stack to a single accumulator.
pub fn sum(stack: &mut Stack) -> Result<(), QrpnError> {
    if stack.is_empty() {
        return Err(QrpnError::NotEnoughStack);
    }
    let snapshot = stack.snapshot();
    let mut values = Vec::with_capacity(stack.len());
    while !stack.is_empty() {
        values.push(stack.pop().unwrap());
    }
    values.reverse();

    let mut acc = values[0];
    for value in &values[1..] {
        if !acc.unit.equivalent(&value.unit) {
            stack.restore(snapshot);
            return Err(QrpnError::InconsistentUnits);
        }
        acc.value += value.value;
    }
    stack.push(acc).unwrap();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_of_epoch_is_1970() {
        let mut s = Stack::new();
        s.push(Quantity::new(Complex64::new(0.0, 0.0), Dimension::TIME)).unwrap();
        date(&mut s).unwrap();
        assert_eq!(s.len(), 6);
        let second = s.pop().unwrap().value.re;
        let minute = s.pop().unwrap().value.re;
        let hour = s.pop().unwrap().value.re;
        let day = s.pop().unwrap().value.re;
        let month = s.pop().unwrap().value.re;
        let year = s.pop().unwrap().value.re;
        assert_eq!([year, month, day, hour, minute, second], [1970.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn sum_reduces_equivalent_quantities() {
        let mut s = Stack::new();
        s.push(Quantity::real(1.0)).unwrap();
        s.push(Quantity::real(2.0)).unwrap();
        s.push(Quantity::real(3.0)).unwrap();
        sum(&mut s).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.pop().unwrap().value.re, 6.0);
    }

    #[test]
    fn sum_rejects_mismatched_dims() {
        let mut s = Stack::new();
        s.push(Quantity::real(1.0)).unwrap();
        s.push(Quantity::new(Complex64::new(1.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0])))
            .unwrap();
        assert_eq!(sum(&mut s).unwrap_err(), QrpnError::InconsistentUnits);
        assert_eq!(s.len(), 2);
    }
}
