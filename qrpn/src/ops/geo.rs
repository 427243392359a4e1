/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Spherical great-circle geometry (bearing/range and waypoint
//! projection), both assuming dimensionless-radian latitude/longitude and
//! the mean Earth radius used throughout the registry's `Re` constant.

use crate::dimension::Dimension;
use crate::error::QrpnError;
use crate::quantity::Quantity;
use crate::stack::Stack;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn require_dimensionless_real(q: &Quantity) -> Result<f64, QrpnError> {
    if !q.is_dimensionless() {
        return Err(QrpnError::MustBeUnitless);
    }
    if !q.is_real() {
        return Err(QrpnError::MustBeReal);
    }
    Ok(q.value.re)
}

/// `lon_a lat_a lon_b lat_b -> bearing range`, via the haversine formula.
pub fn br(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(4)?;
    let snapshot = stack.snapshot();
    let lat_b_q = stack.pop().unwrap();
    let lon_b_q = stack.pop().unwrap();
    let lat_a_q = stack.pop().unwrap();
    let lon_a_q = stack.pop().unwrap();

    let result = (|| {
        let lon_a = require_dimensionless_real(&lon_a_q)?;
        let lat_a = require_dimensionless_real(&lat_a_q)?;
        let lon_b = require_dimensionless_real(&lon_b_q)?;
        let lat_b = require_dimensionless_real(&lat_b_q)?;

        let dlon = lon_b - lon_a;
        let y = dlon.sin() * lat_b.cos();
        let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * dlon.cos();
        let mut bearing = y.atan2(x);
        if bearing < 0.0 {
            bearing += 2.0 * std::f64::consts::PI;
        }

        let dlat = lat_b - lat_a;
        let a = (dlat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        let range = EARTH_RADIUS_M * c;

        Ok((bearing, range))
    })();

    match result {
        Ok((bearing, range)) => {
            stack.push(Quantity::real(bearing)).unwrap();
            stack
                .push(Quantity::new(
                    num_complex::Complex64::new(range, 0.0),
                    Dimension::new([1, 0, 0, 0, 0, 0, 0]),
                ))
                .unwrap();
            Ok(())
        }
        Err(err) => {
            stack.restore(snapshot);
            Err(err)
        }
    }
}

/// `lon lat bearing range -> lon' lat'`, projecting a waypoint forward
/// along a great circle. `range` may be in metres (divided by the Earth
/// radius) or dimensionless radians.
pub fn travel(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(4)?;
    let snapshot = stack.snapshot();
    let range_q = stack.pop().unwrap();
    let bearing_q = stack.pop().unwrap();
    let lat_q = stack.pop().unwrap();
    let lon_q = stack.pop().unwrap();

    let result = (|| {
        let lon = require_dimensionless_real(&lon_q)?;
        let lat = require_dimensionless_real(&lat_q)?;
        let bearing = require_dimensionless_real(&bearing_q)?;
        if !range_q.is_real() {
            return Err(QrpnError::MustBeReal);
        }
        let angular_distance = if range_q.is_dimensionless() {
            range_q.value.re
        } else if range_q.unit.equivalent(&Dimension::new([1, 0, 0, 0, 0, 0, 0])) {
            range_q.value.re / EARTH_RADIUS_M
        } else {
            return Err(QrpnError::InconsistentUnits);
        };

        let lat2 = (lat.sin() * angular_distance.cos() + lat.cos() * angular_distance.sin() * bearing.cos())
            .asin();
        let lon2 = lon
            + (bearing.sin() * angular_distance.sin() * lat.cos())
                .atan2(angular_distance.cos() - lat.sin() * lat2.sin());

        Ok((lon2, lat2))
    })();

    match result {
        Ok((lon2, lat2)) => {
            stack.push(Quantity::real(lon2)).unwrap();
            stack.push(Quantity::real(lat2)).unwrap();
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
    fn br_along_equator_has_zero_bearing() {
        let mut s = Stack::new();
        s.push(Quantity::real(0.0)).unwrap(); // lon_a
        s.push(Quantity::real(0.0)).unwrap(); // lat_a
        s.push(Quantity::real(0.0)).unwrap(); // lon_b
        s.push(Quantity::real(1.0)).unwrap(); // lat_b (north of a)
        br(&mut s).unwrap();
        let range = stack_pop_value(&mut s);
        let bearing = stack_pop_value(&mut s);
        assert!(bearing.abs() < 1e-9);
        assert!((range - EARTH_RADIUS_M).abs() < 1.0);
    }

    fn stack_pop_value(s: &mut Stack) -> f64 {
        s.pop().unwrap().value.re
    }

    #[test]
    fn travel_and_br_are_approximately_inverse() {
        let mut s = Stack::new();
        s.push(Quantity::real(0.0)).unwrap(); // lon
        s.push(Quantity::real(0.0)).unwrap(); // lat
        s.push(Quantity::real(0.0)).unwrap(); // bearing (due north)
        s.push(Quantity::new(
            num_complex::Complex64::new(1000.0, 0.0),
            Dimension::new([1, 0, 0, 0, 0, 0, 0]),
        ))
        .unwrap(); // range in metres
        travel(&mut s).unwrap();
        let lat2 = stack_pop_value(&mut s);
        let lon2 = stack_pop_value(&mut s);
        assert!(lon2.abs() < 1e-9);
        assert!(lat2 > 0.0);
    }
}
