/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::error::QrpnError;

/// Number of SI base dimensions tracked by a [`Dimension`] vector.
pub const BASE_UNITS: usize = 7;

/// Component indices, in the fixed order the spec mandates.
pub const METRE: usize = 0;
pub const KILOGRAM: usize = 1;
pub const SECOND: usize = 2;
pub const AMPERE: usize = 3;
pub const KELVIN: usize = 4;
pub const CANDELA: usize = 5;
pub const MOLE: usize = 6;

pub(crate) const BASE_UNIT_ABBREVIATIONS: [&str; BASE_UNITS] =
    ["m", "kg", "s", "A", "K", "Cd", "mol"];

/// A vector of signed exponents over the seven SI base dimensions
/// (metre, kilogram, second, ampere, kelvin, candela, mole). This is a
/// unit's "type": two quantities can only be added or compared if their
/// dimension vectors are identical.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct Dimension(pub [i8; BASE_UNITS]);

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension([0; BASE_UNITS]);
    pub const TIME: Dimension = Dimension::single(SECOND, 1);

    pub const fn new(components: [i8; BASE_UNITS]) -> Self {
        Dimension(components)
    }

    const fn single(index: usize, exponent: i8) -> Self {
        let mut c = [0i8; BASE_UNITS];
        c[index] = exponent;
        Dimension(c)
    }

    /// `true` if every component is zero.
    pub fn is_dimensionless(&self) -> bool {
        self.0 == [0; BASE_UNITS]
    }

    /// `true` if the two vectors are componentwise equal.
    pub fn equivalent(&self, other: &Dimension) -> bool {
        self.0 == other.0
    }

    /// If `self = k * base` for some nonzero integer `k`, returns `k`;
    /// otherwise returns `0`. Mirrors the source's `units_are_power_of`:
    /// find the first index where `base` is nonzero, derive a candidate
    /// `k` from it, then verify every other component agrees.
    pub fn power_of(&self, base: &Dimension) -> i32 {
        let mut exponent = 0i32;
        for i in 0..BASE_UNITS {
            if self.0[i] != 0 && base.0[i] != 0 {
                exponent = self.0[i] as i32 / base.0[i] as i32;
                break;
            }
        }
        if exponent == 0 {
            return 0;
        }
        for i in 0..BASE_UNITS {
            if self.0[i] as i32 != base.0[i] as i32 * exponent {
                return 0;
            }
        }
        exponent
    }

    /// Componentwise `self + sign * rhs`, range-checked into `i8` before
    /// any component is written back (the "compute wide, range-check,
    /// narrow" rule from spec §4.1).
    fn combine(&self, rhs: &Dimension, sign: i32) -> Result<Dimension, QrpnError> {
        let mut out = [0i8; BASE_UNITS];
        for i in 0..BASE_UNITS {
            let wide = self.0[i] as i32 + sign * rhs.0[i] as i32;
            out[i] = i8::try_from(wide).map_err(|_| QrpnError::DimensionOverflow)?;
        }
        Ok(Dimension(out))
    }

    pub fn added(&self, rhs: &Dimension) -> Result<Dimension, QrpnError> {
        self.combine(rhs, 1)
    }

    pub fn subtracted(&self, rhs: &Dimension) -> Result<Dimension, QrpnError> {
        self.combine(rhs, -1)
    }

    /// Componentwise `self * k`, range-checked.
    pub fn scaled(&self, k: i64) -> Result<Dimension, QrpnError> {
        let mut out = [0i8; BASE_UNITS];
        for i in 0..BASE_UNITS {
            let wide = self.0[i] as i64 * k;
            out[i] = i8::try_from(wide).map_err(|_| QrpnError::DimensionOverflow)?;
        }
        Ok(Dimension(out))
    }

    /// `self / k` componentwise, only valid when every component divides
    /// evenly; otherwise `None`.
    pub fn divided_exactly(&self, k: i64) -> Option<Dimension> {
        let mut out = [0i8; BASE_UNITS];
        for i in 0..BASE_UNITS {
            let c = self.0[i] as i64;
            if c % k != 0 {
                return None;
            }
            out[i] = (c / k) as i8;
        }
        Some(Dimension(out))
    }

    pub fn negated(&self) -> Result<Dimension, QrpnError> {
        self.scaled(-1)
    }

    pub fn components(&self) -> &[i8; BASE_UNITS] {
        &self.0
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first = true;
        for (i, &e) in self.0.iter().enumerate() {
            if e > 0 {
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                write!(f, "{}", BASE_UNIT_ABBREVIATIONS[i])?;
                if e > 1 {
                    write!(f, "^{}", e)?;
                }
            }
        }
        for (i, &e) in self.0.iter().enumerate() {
            if e < 0 {
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                write!(f, "{}^{}", BASE_UNIT_ABBREVIATIONS[i], e)?;
            }
        }
        Ok(())
    }
}
