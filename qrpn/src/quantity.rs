/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::dimension::Dimension;
use crate::print;

/// A complex magnitude paired with its dimension vector. Quantities are
/// plain values: cheap to copy, never mutated in place by a reference.
#[derive(Serialize, Deserialize, PartialEq, Clone, Copy, Debug)]
pub struct Quantity {
    pub value: Complex64,
    pub unit: Dimension,
}

impl Quantity {
    pub fn new(value: Complex64, unit: Dimension) -> Self {
        Quantity { value, unit }
    }

    pub fn real(value: f64) -> Self {
        Quantity {
            value: Complex64::new(value, 0.0),
            unit: Dimension::DIMENSIONLESS,
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    pub fn is_real(&self) -> bool {
        self.value.im == 0.0
    }

    /// `true` if `value` is a real integer representable exactly in
    /// `f64` (used by `choose`/`gcd`/`lcm`/`isprime`/`idiv`/`pick`/`roll`).
    pub fn is_real_integer(&self) -> bool {
        self.is_real() && self.value.re.trunc() == self.value.re
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", print::format_quantity(self))
    }
}
