/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! The unit-aware pretty printer: three strategies, tried in order, plus
//! the magnitude formatting rules from spec §4.7.

use crate::quantity::Quantity;
use crate::registry::{Flags, NAMED_QUANTITIES};

const COLLOQUIAL_TOLERANCE: f64 = 1e-6;

/// Scan non-SI registry entries with `q`'s exact dimension; a match
/// requires `q.v` to sit within a `10⁻⁶` relative tolerance of the
/// entry's own scalar — this is "is `q` (almost) exactly one of this
/// unit", not "is `q` some multiple of it". The first matching entry in
/// declaration order wins; never sort this search.
fn colloquial(q: &Quantity) -> Option<String> {
    if !q.is_real() {
        return None;
    }
    for entry in NAMED_QUANTITIES
        .iter()
        .filter(|e| !e.flags.contains(Flags::BASE) && !e.flags.contains(Flags::DERIVED))
    {
        if !entry.dimension.equivalent(&q.unit) {
            continue;
        }
        if ((q.value.re - entry.value) / entry.value).abs() > COLLOQUIAL_TOLERANCE {
            continue;
        }
        let ratio = q.value.re / entry.value;
        return Some(if entry.flags.contains(Flags::ENTERS_AS_OPERAND) {
            format!("{} ({})", entry.display_name(), base(q))
        } else {
            format!("{} {} ({})", format_real(ratio), entry.display_name(), base(q))
        });
    }
    None
}

/// Scan SI base/derived entries for an exact integer-power match, trying
/// both signs so that e.g. `Hz` (exponent `-1` of `s`) is found starting
/// from `s`.
fn si_derived(q: &Quantity) -> Option<String> {
    for sign in [1, -1] {
        for entry in NAMED_QUANTITIES
            .iter()
            .filter(|e| e.flags.contains(Flags::BASE) || e.flags.contains(Flags::DERIVED))
        {
            let k = q.unit.power_of(&entry.dimension);
            if k == 0 || k * sign <= 0 {
                continue;
            }
            let ratio = q.value.re / entry.value;
            let exponent = if k == 1 { String::new() } else { format!("^{k}") };
            return Some(format!("{} {}{}", format_magnitude(ratio_to_complex(ratio, q)), entry.si_label(), exponent));
        }
    }
    None
}

fn ratio_to_complex(ratio: f64, q: &Quantity) -> num_complex::Complex64 {
    num_complex::Complex64::new(ratio, q.value.im)
}

fn base(q: &Quantity) -> String {
    let dim = q.unit.to_string();
    if dim.is_empty() {
        format_magnitude(q.value)
    } else {
        format!("{} {}", format_magnitude(q.value), dim)
    }
}

fn format_real(x: f64) -> String {
    format!("{x}")
}

fn format_magnitude(value: num_complex::Complex64) -> String {
    if value.re.abs() >= 1e6 && value.im == 0.0 {
        return format!("{:.15e}", value.re);
    }
    if value.re.abs() * 1e14 < value.im.abs() {
        return if value.im == 1.0 {
            "i".to_string()
        } else if value.im == -1.0 {
            "-i".to_string()
        } else {
            format!("{}i", format_real(value.im))
        };
    }
    let mut out = format_real(value.re);
    if value.im.abs() * 1e14 > value.re.abs() {
        out.push_str(&format!(" \u{b1} {}i", format_real(value.im.abs())));
    }
    out
}

/// Render `q` using the colloquial, then SI-derived, then base strategy.
pub fn format_quantity(q: &Quantity) -> String {
    colloquial(q)
        .or_else(|| si_derived(q))
        .unwrap_or_else(|| base(q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use num_complex::Complex64;

    #[test]
    fn base_units_print_with_abbreviation() {
        let q = Quantity::new(Complex64::new(1.0, 0.0), Dimension::new([1, 0, -1, 0, 0, 0, 0]));
        let printed = format_quantity(&q);
        assert!(printed.contains('m'));
    }

    #[test]
    fn addition_result_prints_in_base_units() {
        let q = Quantity::new(Complex64::new(5000.0, 0.0), Dimension::new([1, 0, 0, 0, 0, 0, 0]));
        let printed = format_quantity(&q);
        assert!(printed.starts_with("5000"));
    }

    #[test]
    fn dimensionless_prints_bare_magnitude() {
        let q = Quantity::real(3.5);
        assert_eq!(format_quantity(&q), "3.5");
    }

    #[test]
    fn purely_imaginary_unit_prints_as_i() {
        let q = Quantity::new(Complex64::new(0.0, 1.0), Dimension::DIMENSIONLESS);
        assert_eq!(format_quantity(&q), "i");
    }
}
