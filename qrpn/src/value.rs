/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Complex-value helpers. A [`Quantity`](crate::quantity::Quantity)'s
//! magnitude is a plain `num_complex::Complex64`; this module only adds the
//! bits the standard type doesn't get right for our purposes.

use num_complex::Complex64;

/// `base ^ exponent`, routing real bases with a real integer exponent
/// through [`f64::powi`] instead of `Complex64::powc`/`powf`.
///
/// `Complex64::powf` goes through `exp(ln(z) * w)`, which loses precision
/// for integer powers of real numbers (e.g. `(-8.0).powf(1.0/3.0)` takes a
/// branch of the complex logarithm that a real cube root wouldn't). The
/// source works around the analogous C library gap with a hand-written
/// `cpow_checked`; we do the same here.
pub fn powc_checked(base: Complex64, exponent: Complex64) -> Complex64 {
    if base.im == 0.0 && exponent.im == 0.0 {
        let (re, ie) = (base.re, exponent.re);
        if ie.round() == ie && ie.abs() < i32::MAX as f64 {
            return Complex64::new(re.powi(ie as i32), 0.0);
        }
        return Complex64::new(re.powf(ie), 0.0);
    }
    base.powc(exponent)
}

/// Integer power, real-preserving: used wherever the exponent is already
/// known to be an integer (the `square`/`pow`/`rpow` dimension-checked
/// paths).
pub fn powi_checked(base: Complex64, exponent: i32) -> Complex64 {
    if base.im == 0.0 {
        Complex64::new(base.re.powi(exponent), 0.0)
    } else {
        base.powi(exponent)
    }
}

/// Normalises `-0.0i` to `+0.0i`, so that `[1] chs sqrt` lands on `+i`
/// rather than `-i` (the branch cut of `sqrt` is sensitive to the sign of
/// a zero imaginary part). Mirrors the source's special case in `chs`.
pub fn normalize_negative_zero_imaginary(v: Complex64) -> Complex64 {
    if v.im == 0.0 && v.im.is_sign_negative() {
        Complex64::new(v.re, 0.0)
    } else {
        v
    }
}
