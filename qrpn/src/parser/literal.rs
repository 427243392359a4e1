/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Literal classification: reserved atoms, numeric literals with their
//! trailing-character rules, DMS angles, ISO-8601 timestamps, falling
//! through to the unit parser when nothing else matches.

use std::f64::consts::PI;

use nom::branch::alt;
use nom::character::complete::char as nom_char;
use nom::combinator::{all_consuming, opt};
use nom::number::complete::recognize_float;
use num_complex::Complex64;

use crate::dimension::Dimension;
use crate::error::QrpnError;
use crate::parser::unit;
use crate::quantity::Quantity;
use crate::stack::Stack;

/// Recognize the longest valid float prefix of `s`, returning the parsed
/// value and the unconsumed remainder. Mirrors `strtod`'s partial-parse
/// behaviour, which `str::parse` doesn't offer directly.
fn parse_float_prefix(s: &str) -> Option<(f64, &str)> {
    let (rest, matched) = recognize_float::<_, nom::error::Error<&str>>(s).ok()?;
    if matched.is_empty() {
        return None;
    }
    matched.parse::<f64>().ok().map(|v| (v, rest))
}

fn dms(input: &str) -> nom::IResult<&str, (f64, f64, f64)> {
    let (input, deg) = recognize_float(input)?;
    let deg: f64 = deg.parse().unwrap_or(0.0);
    let (input, _) = alt((nom_char('d'), nom_char('°')))(input)?;
    let (input, min) = opt(recognize_float)(input)?;
    let min: f64 = min.and_then(|s: &str| s.parse().ok()).unwrap_or(0.0);
    let (input, _) = opt(alt((nom_char('m'), nom_char('\''))))(input)?;
    let (input, sec) = opt(recognize_float)(input)?;
    let sec: f64 = sec.and_then(|s: &str| s.parse().ok()).unwrap_or(0.0);
    let (input, _) = opt(alt((nom_char('s'), nom_char('"'))))(input)?;
    Ok((input, (deg, min, sec)))
}

/// Parse a full DMS angle token, returning radians.
fn try_parse_dms(token: &str) -> Option<f64> {
    let (_, (d, m, s)) = all_consuming(dms)(token).ok()?;
    let sign = if d.is_sign_negative() { -1.0 } else { 1.0 };
    Some(sign * (d.abs() + m / 60.0 + s / 3600.0) * PI / 180.0)
}

fn parse_date_part(s: &str) -> Option<(i32, u32, u32)> {
    if s.contains('-') {
        let mut it = s.splitn(3, '-');
        let year: i32 = it.next()?.parse().ok()?;
        let month: u32 = it.next()?.parse().ok()?;
        let day: u32 = it.next()?.parse().ok()?;
        Some((year, month, day))
    } else if s.len() == 8 {
        let year: i32 = s[0..4].parse().ok()?;
        let month: u32 = s[4..6].parse().ok()?;
        let day: u32 = s[6..8].parse().ok()?;
        Some((year, month, day))
    } else {
        None
    }
}

fn parse_time_part(s: &str) -> Option<(u32, u32, u32, u32)> {
    let (main, frac) = match s.split_once('.') {
        Some((m, f)) => (m, f),
        None => (s, ""),
    };
    let mut micros_str = frac.to_string();
    micros_str.truncate(6);
    while micros_str.len() < 6 {
        micros_str.push('0');
    }
    let micros: u32 = if frac.is_empty() { 0 } else { micros_str.parse().ok()? };

    if main.contains(':') {
        let mut it = main.splitn(3, ':');
        let hour: u32 = it.next()?.parse().ok()?;
        let minute: u32 = it.next()?.parse().ok()?;
        let second: u32 = it.next()?.parse().ok()?;
        Some((hour, minute, second, micros))
    } else if main.len() == 6 {
        let hour: u32 = main[0..2].parse().ok()?;
        let minute: u32 = main[2..4].parse().ok()?;
        let second: u32 = main[4..6].parse().ok()?;
        Some((hour, minute, second, micros))
    } else {
        None
    }
}

/// Parse one of the four accepted ISO-8601-like forms (see spec §6),
/// returning Unix epoch seconds with microsecond resolution.
fn parse_iso8601(token: &str) -> Result<f64, QrpnError> {
    let t_pos = token
        .find('T')
        .ok_or_else(|| QrpnError::TokenUnrecognized(token.to_string()))?;
    let z_pos = token
        .find('Z')
        .ok_or_else(|| QrpnError::TokenUnrecognized(token.to_string()))?;
    if z_pos < t_pos {
        return Err(QrpnError::TokenUnrecognized(token.to_string()));
    }

    let date_part = &token[..t_pos];
    let time_part = &token[t_pos + 1..z_pos];
    let remainder = &token[z_pos + 1..];
    if !remainder.is_empty() {
        log::warn!("qrpn: ignoring trailing data after timestamp {token:?}: {remainder:?}");
    }

    let (year, month, day) =
        parse_date_part(date_part).ok_or_else(|| QrpnError::TokenUnrecognized(token.to_string()))?;
    let (hour, minute, second, micros) =
        parse_time_part(time_part).ok_or_else(|| QrpnError::TokenUnrecognized(token.to_string()))?;

    let date = chrono::NaiveDate::from_ymd_opt(year, month, day).ok_or(QrpnError::Domain)?;
    let time = chrono::NaiveTime::from_hms_micro_opt(hour, minute, second, micros)
        .ok_or(QrpnError::Domain)?;
    let datetime = chrono::NaiveDateTime::new(date, time).and_utc();
    Ok(datetime.timestamp_micros() as f64 / 1e6)
}

fn push_real(stack: &mut Stack, value: f64) -> Result<(), QrpnError> {
    stack.push(Quantity::real(value))
}

fn push_complex(stack: &mut Stack, re: f64, im: f64) -> Result<(), QrpnError> {
    stack.push(Quantity::new(Complex64::new(re, im), Dimension::DIMENSIONLESS))
}

/// Classify and push `token` as a literal, falling through to the unit
/// parser (§4.4) when the token isn't one of the literal forms.
pub fn evaluate_literal(stack: &mut Stack, token: &str) -> Result<(), QrpnError> {
    match token {
        "pi" => return push_real(stack, PI),
        "-pi" => return push_real(stack, -PI),
        "i" => return push_complex(stack, 0.0, 1.0),
        "-i" => return push_complex(stack, 0.0, -1.0),
        "nan" => return push_real(stack, f64::NAN),
        _ => {}
    }

    let starts_alphabetic = token.chars().next().is_some_and(char::is_alphabetic);
    if !starts_alphabetic {
        if let Some((value, rest)) = parse_float_prefix(token) {
            if rest.is_empty() {
                return push_real(stack, value);
            }
            if rest.starts_with('d') || rest.starts_with('°') {
                if let Some(radians) = try_parse_dms(token) {
                    return push_real(stack, radians);
                }
            }
            if token.contains('T') && token.contains('Z') {
                let seconds = parse_iso8601(token)?;
                return stack.push(Quantity::new(Complex64::new(seconds, 0.0), Dimension::TIME));
            }
            if rest == "i" {
                return push_complex(stack, 0.0, value);
            }
            if rest.len() == 1 {
                let scale = match rest {
                    "k" => Some(1e3),
                    "M" => Some(1e6),
                    "G" => Some(1e9),
                    "f" => Some(1.0), // trailing `f`: tolerated, ignored.
                    _ => None,
                };
                if let Some(scale) = scale {
                    return push_real(stack, value * scale);
                }
            }
            // Malformed trailing characters: fall through to the unit parser.
        }
    }

    unit::evaluate_unit(stack, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_atoms() {
        let mut s = Stack::new();
        evaluate_literal(&mut s, "pi").unwrap();
        assert_eq!(s.pop().unwrap().value.re, PI);
        evaluate_literal(&mut s, "i").unwrap();
        assert_eq!(s.pop().unwrap().value, Complex64::new(0.0, 1.0));
    }

    #[test]
    fn plain_number() {
        let mut s = Stack::new();
        evaluate_literal(&mut s, "42.5").unwrap();
        assert_eq!(s.pop().unwrap().value.re, 42.5);
    }

    #[test]
    fn trailing_kilo_suffix() {
        let mut s = Stack::new();
        evaluate_literal(&mut s, "3k").unwrap();
        assert_eq!(s.pop().unwrap().value.re, 3000.0);
    }

    #[test]
    fn trailing_imaginary_suffix() {
        let mut s = Stack::new();
        evaluate_literal(&mut s, "2i").unwrap();
        assert_eq!(s.pop().unwrap().value, Complex64::new(0.0, 2.0));
    }

    #[test]
    fn iso8601_epoch() {
        let mut s = Stack::new();
        evaluate_literal(&mut s, "1970-01-01T00:00:00Z").unwrap();
        let top = s.pop().unwrap();
        assert_eq!(top.value.re, 0.0);
        assert_eq!(top.unit, Dimension::TIME);
    }

    #[test]
    fn dms_angle_is_radians() {
        let mut s = Stack::new();
        evaluate_literal(&mut s, "90d0m0s").unwrap();
        let top = s.pop().unwrap();
        assert!((top.value.re - PI / 2.0).abs() < 1e-12);
    }
}
