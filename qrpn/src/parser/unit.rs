/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Compound unit expressions: `<prefix><unit>[^exp][/<prefix><unit>[^exp]]`.
//! A unit token multiplies the current top of stack in place, rather than
//! pushing a value of its own — except for `ENTERS_AS_OPERAND` entries
//! (named physical constants), which push a fresh `1` first.

use num_complex::Complex64;

use crate::dimension::Dimension;
use crate::error::QrpnError;
use crate::quantity::Quantity;
use crate::registry::{AliasKind, Flags, NAMED_QUANTITIES, SI_PREFIXES};
use crate::stack::Stack;
use crate::value;

struct ResolvedAtom {
    entry_index: usize,
    prefix_scale: f64,
    exponent: i32,
}

/// Split off a trailing `^<signed-int>`, returning the exponent (default
/// `1`) and the remaining unit body.
fn split_exponent(atom: &str) -> Result<(&str, i32), QrpnError> {
    match atom.split_once('^') {
        Some((body, exp)) => {
            let exponent: i32 = exp
                .parse()
                .map_err(|_| QrpnError::TokenUnrecognized(atom.to_string()))?;
            Ok((body, exponent))
        }
        None => Ok((atom, 1)),
    }
}

/// Resolve a single atom (no `/`, no `^` — already stripped) against the
/// registry: find the named quantity whose alias is a suffix of `body`,
/// then find a prefix matching the remaining leading bytes. Prefix
/// abbreviations only pair with unit abbreviations; prefix full names
/// only pair with unit full names.
fn resolve_atom(body: &str) -> Option<(usize, f64)> {
    for (index, entry) in NAMED_QUANTITIES.iter().enumerate() {
        for alias in entry.aliases().into_iter().flatten() {
            let (text, kind) = alias;
            if text.len() > body.len() {
                continue;
            }
            let split = body.len() - text.len();
            if &body[split..] != text {
                continue;
            }
            let prefix_part = &body[..split];
            if prefix_part.is_empty() {
                return Some((index, 1.0));
            }
            for prefix in SI_PREFIXES.iter() {
                let candidate = match kind {
                    AliasKind::Abbreviation => prefix.abbreviation,
                    _ => prefix.name,
                };
                if candidate == prefix_part {
                    return Some((index, prefix.scale));
                }
            }
        }
    }
    None
}

fn resolve(atom: &str) -> Result<ResolvedAtom, QrpnError> {
    let (body, exponent) = split_exponent(atom)?;
    let (entry_index, prefix_scale) =
        resolve_atom(body).ok_or_else(|| QrpnError::TokenUnrecognized(atom.to_string()))?;
    Ok(ResolvedAtom {
        entry_index,
        prefix_scale,
        exponent,
    })
}

/// Apply a single resolved atom (already sign-adjusted) to the stack's
/// current top: multiply the magnitude, add the dimension.
fn apply(stack: &mut Stack, resolved: &ResolvedAtom, sign: i32) -> Result<(), QrpnError> {
    let entry = &NAMED_QUANTITIES[resolved.entry_index];
    let e = resolved.exponent * sign;

    if entry.flags.contains(Flags::ENTERS_AS_OPERAND) {
        stack.push(Quantity::real(1.0))?;
    }

    let mut top = stack.pop()?;
    let unit_delta = entry
        .dimension
        .scaled(e as i64)
        .map_err(|_| QrpnError::DimensionOverflow)?;
    let new_dim = top.unit.added(&unit_delta)?;
    let factor = value::powi_checked(Complex64::new(resolved.prefix_scale * entry.value, 0.0), e);
    top.value *= factor;
    top.unit = new_dim;
    stack.push(top)?;
    Ok(())
}

/// Parse and apply a (possibly compound) unit token: `<atom>[/<atom>]`.
pub fn evaluate_unit(stack: &mut Stack, token: &str) -> Result<(), QrpnError> {
    let snapshot = stack.snapshot();
    let (numerator, denominator) = match token.split_once('/') {
        Some((n, d)) => (n, Some(d)),
        None => (token, None),
    };

    let num = resolve(numerator).map_err(|err| {
        stack.restore(snapshot.clone());
        err
    })?;
    if let Err(err) = apply(stack, &num, 1) {
        stack.restore(snapshot.clone());
        return Err(err);
    }

    if let Some(denominator) = denominator {
        let den = resolve(denominator).map_err(|err| {
            stack.restore(snapshot.clone());
            err
        })?;
        if let Err(err) = apply(stack, &den, -1) {
            stack.restore(snapshot);
            return Err(err);
        }
    }
    Ok(())
}
