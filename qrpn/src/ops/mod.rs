/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Operator dispatch. One `match` maps operator names to handlers grouped
//! by family (binary-dimension-matching, unary-dimensionless-real, ...);
//! this is the "single mapping" the design notes prefer over a long
//! cascade of `if`/`else`.

mod arithmetic;
mod combinatorics;
mod compare;
mod geo;
mod stack_shuffle;
mod time;
mod transcendental;
mod unary;

use crate::error::QrpnError;
use crate::parser::literal;
use crate::stack::Stack;

/// Look up `token` as an operator and run it, or fall through to literal
/// parsing if it isn't one. This is the single entry point both the
/// public façade and the control interpreter use for a leaf token.
pub fn evaluate_leaf(stack: &mut Stack, token: &str) -> Result<(), QrpnError> {
    match dispatch(stack, token) {
        Some(result) => result,
        None => literal::evaluate_literal(stack, token),
    }
}

fn dispatch(stack: &mut Stack, token: &str) -> Option<Result<(), QrpnError>> {
    let result = match token {
        "add" | "+" => arithmetic::add(stack),
        "sub" | "-" => arithmetic::sub(stack),
        "mul" | "*" => arithmetic::mul(stack),
        "div" | "/" => arithmetic::div(stack),
        "mod" | "%" => arithmetic::modulo(stack),
        "hypot" => arithmetic::hypot(stack),
        "atan2" => arithmetic::atan2(stack),
        "idiv" => arithmetic::idiv(stack),
        "quadratic" => arithmetic::quadratic(stack),

        "rcp" => unary::rcp(stack),
        "chs" => unary::chs(stack),
        "abs" => unary::abs(stack),
        "real" => unary::real(stack),
        "imaginary" => unary::imaginary(stack),
        "arg" => unary::arg(stack),
        "square" => unary::square(stack),
        "sqrt" => unary::sqrt(stack),
        "nextafter" => unary::nextafter(stack),
        "nextafterf" => unary::nextafterf(stack),
        "pow" => unary::pow(stack),
        "rpow" => unary::rpow(stack),

        "hav" => transcendental::hav(stack),
        "crd" => transcendental::crd(stack),
        "exsec" => transcendental::exsec(stack),
        "ahav" => transcendental::ahav(stack),
        "acrd" => transcendental::acrd(stack),
        "aexsec" => transcendental::aexsec(stack),
        "floor" => transcendental::floor(stack),
        "ceil" => transcendental::ceil(stack),
        "round" => transcendental::round(stack),
        "erfc" => transcendental::erfc(stack),
        "log2" => transcendental::log2(stack),
        "log10" => transcendental::log10(stack),
        "tenlog" => transcendental::tenlog(stack),
        "itenlog" => transcendental::itenlog(stack),
        "gamma" => transcendental::gamma(stack),
        "cos" => transcendental::cos(stack),
        "sin" => transcendental::sin(stack),
        "tan" => transcendental::tan(stack),
        "tanh" => transcendental::tanh(stack),
        "acos" => transcendental::acos(stack),
        "asin" => transcendental::asin(stack),
        "atan" => transcendental::atan(stack),
        "exp" => transcendental::exp(stack),
        "log" => transcendental::log(stack),

        "choose" => combinatorics::choose(stack),
        "gcd" => combinatorics::gcd(stack),
        "lcm" => combinatorics::lcm(stack),
        "isprime" => combinatorics::isprime(stack),

        "swap" => stack_shuffle::swap(stack),
        "drop" => stack_shuffle::drop(stack),
        "dup" => stack_shuffle::dup(stack),
        "over" => stack_shuffle::over(stack),
        "pick" => stack_shuffle::pick(stack),
        "roll" => stack_shuffle::roll(stack),
        "rot" => stack_shuffle::rot(stack),

        "eq" => compare::eq(stack),
        "lt" => compare::lt(stack),
        "le" => compare::le(stack),
        "gt" => compare::gt(stack),
        "ge" => compare::ge(stack),
        "and" => compare::and(stack),
        "or" => compare::or(stack),
        "not" => compare::not(stack),

        "br" => geo::br(stack),
        "travel" => geo::travel(stack),

        "date" => time::date(stack),
        "sum" => time::sum(stack),

        "print" => match stack.peek(0) {
            Ok(top) => {
                log::debug!("qrpn print: {top}");
                Ok(())
            }
            Err(err) => Err(err),
        },

        _ => return None,
    };
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::Quantity;

    #[test]
    fn unknown_token_falls_through() {
        let mut s = Stack::new();
        assert!(dispatch(&mut s, "frobnicate").is_none());
    }

    #[test]
    fn print_does_not_consume() {
        let mut s = Stack::new();
        s.push(Quantity::real(1.0)).unwrap();
        evaluate_leaf(&mut s, "print").unwrap();
        assert_eq!(s.len(), 1);
    }
}
