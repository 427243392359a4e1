/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! The structured-control sublanguage: `if/else/endif`,
//! `begin/until`, `begin/while/repeat`, layered over the plain operator
//! evaluator. Implemented as a recursive scan over the token slice rather
//! than a pre-compiled branch table — either is observably identical, and
//! a direct scan keeps the evaluator free of a separate compile pass.

use crate::error::QrpnError;
use crate::ops;
use crate::stack::Stack;

enum BeginKind {
    Until(usize),
    While(usize, usize),
}

/// Skip one complete nested block starting at `tokens[start]` (which must
/// be `"if"` or `"begin"`), returning the index just past it.
fn skip_block(tokens: &[&str], start: usize) -> Result<usize, QrpnError> {
    match tokens[start] {
        "if" => {
            let (_, endif_idx) = find_if_closers(tokens, start + 1)?;
            Ok(endif_idx + 1)
        }
        "begin" => match find_begin_closers(tokens, start + 1)? {
            BeginKind::Until(idx) => Ok(idx + 1),
            BeginKind::While(_, repeat_idx) => Ok(repeat_idx + 1),
        },
        other => unreachable!("skip_block called on non-opener token {other:?}"),
    }
}

/// From just after an `if`, find the matching `else` (if present) and
/// `endif` at the same nesting level.
fn find_if_closers(tokens: &[&str], start: usize) -> Result<(Option<usize>, usize), QrpnError> {
    let mut i = start;
    let mut else_idx = None;
    loop {
        if i >= tokens.len() {
            return Err(QrpnError::UnmatchedControlStatement);
        }
        match tokens[i] {
            "if" | "begin" => i = skip_block(tokens, i)?,
            "else" if else_idx.is_none() => {
                else_idx = Some(i);
                i += 1;
            }
            "endif" => return Ok((else_idx, i)),
            "until" | "while" | "repeat" => return Err(QrpnError::UnmatchedControlStatement),
            _ => i += 1,
        }
    }
}

/// From just after a `begin`, find the matching `until`, or the matching
/// `while`/`repeat` pair, at the same nesting level.
fn find_begin_closers(tokens: &[&str], start: usize) -> Result<BeginKind, QrpnError> {
    let mut i = start;
    loop {
        if i >= tokens.len() {
            return Err(QrpnError::UnmatchedControlStatement);
        }
        match tokens[i] {
            "if" | "begin" => i = skip_block(tokens, i)?,
            "until" => return Ok(BeginKind::Until(i)),
            "while" => {
                let repeat_idx = find_repeat(tokens, i + 1)?;
                return Ok(BeginKind::While(i, repeat_idx));
            }
            "else" | "endif" => return Err(QrpnError::UnmatchedControlStatement),
            _ => i += 1,
        }
    }
}

fn find_repeat(tokens: &[&str], start: usize) -> Result<usize, QrpnError> {
    let mut i = start;
    loop {
        if i >= tokens.len() {
            return Err(QrpnError::UnmatchedControlStatement);
        }
        match tokens[i] {
            "if" | "begin" => i = skip_block(tokens, i)?,
            "repeat" => return Ok(i),
            "until" | "else" | "endif" => return Err(QrpnError::UnmatchedControlStatement),
            _ => i += 1,
        }
    }
}

fn pop_truthy(stack: &mut Stack) -> Result<bool, QrpnError> {
    let flag = stack.pop()?;
    if !flag.is_dimensionless() {
        return Err(QrpnError::MustBeUnitless);
    }
    Ok(flag.value != num_complex::Complex64::new(0.0, 0.0))
}

/// Evaluate a full token list, recursing into `if`/`begin` bodies.
pub fn evaluate_tokens(stack: &mut Stack, tokens: &[&str]) -> Result<(), QrpnError> {
    let mut i = 0;
    while i < tokens.len() {
        i = evaluate_one(stack, tokens, i)?;
    }
    Ok(())
}

fn evaluate_one(stack: &mut Stack, tokens: &[&str], i: usize) -> Result<usize, QrpnError> {
    match tokens[i] {
        "if" => {
            let (else_idx, endif_idx) = find_if_closers(tokens, i + 1)?;
            let truthy = pop_truthy(stack)?;
            let body = if truthy {
                &tokens[i + 1..else_idx.unwrap_or(endif_idx)]
            } else if let Some(else_idx) = else_idx {
                &tokens[else_idx + 1..endif_idx]
            } else {
                &[][..]
            };
            evaluate_tokens(stack, body)?;
            Ok(endif_idx + 1)
        }
        "begin" => match find_begin_closers(tokens, i + 1)? {
            BeginKind::Until(until_idx) => {
                let body = &tokens[i + 1..until_idx];
                loop {
                    evaluate_tokens(stack, body)?;
                    if pop_truthy(stack)? {
                        break;
                    }
                }
                Ok(until_idx + 1)
            }
            BeginKind::While(while_idx, repeat_idx) => {
                let head = &tokens[i + 1..while_idx];
                let tail = &tokens[while_idx + 1..repeat_idx];
                loop {
                    evaluate_tokens(stack, head)?;
                    if !pop_truthy(stack)? {
                        break;
                    }
                    evaluate_tokens(stack, tail)?;
                }
                Ok(repeat_idx + 1)
            }
        },
        "else" | "endif" | "until" | "while" | "repeat" => {
            Err(QrpnError::UnmatchedControlStatement)
        }
        token => {
            ops::evaluate_leaf(stack, token)?;
            Ok(i + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Result<Stack, QrpnError> {
        let mut stack = Stack::new();
        let tokens: Vec<&str> = input.split(' ').filter(|t| !t.is_empty()).collect();
        evaluate_tokens(&mut stack, &tokens)?;
        Ok(stack)
    }

    #[test]
    fn if_else_endif_picks_the_right_branch() {
        assert_eq!(run("1 if 42 else 7 endif").unwrap().pop().unwrap().value.re, 42.0);
        assert_eq!(run("0 if 42 else 7 endif").unwrap().pop().unwrap().value.re, 7.0);
    }

    #[test]
    fn begin_until_counts_up() {
        let mut stack = run("5 0 begin 1 + dup 10 ge until").unwrap();
        assert_eq!(stack.pop().unwrap().value.re, 10.0);
    }

    #[test]
    fn begin_while_repeat_runs_conditionally() {
        let mut stack = run("0 begin dup 3 lt while 1 + repeat").unwrap();
        assert_eq!(stack.pop().unwrap().value.re, 3.0);
    }

    #[test]
    fn stray_closer_is_an_error() {
        assert_eq!(run("endif").unwrap_err(), QrpnError::UnmatchedControlStatement);
    }

    #[test]
    fn begin_until_nested_inside_if() {
        let mut stack = run("1 if 1 0 begin 1 + dup 3 ge until else 99 endif").unwrap();
        assert_eq!(stack.pop().unwrap().value.re, 3.0);
        assert_eq!(stack.pop().unwrap().value.re, 1.0);
    }
}
