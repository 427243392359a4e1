/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use crate::error::QrpnError;
use crate::stack::Stack;

pub fn swap(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(2)?;
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    stack.push(b).unwrap();
    stack.push(a).unwrap();
    Ok(())
}

#[allow(clippy::should_implement_trait)]
pub fn drop(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.pop()?;
    Ok(())
}

pub fn dup(stack: &mut Stack) -> Result<(), QrpnError> {
    let top = stack.peek(0)?;
    stack.push(top)
}

pub fn over(stack: &mut Stack) -> Result<(), QrpnError> {
    let second = stack.peek(1)?;
    stack.push(second)
}

/// `n pick` copies the element at depth `n+1` (before popping `n`) to the
/// top. `n` itself is a dimensionless nonnegative integer, consumed in
/// place.
pub fn pick(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(1)?;
    let snapshot = stack.snapshot();
    let n = stack.pop().unwrap();
    let result = (|| {
        if !n.is_dimensionless() || !n.is_real_integer() || n.value.re < 0.0 {
            return Err(QrpnError::MustBeInteger);
        }
        stack.peek(n.value.re as usize)
    })();
    match result {
        Ok(value) => {
            stack.push(value).unwrap();
            Ok(())
        }
        Err(err) => {
            stack.restore(snapshot);
            Err(err)
        }
    }
}

/// `n roll` consumes `n` and rotates the top `n+2` elements, bringing the
/// element at depth `n+1` to position `S-2` (one below the new top).
pub fn roll(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(1)?;
    let snapshot = stack.snapshot();
    let n = stack.pop().unwrap();
    let result = (|| {
        if !n.is_dimensionless() || !n.is_real_integer() || n.value.re < 0.0 {
            return Err(QrpnError::MustBeInteger);
        }
        let depth = n.value.re as usize + 1;
        let moved = stack.remove_from_top(depth)?;
        stack.insert_from_top(1, moved)
    })();
    if result.is_err() {
        stack.restore(snapshot);
    }
    result
}

pub fn rot(stack: &mut Stack) -> Result<(), QrpnError> {
    stack.require(3)?;
    let c = stack.pop().unwrap();
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    stack.push(b).unwrap();
    stack.push(c).unwrap();
    stack.push(a).unwrap();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::Quantity;

    fn q(v: f64) -> Quantity {
        Quantity::real(v)
    }

    #[test]
    fn swap_exchanges_top_two() {
        let mut s = Stack::new();
        s.push(q(1.0)).unwrap();
        s.push(q(2.0)).unwrap();
        swap(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 1.0);
        assert_eq!(s.pop().unwrap().value.re, 2.0);
    }

    #[test]
    fn over_duplicates_second() {
        let mut s = Stack::new();
        s.push(q(1.0)).unwrap();
        s.push(q(2.0)).unwrap();
        over(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 1.0);
    }

    #[test]
    fn pick_zero_is_dup() {
        let mut s = Stack::new();
        s.push(q(1.0)).unwrap();
        s.push(q(2.0)).unwrap();
        s.push(q(0.0)).unwrap();
        pick(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 2.0);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn roll_zero_is_a_no_op() {
        let mut s = Stack::new();
        s.push(q(1.0)).unwrap();
        s.push(q(2.0)).unwrap();
        s.push(q(0.0)).unwrap();
        roll(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 2.0);
        assert_eq!(s.pop().unwrap().value.re, 1.0);
    }

    #[test]
    fn roll_one_moves_third_element_below_top() {
        let mut s = Stack::new();
        s.push(q(1.0)).unwrap();
        s.push(q(2.0)).unwrap();
        s.push(q(3.0)).unwrap();
        s.push(q(1.0)).unwrap();
        roll(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 3.0);
        assert_eq!(s.pop().unwrap().value.re, 1.0);
        assert_eq!(s.pop().unwrap().value.re, 2.0);
    }

    #[test]
    fn rot_rotates_top_three() {
        let mut s = Stack::new();
        s.push(q(1.0)).unwrap();
        s.push(q(2.0)).unwrap();
        s.push(q(3.0)).unwrap();
        rot(&mut s).unwrap();
        assert_eq!(s.pop().unwrap().value.re, 1.0);
        assert_eq!(s.pop().unwrap().value.re, 3.0);
        assert_eq!(s.pop().unwrap().value.re, 2.0);
    }
}
