//! Checked integer arithmetic for the evaluator

use crate::error::{NotationError, Result};
use crate::notation::Operator;

/// Apply `op` to two integers
///
/// `/` floors toward negative infinity; `^` needs a non-negative exponent.
pub fn apply(op: Operator, lhs: i64, rhs: i64) -> Result<i64> {
    let overflow = || NotationError::Overflow(format!("{} {} {}", lhs, op, rhs));

    match op {
        Operator::Add => lhs.checked_add(rhs).ok_or_else(overflow),
        Operator::Sub => lhs.checked_sub(rhs).ok_or_else(overflow),
        Operator::Mul => lhs.checked_mul(rhs).ok_or_else(overflow),
        Operator::Div => floor_div(lhs, rhs)?.ok_or_else(overflow),
        Operator::Pow => {
            if rhs < 0 {
                return Err(NotationError::NegativeExponent(rhs));
            }
            let exp = u32::try_from(rhs).map_err(|_| overflow())?;
            lhs.checked_pow(exp).ok_or_else(overflow)
        }
    }
}

/// Floor division; `Ok(None)` on overflow (`i64::MIN / -1`)
fn floor_div(lhs: i64, rhs: i64) -> Result<Option<i64>> {
    if rhs == 0 {
        return Err(NotationError::DivisionByZero);
    }
    let Some(q) = lhs.checked_div(rhs) else {
        return Ok(None);
    };
    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        Ok(Some(q - 1))
    } else {
        Ok(Some(q))
    }
}

/// Parse a run of ASCII digits
pub fn parse_literal(digits: &str) -> Result<i64> {
    digits
        .parse::<i64>()
        .map_err(|_| NotationError::Overflow(format!("literal {} does not fit in 64 bits", digits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(apply(Operator::Add, 3, 4), Ok(7));
        assert_eq!(apply(Operator::Sub, 3, 4), Ok(-1));
        assert_eq!(apply(Operator::Mul, 3, 4), Ok(12));
        assert_eq!(apply(Operator::Div, 10, 3), Ok(3));
        assert_eq!(apply(Operator::Pow, 2, 10), Ok(1024));
        assert_eq!(apply(Operator::Pow, 5, 0), Ok(1));
    }

    #[test]
    fn test_division_floors() {
        assert_eq!(apply(Operator::Div, -7, 2), Ok(-4));
        assert_eq!(apply(Operator::Div, 7, -2), Ok(-4));
        assert_eq!(apply(Operator::Div, -7, -2), Ok(3));
        assert_eq!(apply(Operator::Div, -8, 2), Ok(-4));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(apply(Operator::Div, 1, 0), Err(NotationError::DivisionByZero));
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(
            apply(Operator::Pow, 2, -1),
            Err(NotationError::NegativeExponent(-1))
        );
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            apply(Operator::Mul, i64::MAX, 2),
            Err(NotationError::Overflow(_))
        ));
        assert!(matches!(
            apply(Operator::Div, i64::MIN, -1),
            Err(NotationError::Overflow(_))
        ));
        assert!(matches!(
            apply(Operator::Pow, 2, 64),
            Err(NotationError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_literal("007"), Ok(7));
        assert!(matches!(
            parse_literal("99999999999999999999"),
            Err(NotationError::Overflow(_))
        ));
    }
}
