//! Expression evaluator
//!
//! Every input is first normalized to fully parenthesized infix, then scanned
//! by [`calculate`], which recurses on parentheses and shares one [`Cursor`]
//! across all frames.

use smallvec::{smallvec, SmallVec};

use crate::config::EngineConfig;
use crate::error::{NotationError, Result};
use crate::evaluator::arith::{apply, parse_literal};
use crate::notation::{convert_to, identify, Cursor, Direction, NotationKind, Operator};

/// Partial results accumulated at one nesting level
pub type Values = SmallVec<[i64; 4]>;

/// Evaluate an infix, prefix or postfix expression with default limits
pub fn evaluate(expression: &str) -> Result<i64> {
    evaluate_with(expression, &EngineConfig::default())
}

/// Evaluate an expression under the given limits
pub fn evaluate_with(expression: &str, config: &EngineConfig) -> Result<i64> {
    let expression = expression.trim();
    config.check_length(expression)?;

    let kind = identify(expression);
    if kind == NotationKind::Unknown {
        return Err(NotationError::UnidentifiableNotation(expression.to_string()));
    }

    let infix = normalize(expression, kind)?;
    let mut cursor = Cursor::new(&infix, Direction::Forward);
    let values = calculate(&mut cursor, 0, config.max_nesting_depth)?;

    if !cursor.is_at_end() {
        return Err(NotationError::InvalidExpression(format!(
            "unbalanced ')' at byte {}",
            cursor.position()
        )));
    }

    match values.as_slice() {
        [value] => Ok(*value),
        [] => Err(NotationError::invalid("expression produced no value")),
        _ => Err(NotationError::invalid("operands are not joined by an operator")),
    }
}

/// Rewrite an expression as fully parenthesized, whitespace-free infix
///
/// Infix input is routed through postfix so that operator precedence is made
/// explicit before the left-to-right scan in [`calculate`].
pub fn normalize(expression: &str, kind: NotationKind) -> Result<String> {
    convert_to(expression, kind, NotationKind::Infix)
}

/// Recursive scan over fully parenthesized infix
///
/// Returns the values accumulated at the current level once the matching `)`
/// or the end of input is reached. Each operator replaces the whole level with
/// its single result, so operators apply strictly in scan order.
pub fn calculate(cursor: &mut Cursor<'_>, depth: usize, max_depth: usize) -> Result<Values> {
    if depth > max_depth {
        return Err(NotationError::NestingTooDeep(max_depth));
    }

    let mut values = Values::new();

    while let Some(c) = cursor.peek() {
        match c {
            '(' => {
                cursor.bump();
                let inner = calculate(cursor, depth + 1, max_depth)?;
                values.extend(inner);
            }
            ')' => {
                cursor.bump();
                return Ok(values);
            }
            c if c.is_ascii_digit() => {
                let digits = cursor.eat_while(|c| c.is_ascii_digit());
                values.push(parse_literal(digits)?);
            }
            c => {
                let Some(op) = Operator::from_char(c) else {
                    return Err(NotationError::InvalidExpression(format!(
                        "unexpected character '{}' at byte {}",
                        c,
                        cursor.position()
                    )));
                };
                cursor.bump();

                let lhs = values.last().copied().ok_or_else(|| {
                    NotationError::InvalidExpression(format!(
                        "operator '{}' is missing its left operand",
                        op
                    ))
                })?;
                let rhs = right_operand(cursor, op, depth, max_depth)?;
                values = smallvec![apply(op, lhs, rhs)?];
            }
        }
    }

    Ok(values)
}

/// A literal directly after the operator, or else the last value of a nested group
///
/// The group's `(` is consumed here so the nested frame ends at its own `)`.
fn right_operand(
    cursor: &mut Cursor<'_>,
    op: Operator,
    depth: usize,
    max_depth: usize,
) -> Result<i64> {
    let missing = || {
        NotationError::InvalidExpression(format!(
            "operator '{}' is missing its right operand",
            op
        ))
    };

    match cursor.peek() {
        Some(c) if c.is_ascii_digit() => parse_literal(cursor.eat_while(|c| c.is_ascii_digit())),
        Some('(') => {
            cursor.bump();
            calculate(cursor, depth + 1, max_depth)?
                .last()
                .copied()
                .ok_or_else(missing)
        }
        _ => Err(missing()),
    }
}
