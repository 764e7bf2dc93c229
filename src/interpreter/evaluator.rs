//! Expression evaluation
//!
//! [`evaluate`] walks an expression tree against the environment and produces
//! a [`Value`]. It never mutates the environment or the console; only
//! statement execution does.
//!
//! # Typing rules
//!
//! - `int ∘ int` stays `int` for `+ - *`, with overflow checked
//! - any `float` operand promotes the result to `float`
//! - `/` always produces a `float`; dividing by zero is an error
//! - `str + str` concatenates; mixing `str` with anything else is a type mismatch
//! - comparisons need compatible operands: number/number, str/str, or
//!   bool/bool (equality only)

use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::memory::Environment;
use crate::parser::ast::{BinOp, Expr, SourceLocation};
use std::cmp::Ordering;

/// Evaluate an expression and return its value
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Literal { value, .. } => Ok(Value::from(value)),

        Expr::Identifier { name, location } => {
            env.get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UndefinedVariable {
                    name: name.clone(),
                    location: *location,
                })
        }

        Expr::BinaryOp {
            op,
            left,
            right,
            location,
        } => {
            let lhs = evaluate(left, env)?;
            let rhs = evaluate(right, env)?;
            evaluate_binary(*op, &lhs, &rhs, *location)
        }

        Expr::RangeCall { location, .. } => Err(RuntimeError::TypeMismatch {
            message: "range() cannot be used as a value".to_string(),
            location: *location,
        }),
    }
}

/// Apply a binary operator to two evaluated operands
pub fn evaluate_binary(
    op: BinOp,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    if op.is_comparison() {
        return compare_values(op, left, right, location).map(Value::Bool);
    }

    match (op, left, right) {
        (BinOp::Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
        (BinOp::Add, Value::Str(_), other) | (BinOp::Add, other, Value::Str(_)) => {
            Err(RuntimeError::TypeMismatch {
                message: format!(
                    "cannot concatenate str and {} ({} + {})",
                    other.type_name(),
                    left.repr(),
                    right.repr()
                ),
                location,
            })
        }
        (BinOp::Div, _, _) => checked_div(left, right, location),
        (_, Value::Int(a), Value::Int(b)) => checked_int_op(op, *a, *b, location),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Float(match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                _ => a * b,
            })),
            _ => Err(unsupported_operands(op, left, right, location)),
        },
    }
}

#[inline]
fn checked_int_op(
    op: BinOp,
    a: i64,
    b: i64,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    let result = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        _ => a.checked_mul(b),
    };
    result
        .map(Value::Int)
        .ok_or_else(|| RuntimeError::IntegerOverflow {
            operation: format!("{} {} {}", a, op, b),
            location,
        })
}

/// `/` always yields a float so that `7 / 2` is `3.5`, never a silently truncated `3`
#[inline]
fn checked_div(left: &Value, right: &Value, location: SourceLocation) -> Result<Value, RuntimeError> {
    let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
        return Err(unsupported_operands(BinOp::Div, left, right, location));
    };

    if b == 0.0 {
        return Err(RuntimeError::DivisionByZero {
            operation: format!("{} / {}", left.repr(), right.repr()),
            location,
        });
    }

    Ok(Value::Float(a / b))
}

fn compare_values(
    op: BinOp,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<bool, RuntimeError> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        (Value::Bool(a), Value::Bool(b)) if matches!(op, BinOp::Eq | BinOp::Ne) => a.partial_cmp(b),
        _ if left.is_number() && right.is_number() => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        },
        _ => {
            return Err(RuntimeError::TypeMismatch {
                message: format!(
                    "cannot compare {} and {} with '{}'",
                    left.type_name(),
                    right.type_name(),
                    op
                ),
                location,
            })
        }
    };

    // NaN compares unequal to everything
    let Some(ordering) = ordering else {
        return Ok(op == BinOp::Ne);
    };

    Ok(match op {
        BinOp::Eq => ordering == Ordering::Equal,
        BinOp::Ne => ordering != Ordering::Equal,
        BinOp::Lt => ordering == Ordering::Less,
        BinOp::Le => ordering != Ordering::Greater,
        BinOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    })
}

fn unsupported_operands(op: BinOp, left: &Value, right: &Value, location: SourceLocation) -> RuntimeError {
    RuntimeError::TypeMismatch {
        message: format!(
            "unsupported operand types for '{}': {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ),
        location,
    }
}
