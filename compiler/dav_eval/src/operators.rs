//! Binary operator implementations.
//!
//! Direct enum dispatch over the closed value set. The logical operators
//! need truthiness and short-circuiting, so the interpreter handles `and`,
//! `or` and `not` itself.

use std::rc::Rc;

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_unary_op, modulo_by_zero,
    EvalResult,
};
use crate::expr::{BinaryOp, UnaryOp};
use crate::value::Value;

/// Checked integer arithmetic with overflow reporting.
#[inline]
fn checked_arith(result: Option<i64>, op: BinaryOp) -> EvalResult {
    result
        .map(Value::Int)
        .ok_or_else(|| integer_overflow(op.symbol()))
}

/// Evaluate a non-logical binary operation.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Ne => Ok(Value::Bool(left != right)),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => compare(left, right, op),
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::FloorDiv
        | BinaryOp::Mod
        | BinaryOp::Pow => {
            match (left, right) {
                (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
                _ => match (left.as_float(), right.as_float()) {
                    (Some(a), Some(b)) => eval_float_binary(a, b, op),
                    _ => Err(binary_type_mismatch(op.symbol(), left, right)),
                },
            }
        }
        BinaryOp::And | BinaryOp::Or => Err(binary_type_mismatch(op.symbol(), left, right)),
    }
}

fn compare(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let Some(ordering) = left.compare(right) else {
        return Err(binary_type_mismatch(op.symbol(), left, right));
    };
    Ok(Value::Bool(match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::Le => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        _ => ordering.is_ge(),
    }))
}

fn add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => checked_arith(a.checked_add(*b), BinaryOp::Add),
        (Value::Text(a), Value::Text(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Text(Rc::from(joined)))
        }
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        _ => match (left.as_float(), right.as_float()) {
            (Some(a), Some(b)) => Ok(Value::Float(a + b)),
            _ => Err(binary_type_mismatch("+", left, right)),
        },
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Sub => checked_arith(a.checked_sub(b), op),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), op),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a as f64 / b as f64))
            }
        }
        // Rust's `/` and `%` truncate toward zero, so the remainder takes
        // the sign of the dividend.
        BinaryOp::FloorDiv => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), op)
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(a.checked_rem(b), op)
            }
        }
        BinaryOp::Pow => int_pow(a, b),
        _ => eval_float_binary(a as f64, b as f64, op),
    }
}

fn int_pow(base: i64, exp: i64) -> EvalResult {
    if exp < 0 {
        return Ok(Value::Float((base as f64).powf(exp as f64)));
    }
    let result = u32::try_from(exp).ok().and_then(|e| base.checked_pow(e));
    checked_arith(result, BinaryOp::Pow)
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            a / b
        }
        BinaryOp::FloorDiv => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            (a / b).trunc()
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(modulo_by_zero());
            }
            a % b
        }
        BinaryOp::Pow => a.powf(b),
        _ => return Err(binary_type_mismatch(op.symbol(), &Value::Float(a), &Value::Float(b))),
    };
    Ok(Value::Float(value))
}

/// Evaluate unary minus. `not` is handled by the interpreter.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("-")),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        _ => Err(invalid_unary_op(op.symbol(), operand)),
    }
}
