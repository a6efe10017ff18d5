//! Builtin function table.
//!
//! Builtins are pure functions over [`Value`] (apart from the random ones,
//! which draw from the interpreter's RNG). Each checks its own arity and
//! argument shapes and reports a typed failure on mismatch.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::Rng;

use crate::errors::{
    binary_type_mismatch, integer_overflow, invalid_argument, type_mismatch, wrong_arg_count,
    EvalError, EvalResult,
};
use crate::expr::BinaryOp;
use crate::operators::evaluate_binary;
use crate::value::Value;

/// Longest list `range` will build.
const MAX_RANGE_LEN: i64 = 10_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Length,
    Max,
    Min,
    Sum,
    Average,
    Random,
    RandomInt,
    Sqrt,
    Power,
    Abs,
    Round,
    Uppercase,
    Lowercase,
    Contains,
    Replace,
    Split,
    Join,
    Sort,
    Reverse,
    Range,
}

impl Builtin {
    /// Look up a builtin by canonical id (see `dav_vocab::BUILTIN_IDS`).
    pub fn from_id(id: &str) -> Option<Self> {
        Some(match id {
            "length" => Builtin::Length,
            "max" => Builtin::Max,
            "min" => Builtin::Min,
            "sum" => Builtin::Sum,
            "average" => Builtin::Average,
            "random" => Builtin::Random,
            "random_int" => Builtin::RandomInt,
            "sqrt" => Builtin::Sqrt,
            "power" => Builtin::Power,
            "abs" => Builtin::Abs,
            "round" => Builtin::Round,
            "uppercase" => Builtin::Uppercase,
            "lowercase" => Builtin::Lowercase,
            "contains" => Builtin::Contains,
            "replace" => Builtin::Replace,
            "split" => Builtin::Split,
            "join" => Builtin::Join,
            "sort" => Builtin::Sort,
            "reverse" => Builtin::Reverse,
            "range" => Builtin::Range,
            _ => return None,
        })
    }

    pub fn id(self) -> &'static str {
        match self {
            Builtin::Length => "length",
            Builtin::Max => "max",
            Builtin::Min => "min",
            Builtin::Sum => "sum",
            Builtin::Average => "average",
            Builtin::Random => "random",
            Builtin::RandomInt => "random_int",
            Builtin::Sqrt => "sqrt",
            Builtin::Power => "power",
            Builtin::Abs => "abs",
            Builtin::Round => "round",
            Builtin::Uppercase => "uppercase",
            Builtin::Lowercase => "lowercase",
            Builtin::Contains => "contains",
            Builtin::Replace => "replace",
            Builtin::Split => "split",
            Builtin::Join => "join",
            Builtin::Sort => "sort",
            Builtin::Reverse => "reverse",
            Builtin::Range => "range",
        }
    }

    fn arity(self) -> RangeInclusive<usize> {
        match self {
            Builtin::Random => 0..=0,
            Builtin::Length
            | Builtin::Sum
            | Builtin::Average
            | Builtin::Sqrt
            | Builtin::Abs
            | Builtin::Uppercase
            | Builtin::Lowercase
            | Builtin::Sort
            | Builtin::Reverse => 1..=1,
            Builtin::Round | Builtin::Split | Builtin::Join => 1..=2,
            Builtin::RandomInt | Builtin::Power | Builtin::Contains | Builtin::Range => 2..=2,
            Builtin::Replace => 3..=3,
            Builtin::Max | Builtin::Min => 1..=usize::MAX,
        }
    }

    pub fn call(self, args: &[Value], rng: &mut StdRng) -> EvalResult {
        let name = self.id();
        check_arity(name, args, self.arity())?;
        match self {
            Builtin::Length => length(&args[0]),
            Builtin::Max => extreme(name, args, Ordering::Greater),
            Builtin::Min => extreme(name, args, Ordering::Less),
            Builtin::Sum => sum(name, &args[0]),
            Builtin::Average => average(name, &args[0]),
            Builtin::Random => Ok(Value::Float(rng.gen::<f64>())),
            Builtin::RandomInt => random_int(name, &args[0], &args[1], rng),
            Builtin::Sqrt => sqrt(name, &args[0]),
            Builtin::Power => evaluate_binary(&args[0], &args[1], BinaryOp::Pow),
            Builtin::Abs => abs(&args[0]),
            Builtin::Round => round(name, &args[0], args.get(1)),
            Builtin::Uppercase => Ok(Value::text(text_arg(name, &args[0])?.to_uppercase())),
            Builtin::Lowercase => Ok(Value::text(text_arg(name, &args[0])?.to_lowercase())),
            Builtin::Contains => contains(&args[0], &args[1]),
            Builtin::Replace => {
                let s = text_arg(name, &args[0])?;
                let old = text_arg(name, &args[1])?;
                let new = text_arg(name, &args[2])?;
                if old.is_empty() {
                    return Err(invalid_argument(name, "cannot replace empty text"));
                }
                Ok(Value::text(s.replace(old, new)))
            }
            Builtin::Split => split(name, &args[0], args.get(1)),
            Builtin::Join => join(name, &args[0], args.get(1)),
            Builtin::Sort => sort(name, &args[0]),
            Builtin::Reverse => reverse(&args[0]),
            Builtin::Range => range(name, &args[0], &args[1]),
        }
    }
}

pub(crate) fn check_arity(
    name: &str,
    args: &[Value],
    expected: RangeInclusive<usize>,
) -> Result<(), EvalError> {
    if expected.contains(&args.len()) {
        return Ok(());
    }
    let (lo, hi) = (*expected.start(), *expected.end());
    let description = if lo == hi {
        lo.to_string()
    } else if hi == usize::MAX {
        format!("at least {lo}")
    } else {
        format!("{lo} to {hi}")
    };
    Err(wrong_arg_count(name, &description, args.len()))
}

pub(crate) fn number_arg(name: &str, value: &Value) -> Result<f64, EvalError> {
    value
        .as_float()
        .ok_or_else(|| invalid_argument(name, type_mismatch("number", value).message))
}

pub(crate) fn int_arg(name: &str, value: &Value) -> Result<i64, EvalError> {
    value
        .as_int()
        .ok_or_else(|| invalid_argument(name, type_mismatch("int", value).message))
}

fn text_arg<'v>(name: &str, value: &'v Value) -> Result<&'v str, EvalError> {
    value
        .as_text()
        .ok_or_else(|| invalid_argument(name, type_mismatch("text", value).message))
}

fn list_arg(name: &str, value: &Value) -> Result<Vec<Value>, EvalError> {
    match value {
        Value::List(items) => Ok(items.borrow().clone()),
        _ => Err(invalid_argument(name, type_mismatch("list", value).message)),
    }
}

/// Convert a float to an integer, failing when it does not fit.
pub(crate) fn float_to_int(x: f64, operation: &str) -> EvalResult {
    if x.is_finite() && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Ok(Value::Int(x as i64))
    } else {
        Err(integer_overflow(operation))
    }
}

fn length(value: &Value) -> EvalResult {
    let len = match value {
        Value::Text(s) => s.chars().count(),
        Value::List(items) => items.borrow().len(),
        Value::Map(entries) => entries.borrow().len(),
        _ => return Err(type_mismatch("text, list or map", value)),
    };
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| integer_overflow("length"))
}

/// `max`/`min` over one list argument or over two or more arguments.
fn extreme(name: &str, args: &[Value], keep: Ordering) -> EvalResult {
    let items = match args {
        [Value::List(items)] => items.borrow().clone(),
        [single] => return Err(invalid_argument(name, type_mismatch("list", single).message)),
        _ => args.to_vec(),
    };
    let mut iter = items.into_iter();
    let Some(mut best) = iter.next() else {
        return Err(invalid_argument(name, "empty list"));
    };
    for item in iter {
        match item.compare(&best) {
            Some(ordering) if ordering == keep => best = item,
            Some(_) => {}
            None => return Err(binary_type_mismatch(name, &best, &item)),
        }
    }
    Ok(best)
}

fn sum(name: &str, value: &Value) -> EvalResult {
    let items = list_arg(name, value)?;
    let mut total = Value::Int(0);
    for item in &items {
        if !item.is_number() {
            return Err(invalid_argument(name, type_mismatch("number", item).message));
        }
        total = evaluate_binary(&total, item, BinaryOp::Add)?;
    }
    Ok(total)
}

fn average(name: &str, value: &Value) -> EvalResult {
    let items = list_arg(name, value)?;
    if items.is_empty() {
        return Ok(Value::Int(0));
    }
    let total = sum(name, value)?;
    let total = total.as_float().unwrap_or_default();
    Ok(Value::Float(total / items.len() as f64))
}

fn random_int(name: &str, low: &Value, high: &Value, rng: &mut StdRng) -> EvalResult {
    let (low, high) = (int_arg(name, low)?, int_arg(name, high)?);
    if low > high {
        return Err(invalid_argument(name, format!("empty range {low}..{high}")));
    }
    Ok(Value::Int(rng.gen_range(low..=high)))
}

fn sqrt(name: &str, value: &Value) -> EvalResult {
    let x = number_arg(name, value)?;
    if x < 0.0 {
        return Err(invalid_argument(name, "square root of a negative number"));
    }
    Ok(Value::Float(x.sqrt()))
}

pub(crate) fn abs(value: &Value) -> EvalResult {
    match value {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("abs")),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        _ => Err(invalid_argument("abs", type_mismatch("number", value).message)),
    }
}

/// Round half to even. Without digits the result is an integer.
pub(crate) fn round(name: &str, value: &Value, digits: Option<&Value>) -> EvalResult {
    let x = number_arg(name, value)?;
    match digits {
        None => match value {
            Value::Int(n) => Ok(Value::Int(*n)),
            _ => float_to_int(x.round_ties_even(), name),
        },
        Some(digits) => {
            let digits = int_arg(name, digits)?;
            let digits = i32::try_from(digits.clamp(-308, 308)).unwrap_or_default();
            let factor = 10f64.powi(digits);
            Ok(Value::Float((x * factor).round_ties_even() / factor))
        }
    }
}

fn contains(haystack: &Value, needle: &Value) -> EvalResult {
    let found = match (haystack, needle) {
        (Value::Text(s), Value::Text(sub)) => s.contains(&**sub),
        (Value::List(items), _) => items.borrow().iter().any(|item| item == needle),
        (Value::Map(entries), Value::Text(key)) => entries.borrow().contains_key(&**key),
        _ => return Err(binary_type_mismatch("contains", haystack, needle)),
    };
    Ok(Value::Bool(found))
}

fn split(name: &str, value: &Value, separator: Option<&Value>) -> EvalResult {
    let s = text_arg(name, value)?;
    let parts: Vec<Value> = match separator {
        None => s.split_whitespace().map(Value::text).collect(),
        Some(sep) => {
            let sep = text_arg(name, sep)?;
            if sep.is_empty() {
                return Err(invalid_argument(name, "empty separator"));
            }
            s.split(sep).map(Value::text).collect()
        }
    };
    Ok(Value::list(parts))
}

fn join(name: &str, value: &Value, separator: Option<&Value>) -> EvalResult {
    let items = list_arg(name, value)?;
    let sep = match separator {
        Some(sep) => text_arg(name, sep)?,
        None => "",
    };
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep);
    Ok(Value::text(joined))
}

/// Stable ascending sort into a new list. Items must be mutually comparable.
fn sort(name: &str, value: &Value) -> EvalResult {
    let mut items = list_arg(name, value)?;
    if let Some(pair) = items.windows(2).find(|w| w[0].compare(&w[1]).is_none()) {
        return Err(binary_type_mismatch(name, &pair[0], &pair[1]));
    }
    items.sort_by(|a, b| a.compare(b).unwrap_or(Ordering::Equal));
    Ok(Value::list(items))
}

fn reverse(value: &Value) -> EvalResult {
    match value {
        Value::List(items) => Ok(Value::list(items.borrow().iter().rev().cloned().collect())),
        Value::Text(s) => Ok(Value::text(s.chars().rev().collect::<String>())),
        _ => Err(invalid_argument("reverse", type_mismatch("list or text", value).message)),
    }
}

/// Inclusive integer range.
fn range(name: &str, start: &Value, end: &Value) -> EvalResult {
    let (start, end) = (int_arg(name, start)?, int_arg(name, end)?);
    if end < start {
        return Ok(Value::list(Vec::new()));
    }
    if end.saturating_sub(start) >= MAX_RANGE_LEN {
        return Err(invalid_argument(name, format!("range of more than {MAX_RANGE_LEN} items")));
    }
    Ok(Value::list((start..=end).map(Value::Int).collect()))
}
