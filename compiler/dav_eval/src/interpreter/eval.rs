//! Expression evaluation and calls.

use std::rc::Rc;

use dav_stack::ensure_sufficient_stack;

use super::{Flow, Interpreter, UserFunction};
use crate::builtins::Builtin;
use crate::errors::{
    index_out_of_bounds, key_not_found, not_indexable, type_mismatch, undefined_function,
    undefined_module, undefined_variable, EvalError, EvalResult,
};
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::Value;

/// Parsed expressions kept before the cache starts over.
const EXPR_CACHE_LIMIT: usize = 4096;

impl Interpreter {
    /// Parse and evaluate expression text. Empty text is `None`.
    pub(super) fn eval_text(&mut self, text: &str) -> EvalResult {
        let expr = match self.expr_cache.get(text) {
            Some(expr) => Rc::clone(expr),
            None => {
                let Some(expr) = self.exprs.parse(text)? else {
                    return Ok(Value::None);
                };
                tracing::trace!(text, canonical = %self.exprs.canonical_form(text), "parsed expression");
                let expr = Rc::new(expr);
                if self.expr_cache.len() >= EXPR_CACHE_LIMIT {
                    tracing::debug!(entries = self.expr_cache.len(), "expression cache reset");
                    self.expr_cache.clear();
                }
                self.expr_cache.insert(text.to_string(), Rc::clone(&expr));
                expr
            }
        };
        self.eval_expr(&expr)
    }

    /// Evaluate text, reporting a soft failure and yielding `None` for it.
    ///
    /// Only fatal failures are returned as errors.
    pub(super) fn eval_or_none(&mut self, text: &str) -> EvalResult {
        match self.eval_text(text) {
            Err(err) if !err.is_fatal() => {
                self.report(&err);
                Ok(Value::None)
            }
            result => result,
        }
    }

    pub(super) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Float(x) => Ok(Value::Float(*x)),
            Expr::Text(s) => Ok(Value::text(s.as_str())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Ident(name) => self.env.lookup(name).ok_or_else(|| undefined_variable(name)),
            Expr::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.eval_expr(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }
            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy(&self.vocab))),
                    UnaryOp::Neg => evaluate_unary(*op, &value),
                }
            }
            Expr::Binary { op, left, right } => self.eval_binary(*op, left, right),
            Expr::Call { module, name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                match module {
                    Some(module) => self.call_module(module, name, &args),
                    None => self.call_named(name, args),
                }
            }
            Expr::Member { module, member } => match self.env.module(module) {
                Some(handle) => handle.constant(member),
                None => Err(undefined_module(module)),
            },
            Expr::Index { target, index } => {
                let target = self.eval_expr(target)?;
                let index = self.eval_expr(index)?;
                index_value(&target, &index)
            }
        }
    }

    /// `and`/`or` short-circuit on truthiness and yield a boolean.
    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        let left = self.eval_expr(left)?;
        match op {
            BinaryOp::And | BinaryOp::Or => {
                let left_true = left.is_truthy(&self.vocab);
                if (op == BinaryOp::And) != left_true {
                    return Ok(Value::Bool(left_true));
                }
                let right = self.eval_expr(right)?;
                Ok(Value::Bool(right.is_truthy(&self.vocab)))
            }
            _ => {
                let right = self.eval_expr(right)?;
                evaluate_binary(&left, &right, op)
            }
        }
    }

    /// Call a builtin or user function by surface name. Builtins win.
    pub(super) fn call_named(&mut self, name: &str, args: Vec<Value>) -> EvalResult {
        if let Some(builtin) = self.vocab.builtin_id(name).and_then(Builtin::from_id) {
            tracing::trace!(name, builtin = builtin.id(), "builtin call");
            return builtin.call(&args, &mut self.rng);
        }
        match self.functions.get(name) {
            Some(function) => {
                let function = Rc::clone(function);
                self.call_function(&function, args)
            }
            None => Err(undefined_function(name)),
        }
    }

    fn call_module(&mut self, module: &str, member: &str, args: &[Value]) -> EvalResult {
        match self.env.module(module) {
            Some(handle) => handle.call(member, args, &mut self.rng),
            None => Err(undefined_module(module)),
        }
    }

    /// Invoke a user function in a fresh local scope.
    ///
    /// Missing arguments are `None`; extra ones are dropped with a warning.
    #[tracing::instrument(level = "debug", skip_all, fields(name = %function.name))]
    pub(super) fn call_function(&mut self, function: &UserFunction, args: Vec<Value>) -> EvalResult {
        if args.len() > function.params.len() {
            self.warn(format!(
                "{} takes {} argument(s) but {} were given; the extra ones are ignored",
                function.name,
                function.params.len(),
                args.len()
            ));
        }
        let mut scoped = self.enter_call(&function.name)?;
        let mut args = args.into_iter();
        for param in &function.params {
            let value = args.next().unwrap_or_default();
            scoped.env.declare(param, value);
        }
        let flow = ensure_sufficient_stack(|| scoped.exec_blocks(&function.body))?;
        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::None),
            Flow::Break | Flow::Continue => {
                scoped.stray_signal(&flow);
                Ok(Value::None)
            }
        }
    }
}

/// Element of a list or text by position, or of a map by key.
fn index_value(target: &Value, index: &Value) -> EvalResult {
    match (target, index) {
        (Value::List(items), Value::Int(i)) => {
            let items = items.borrow();
            position(*i, items.len()).map(|at| items[at].clone())
        }
        (Value::Text(text), Value::Int(i)) => {
            let len = text.chars().count();
            let at = position(*i, len)?;
            text.chars()
                .nth(at)
                .map(|c| Value::text(c.to_string()))
                .ok_or_else(|| index_out_of_bounds(*i, len))
        }
        (Value::Map(entries), Value::Text(key)) => entries
            .borrow()
            .get(&**key)
            .cloned()
            .ok_or_else(|| key_not_found(key)),
        (Value::List(_) | Value::Text(_), other) => Err(type_mismatch("int", other)),
        (Value::Map(_), other) => Err(type_mismatch("text", other)),
        _ => Err(not_indexable(target)),
    }
}

/// Zero-based position; negative or past-the-end indices fail.
fn position(index: i64, len: usize) -> Result<usize, EvalError> {
    usize::try_from(index)
        .ok()
        .filter(|&at| at < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::print_handler::silent_handler;
    use pretty_assertions::assert_eq;

    #[test]
    fn expression_cache_stays_bounded() {
        let mut interp = Interpreter::builder().print_handler(silent_handler()).build();
        for i in 0..EXPR_CACHE_LIMIT + 100 {
            let text = format!("{i} + 1");
            assert_eq!(interp.eval_expression(&text).unwrap(), Value::Int(i64::try_from(i).unwrap() + 1));
            assert!(interp.expr_cache.len() <= EXPR_CACHE_LIMIT);
        }
        assert_eq!(interp.expr_cache.len(), 100);
    }

    #[test]
    fn cached_expressions_see_current_values() {
        let mut interp = Interpreter::builder().print_handler(silent_handler()).build();
        interp.run_source("Set x to 1.").unwrap();
        assert_eq!(interp.eval_expression("x plus 1").unwrap(), Value::Int(2));
        interp.run_source("Set x to 5.").unwrap();
        assert_eq!(interp.eval_expression("x plus 1").unwrap(), Value::Int(6));
    }
}
