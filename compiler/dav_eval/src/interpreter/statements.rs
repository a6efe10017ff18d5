//! Leaf statement handlers.

use crate::dispatch::StatementKind;
use crate::errors::{input_unavailable, not_a_list, undefined_variable, EvalError};
use crate::expr::BinaryOp;
use crate::input_handler::coerce_input;
use crate::modules::Module;
use crate::operators::evaluate_binary;
use crate::value::{Shared, Value};

use super::{Flow, Interpreter};

impl Interpreter {
    /// Classify and run one statement line.
    ///
    /// A soft failure is reported and the statement counts as done.
    pub(super) fn exec_statement(&mut self, line: &str) -> Result<Flow, EvalError> {
        self.in_context(line, |this| match this.dispatch(line) {
            Err(err) if !err.is_fatal() => {
                this.report(&err);
                Ok(Flow::Normal)
            }
            result => result,
        })
    }

    fn dispatch(&mut self, line: &str) -> Result<Flow, EvalError> {
        let kind = self.dispatcher.classify(line);
        tracing::trace!(?kind, "statement");
        match kind {
            StatementKind::Declare { type_word, name } => {
                let declared = self.vocab.type_kind(type_word);
                if declared.is_none() {
                    tracing::debug!(type_word, name, "unknown type, declaring as None");
                }
                self.env.declare(name, Value::default_for(declared));
            }
            StatementKind::Assign { name, expr } => {
                let value = self.eval_or_none(expr)?;
                self.env.assign(name, value, self.policy);
            }
            StatementKind::Input { name } => {
                self.print.print(&self.vocab.input_prompt(name));
                let line = self.input.read_line().ok_or_else(|| input_unavailable(name))?;
                let value = coerce_input(&line, &self.vocab);
                self.env.assign(name, value, self.policy);
            }
            StatementKind::Import { name } => self.import(name),
            StatementKind::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_or_none(expr)?,
                    None => Value::None,
                };
                return Ok(Flow::Return(value));
            }
            StatementKind::Break => return Ok(Flow::Break),
            StatementKind::Continue => return Ok(Flow::Continue),
            StatementKind::ListAdd { expr, name } => {
                let value = self.eval_or_none(expr)?;
                self.list(name)?.borrow_mut().push(value);
            }
            StatementKind::ListRemove { expr, name } => {
                let value = self.eval_or_none(expr)?;
                let list = self.list(name)?;
                // Elements may hold the list itself; compare under a shared borrow.
                let found = list.borrow().iter().position(|item| *item == value);
                if let Some(at) = found {
                    list.borrow_mut().remove(at);
                }
            }
            StatementKind::Display { expr, newline } => {
                let text = self.eval_or_none(expr)?.to_string();
                if newline {
                    self.print.println(&text);
                } else {
                    self.print.print(&text);
                }
            }
            StatementKind::Increment { name, expr } => self.step(name, expr, BinaryOp::Add)?,
            StatementKind::Decrement { name, expr } => self.step(name, expr, BinaryOp::Sub)?,
            StatementKind::Call { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_or_none(arg)?);
                }
                self.call_named(name, values)?;
            }
            StatementKind::LineBreak => self.print.println(""),
            StatementKind::Expression(text) => match self.eval_text(text) {
                Err(err) if !err.is_fatal() => {
                    tracing::debug!(statement = text, error = %err, "unrecognized statement skipped");
                }
                result => {
                    result?;
                }
            },
        }
        Ok(Flow::Normal)
    }

    /// Bind a module by any of its surface names.
    ///
    /// The module is reachable both under the imported name and its
    /// canonical id, so `import maths` still allows `math.sqrt(2)`.
    fn import(&mut self, name: &str) {
        match self.vocab.module_id(name).and_then(Module::from_id) {
            Some(module) => {
                tracing::debug!(name, module = module.id(), "module imported");
                self.env.import(name, module);
                self.env.import(module.id(), module);
            }
            None => {
                let message = self.vocab.import_failed(name);
                self.warn(message);
            }
        }
    }

    /// The list bound to `name`.
    fn list(&self, name: &str) -> Result<Shared<Vec<Value>>, EvalError> {
        match self.env.lookup(name) {
            Some(Value::List(items)) => Ok(items),
            Some(_) => Err(not_a_list(name)),
            None => Err(undefined_variable(name)),
        }
    }

    /// Increment or decrement; an unset or `None` variable starts at 0.
    fn step(&mut self, name: &str, expr: &str, op: BinaryOp) -> Result<(), EvalError> {
        let current = match self.env.lookup(name) {
            None | Some(Value::None) => Value::Int(0),
            Some(value) => value,
        };
        let amount = self.eval_or_none(expr)?;
        let updated = evaluate_binary(&current, &amount, op)?;
        self.env.store(name, updated);
        Ok(())
    }
}
