//! Block execution: sequencing, conditionals, loops and function definitions.

use std::rc::Rc;

use dav_ir::Block;

use super::{Flow, Interpreter, UserFunction};
use crate::errors::{type_mismatch, EvalError};
use crate::value::Value;

/// What a loop does after one pass over its body.
enum LoopStep {
    Next,
    Exit(Flow),
}

impl LoopStep {
    fn after(flow: Flow) -> Self {
        match flow {
            Flow::Normal | Flow::Continue => LoopStep::Next,
            Flow::Break => LoopStep::Exit(Flow::Normal),
            Flow::Return(value) => LoopStep::Exit(Flow::Return(value)),
        }
    }
}

impl Interpreter {
    /// Run blocks in order, stopping at the first control signal.
    pub(super) fn exec_blocks(&mut self, blocks: &[Block]) -> Result<Flow, EvalError> {
        for block in blocks {
            let flow = self.exec_block(block)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    pub(super) fn exec_block(&mut self, block: &Block) -> Result<Flow, EvalError> {
        match block {
            Block::Statement(text) => self.exec_statement(text),
            Block::FunctionDef { name, params, body } => {
                self.define_function(name, params, body);
                Ok(Flow::Normal)
            }
            Block::If {
                condition,
                then_body,
                else_body,
            } => {
                if self.condition(condition)? {
                    self.exec_blocks(then_body)
                } else {
                    self.exec_blocks(else_body)
                }
            }
            Block::CountLoop { count, body } => self.exec_count_loop(count, body),
            Block::WhileLoop { condition, body } => {
                while self.condition(condition)? {
                    if let LoopStep::Exit(flow) = LoopStep::after(self.exec_blocks(body)?) {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            }
            Block::ForEach { var, source, body } => self.exec_for_each(var, source, body),
            Block::DoWhileLoop { body, condition } => loop {
                if let LoopStep::Exit(flow) = LoopStep::after(self.exec_blocks(body)?) {
                    return Ok(flow);
                }
                if !self.condition(condition)? {
                    return Ok(Flow::Normal);
                }
            },
        }
    }

    /// Register a function, replacing any earlier definition of the name.
    fn define_function(&mut self, name: &str, params: &[String], body: &[Block]) {
        tracing::debug!(name, ?params, "function defined");
        let function = UserFunction {
            name: name.to_string(),
            params: params.to_vec(),
            body: body.to_vec(),
        };
        self.functions.insert(name.to_string(), Rc::new(function));
    }

    /// Evaluate a condition. A failed or empty condition is false.
    fn condition(&mut self, text: &str) -> Result<bool, EvalError> {
        let value = self.in_context(text, |this| this.eval_or_none(text))?;
        Ok(value.is_truthy(&self.vocab))
    }

    fn exec_count_loop(&mut self, count: &str, body: &[Block]) -> Result<Flow, EvalError> {
        let value = self.in_context(count, |this| this.eval_or_none(count))?;
        let times = match value {
            Value::Int(n) => n,
            Value::Float(x) => x.trunc() as i64,
            Value::None => 0,
            other => {
                let err = type_mismatch("number", &other);
                self.in_context(count, |this| this.report(&err));
                0
            }
        };
        tracing::trace!(times, "count loop");
        for _ in 0..times.max(0) {
            if let LoopStep::Exit(flow) = LoopStep::after(self.exec_blocks(body)?) {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Iterate a snapshot of a list, or the characters of a text.
    fn exec_for_each(&mut self, var: &str, source: &str, body: &[Block]) -> Result<Flow, EvalError> {
        let items: Vec<Value> = match self.in_context(source, |this| this.eval_or_none(source))? {
            Value::List(items) => items.borrow().clone(),
            Value::Text(text) => text.chars().map(|c| Value::text(c.to_string())).collect(),
            other => {
                tracing::debug!(source, type_name = other.type_name(), "nothing to iterate");
                Vec::new()
            }
        };
        for item in items {
            self.env.declare(var, item);
            if let LoopStep::Exit(flow) = LoopStep::after(self.exec_blocks(body)?) {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Break or continue that reached a function body or the top level.
    pub(super) fn stray_signal(&mut self, flow: &Flow) {
        let signal = match flow {
            Flow::Break => "break",
            Flow::Continue => "continue",
            Flow::Normal | Flow::Return(_) => return,
        };
        self.warn(format!("`{signal}` outside of a loop was ignored"));
    }
}
