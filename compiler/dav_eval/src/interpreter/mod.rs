//! Tree-walking interpreter.
//!
//! One [`Interpreter`] owns all state for a run: the environment, the
//! function table, the call stack and the collected diagnostics. Nothing is
//! process-wide, so independent runs never share state.
//!
//! Block execution returns a [`Flow`] so that break, continue and return
//! travel up the walk as data. `Err` is reserved for failures; soft ones are
//! reported where they happen and only fatal ones reach the caller of
//! [`Interpreter::run`].

mod builder;
mod control;
mod eval;
mod scope_guard;
mod statements;

use std::rc::Rc;
use std::sync::Arc;

use rand::rngs::StdRng;
use rustc_hash::FxHashMap;

use dav_ir::{Block, Program};
use dav_vocab::Vocabulary;

use crate::diagnostics::{CallStack, Diagnostic};
use crate::dispatch::Dispatcher;
use crate::environment::{AssignPolicy, Environment};
use crate::errors::{EvalError, EvalResult};
use crate::expr::{Expr, ExprParser};
use crate::input_handler::InputHandler;
use crate::print_handler::SharedPrintHandler;
use crate::value::Value;

pub use builder::InterpreterBuilder;

/// How a block sequence finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// A registered user function.
#[derive(Debug)]
pub struct UserFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Block>,
}

pub struct Interpreter {
    vocab: Arc<Vocabulary>,
    exprs: ExprParser,
    /// Parsed expressions by source text; bodies re-run the same lines.
    expr_cache: FxHashMap<String, Rc<Expr>>,
    dispatcher: Dispatcher,
    env: Environment,
    functions: FxHashMap<String, Rc<UserFunction>>,
    call_stack: CallStack,
    print: SharedPrintHandler,
    input: InputHandler,
    policy: AssignPolicy,
    rng: StdRng,
    diagnostics: Vec<Diagnostic>,
    /// Source text of the statement or header being executed.
    context: Option<String>,
}

impl Interpreter {
    /// An English interpreter printing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Execute a parsed program.
    ///
    /// Soft failures are collected as diagnostics and do not stop the run.
    /// A fatal failure is recorded and returned.
    #[tracing::instrument(level = "debug", skip_all, fields(blocks = program.blocks.len()))]
    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        for block in &program.blocks {
            let flow = match self.exec_block(block) {
                Ok(flow) => flow,
                Err(err) => {
                    tracing::error!(error = %err, "run aborted");
                    let diagnostic = self.diagnostic(Diagnostic::error(&err.message));
                    self.diagnostics.push(diagnostic);
                    return Err(err);
                }
            };
            match flow {
                Flow::Normal => {}
                Flow::Return(_) => break,
                Flow::Break | Flow::Continue => self.stray_signal(&flow),
            }
        }
        Ok(())
    }

    /// Parse `source` with this interpreter's vocabulary and run it.
    pub fn run_source(&mut self, source: &str) -> Result<(), EvalError> {
        let program = dav_parse::parse(source, &self.vocab);
        self.run(&program)
    }

    /// Evaluate one expression against the current state.
    pub fn eval_expression(&mut self, text: &str) -> EvalResult {
        self.eval_text(text)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Output captured so far; empty unless printing to a buffer.
    pub fn output(&self) -> String {
        self.print.get_output()
    }

    /// Value of a global variable.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.env.global(name)
    }

    /// Names of the global variables, sorted.
    pub fn global_names(&self) -> Vec<&str> {
        self.env.global_names()
    }

    pub fn function(&self, name: &str) -> Option<&UserFunction> {
        self.functions.get(name).map(|f| &**f)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Record a soft failure.
    fn report(&mut self, err: &EvalError) {
        tracing::warn!(statement = self.context.as_deref(), error = %err, "evaluation failed");
        let diagnostic = self.diagnostic(Diagnostic::error(&err.message));
        self.diagnostics.push(diagnostic);
    }

    /// Record a warning.
    fn warn(&mut self, message: String) {
        tracing::warn!(statement = self.context.as_deref(), "{message}");
        let diagnostic = self.diagnostic(Diagnostic::warning(message));
        self.diagnostics.push(diagnostic);
    }

    fn diagnostic(&self, diagnostic: Diagnostic) -> Diagnostic {
        match &self.context {
            Some(statement) => diagnostic.with_statement(statement.clone()),
            None => diagnostic,
        }
    }

    /// Run `f` with `context` as the statement attached to diagnostics.
    fn in_context<T>(&mut self, context: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.context.replace(context.to_string());
        let result = f(self);
        self.context = previous;
        result
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
