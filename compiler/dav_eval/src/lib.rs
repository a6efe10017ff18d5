//! DAV Eval - tree-walking interpreter for DAV programs.
//!
//! # Architecture
//!
//! - `expr`: operator-phrase canonicalization, a `logos` tokenizer and a
//!   precedence-climbing parser producing [`Expr`]
//! - `operators`: direct enum dispatch for binary and unary operators
//! - `builtins`, `modules`: the builtin function table and importable modules
//! - `dispatch`: classification of leaf statements against the vocabulary
//! - `interpreter`: the block walk, the environment and function calls
//!
//! Failures are [`EvalError`]s. All but the recursion limit are soft: the
//! interpreter records a [`Diagnostic`] and keeps running.

mod builtins;
mod diagnostics;
mod dispatch;
mod environment;
pub mod errors;
pub mod expr;
mod input_handler;
pub mod interpreter;
mod modules;
mod operators;
mod print_handler;
mod value;

pub use builtins::Builtin;
pub use diagnostics::{CallFrame, CallStack, Diagnostic, Severity, DEFAULT_MAX_CALL_DEPTH};
pub use dispatch::{Dispatcher, StatementKind};
pub use environment::{AssignPolicy, Environment};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use expr::{BinaryOp, Expr, ExprParser, UnaryOp};
pub use input_handler::{coerce_input, InputHandler};
pub use interpreter::{Flow, Interpreter, InterpreterBuilder, UserFunction};
pub use modules::Module;
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use value::{Shared, Value};
