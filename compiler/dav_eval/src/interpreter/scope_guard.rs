//! RAII guard for user-function calls.
//!
//! Entering a call pushes a call-stack frame and a fresh local scope. The
//! [`ScopedInterpreter`] guard pops both when dropped, so a fatal error
//! unwinding through `?` leaves the interpreter balanced.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::errors::EvalError;

/// Access the interpreter through this guard; it implements `Deref` and
/// `DerefMut`.
pub(super) struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_frame();
        self.interpreter.call_stack.pop();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter a call to `name`.
    ///
    /// Fails with the fatal recursion-limit error when the call stack is
    /// full; nothing is pushed in that case.
    pub(super) fn enter_call(&mut self, name: &str) -> Result<ScopedInterpreter<'_>, EvalError> {
        self.call_stack.push(CallFrame {
            name: name.to_string(),
        })?;
        self.env.push_frame();
        Ok(ScopedInterpreter { interpreter: self })
    }
}
