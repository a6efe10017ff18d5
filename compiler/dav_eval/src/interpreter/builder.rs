//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use dav_vocab::Vocabulary;

use super::Interpreter;
use crate::diagnostics::{CallStack, DEFAULT_MAX_CALL_DEPTH};
use crate::dispatch::Dispatcher;
use crate::environment::{AssignPolicy, Environment};
use crate::expr::ExprParser;
use crate::input_handler::InputHandler;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// Defaults: English vocabulary, stdout output, stdin input, a call depth
/// of 1000, [`AssignPolicy::GlobalFallback`] and an entropy-seeded RNG.
pub struct InterpreterBuilder {
    vocab: Option<Arc<Vocabulary>>,
    print_handler: Option<SharedPrintHandler>,
    input: InputHandler,
    max_call_depth: Option<usize>,
    policy: AssignPolicy,
    seed: Option<u64>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            vocab: None,
            print_handler: None,
            input: InputHandler::Stdin,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            policy: AssignPolicy::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn vocabulary(mut self, vocab: impl Into<Arc<Vocabulary>>) -> Self {
        self.vocab = Some(vocab.into());
        self
    }

    /// Set the print handler (stdout, buffer, or silent).
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn input(mut self, input: InputHandler) -> Self {
        self.input = input;
        self
    }

    /// Answer input statements from `lines` instead of stdin.
    #[must_use]
    pub fn input_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input(InputHandler::scripted(lines))
    }

    /// Maximum nesting of user-function calls; `None` for unlimited.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn assign_policy(mut self, policy: AssignPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Seed the random builtins for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Interpreter {
        let vocab = self
            .vocab
            .unwrap_or_else(|| Arc::new(Vocabulary::english()));
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Interpreter {
            exprs: ExprParser::new(&vocab),
            expr_cache: FxHashMap::default(),
            dispatcher: Dispatcher::new(&vocab),
            vocab,
            env: Environment::new(),
            functions: FxHashMap::default(),
            call_stack: CallStack::new(self.max_call_depth),
            print: self.print_handler.unwrap_or_else(stdout_handler),
            input: self.input,
            policy: self.policy,
            rng,
            diagnostics: Vec::new(),
            context: None,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
