//! DAV runner library.
//!
//! Loads a vocabulary, parses a script and runs it to completion. The `dav`
//! binary is a thin shell over [`run`], [`print_tree`] and [`repl::Session`].

pub mod repl;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use dav_eval::{
    buffer_handler, stdout_handler, AssignPolicy, Diagnostic, EvalError, Interpreter,
    DEFAULT_MAX_CALL_DEPTH,
};
use dav_vocab::{Locale, VocabError, Vocabulary};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(io::stderr)
                .with_targets(true)
                .with_bracketed_fields(true);
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tree)
                .init();
        }
    });
}

/// Settings for one run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub locale: Locale,
    /// JSON phrase table used instead of the locale's built-in one.
    pub vocab_path: Option<PathBuf>,
    pub max_call_depth: Option<usize>,
    pub assign_policy: AssignPolicy,
    pub seed: Option<u64>,
    /// Capture output into [`RunReport::output`] instead of printing it.
    pub capture_output: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            locale: Locale::English,
            vocab_path: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            assign_policy: AssignPolicy::default(),
            seed: None,
            capture_output: false,
        }
    }
}

impl RunConfig {
    /// The vocabulary this run parses and executes with.
    pub fn vocabulary(&self) -> Result<Vocabulary, RunError> {
        let Some(path) = &self.vocab_path else {
            return Ok(self.locale.vocabulary());
        };
        let json = read_script(path)?;
        let vocab = Vocabulary::from_json(&json)?;
        tracing::debug!(path = %path.display(), name = %vocab.name, "custom vocabulary loaded");
        Ok(vocab)
    }

    /// An interpreter configured for this run.
    pub fn interpreter(&self) -> Result<Interpreter, RunError> {
        let handler = if self.capture_output {
            buffer_handler()
        } else {
            stdout_handler()
        };
        let mut builder = Interpreter::builder()
            .vocabulary(self.vocabulary()?)
            .print_handler(handler)
            .max_call_depth(self.max_call_depth)
            .assign_policy(self.assign_policy);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder.build())
    }
}

/// What a finished run produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Captured output; empty unless [`RunConfig::capture_output`] is set.
    pub output: String,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Error: File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),
    #[error("Error: cannot read '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Error: {0}")]
    Vocabulary(#[from] VocabError),
    /// The run was stopped by runaway recursion. `report` holds what it
    /// produced up to that point.
    #[error("Error: {source}")]
    RecursionLimit { source: EvalError, report: RunReport },
}

/// Run a script file to completion.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn run(path: impl AsRef<Path>, config: &RunConfig) -> Result<RunReport, RunError> {
    let source = read_script(path.as_ref())?;
    run_text(&source, config)
}

/// Run script text to completion.
pub fn run_text(source: &str, config: &RunConfig) -> Result<RunReport, RunError> {
    let mut interpreter = config.interpreter()?;
    let result = interpreter.run_source(source);
    let report = RunReport {
        diagnostics: interpreter.take_diagnostics(),
        output: interpreter.output(),
    };
    match result {
        Ok(()) => Ok(report),
        Err(source) => Err(RunError::RecursionLimit { source, report }),
    }
}

/// Parse a script and print its block tree back in canonical phrasing.
pub fn print_tree(source: &str, config: &RunConfig) -> Result<String, RunError> {
    let vocab = config.vocabulary()?;
    let program = dav_parse::parse(source, &vocab);
    Ok(dav_parse::render(&program, &vocab))
}

/// Read a script or phrase table, mapping a missing file to
/// [`RunError::FileNotFound`].
pub fn read_script(path: &Path) -> Result<String, RunError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => RunError::FileNotFound(path.to_path_buf()),
        _ => RunError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
