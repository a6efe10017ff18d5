//! Line-at-a-time interactive session.
//!
//! Each submitted line runs against the same interpreter, so variables and
//! functions persist. A line ending in `:` opens a block; following lines are
//! collected until an empty line submits the whole block.

use dav_eval::{Diagnostic, EvalError, Interpreter};
use dav_vocab::Locale;

use crate::{RunConfig, RunError};

pub const PROMPT: &str = "dav> ";
pub const CONTINUATION_PROMPT: &str = "...  ";

/// Fixed messages of the session, per locale.
#[derive(Debug)]
pub struct ReplText {
    pub banner: &'static str,
    pub hint: &'static str,
    pub goodbye: &'static str,
    pub help: &'static str,
    exit_words: &'static [&'static str],
    help_words: &'static [&'static str],
    vars_words: &'static [&'static str],
}

static ENGLISH: ReplText = ReplText {
    banner: "DAV English Language Interpreter",
    hint: "Type 'exit' to quit, 'help' for examples, 'vars' to list variables",
    goodbye: "Goodbye!",
    help: "\
Examples:
  I have a number called x.
  Set x to 10.
  Show x on screen line.

  Create a function named double that takes a number:
      I will return number times 2.

  Show the result of double(5) on screen.

End a block with an empty line.",
    exit_words: &["exit", "quit"],
    help_words: &["help"],
    vars_words: &["vars"],
};

static FRENCH: ReplText = ReplText {
    banner: "Interpréteur du langage DAV en français",
    hint: "Tapez 'sortie' pour quitter, 'aide' pour des exemples, 'variables' pour les lister",
    goodbye: "Au revoir!",
    help: "\
Exemples :
  J'ai un nombre appelé x.
  Mets x à 10.
  Affiche x à l'écran ligne.

  Crée une fonction nommée double qui prend n:
      Je retourne n fois 2.

  Affiche double(5).

Terminez un bloc par une ligne vide.",
    exit_words: &["sortie", "exit", "quit"],
    help_words: &["aide", "help"],
    vars_words: &["variables", "vars"],
};

impl ReplText {
    pub fn for_locale(locale: Locale) -> &'static ReplText {
        match locale {
            Locale::English => &ENGLISH,
            Locale::French => &FRENCH,
        }
    }

    fn is_exit(&self, line: &str) -> bool {
        self.exit_words.iter().any(|w| w.eq_ignore_ascii_case(line))
    }

    fn is_help(&self, line: &str) -> bool {
        self.help_words.iter().any(|w| w.eq_ignore_ascii_case(line))
    }

    fn is_vars(&self, line: &str) -> bool {
        self.vars_words.iter().any(|w| w.eq_ignore_ascii_case(line))
    }
}

/// Outcome of submitting one line.
#[derive(Debug)]
pub enum Reply {
    /// The user asked to leave.
    Exit,
    Help,
    /// Global variables as `name = value` lines, sorted by name.
    Globals(Vec<String>),
    /// A block is open; keep reading.
    NeedMore,
    /// Code ran; these diagnostics were raised by it.
    Ran(Vec<Diagnostic>),
    /// Code was stopped by a fatal error. The session stays usable.
    Failed(EvalError, Vec<Diagnostic>),
    Empty,
}

pub struct Session {
    interpreter: Interpreter,
    text: &'static ReplText,
    pending: Vec<String>,
}

impl Session {
    pub fn new(config: &RunConfig) -> Result<Self, RunError> {
        Ok(Session {
            interpreter: config.interpreter()?,
            text: ReplText::for_locale(config.locale),
            pending: Vec::new(),
        })
    }

    pub fn text(&self) -> &'static ReplText {
        self.text
    }

    pub fn prompt(&self) -> &'static str {
        if self.pending.is_empty() {
            PROMPT
        } else {
            CONTINUATION_PROMPT
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn submit(&mut self, line: &str) -> Reply {
        let trimmed = line.trim();
        if !self.pending.is_empty() {
            if trimmed.is_empty() {
                let block = std::mem::take(&mut self.pending).join("\n");
                return self.execute(&block);
            }
            self.pending.push(line.trim_end().to_string());
            return Reply::NeedMore;
        }
        if trimmed.is_empty() {
            return Reply::Empty;
        }
        if self.text.is_exit(trimmed) {
            return Reply::Exit;
        }
        if self.text.is_help(trimmed) {
            return Reply::Help;
        }
        if self.text.is_vars(trimmed) {
            return Reply::Globals(self.globals());
        }
        if trimmed.ends_with(':') {
            self.pending.push(trimmed.to_string());
            return Reply::NeedMore;
        }
        self.execute(trimmed)
    }

    /// Run whatever block is still open, as at end of input.
    pub fn finish(&mut self) -> Option<Reply> {
        if self.pending.is_empty() {
            return None;
        }
        let block = std::mem::take(&mut self.pending).join("\n");
        Some(self.execute(&block))
    }

    fn globals(&self) -> Vec<String> {
        self.interpreter
            .global_names()
            .into_iter()
            .filter_map(|name| {
                let value = self.interpreter.global(name)?;
                Some(format!("{name} = {value}"))
            })
            .collect()
    }

    fn execute(&mut self, source: &str) -> Reply {
        let result = self.interpreter.run_source(source);
        let diagnostics = self.interpreter.take_diagnostics();
        match result {
            Ok(()) => Reply::Ran(diagnostics),
            Err(err) => Reply::Failed(err, diagnostics),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use dav_eval::Value;
    use pretty_assertions::assert_eq;

    fn session(locale: Locale) -> Session {
        let config = RunConfig {
            locale,
            capture_output: true,
            ..RunConfig::default()
        };
        Session::new(&config).unwrap()
    }

    #[test]
    fn state_persists_between_lines() {
        let mut s = session(Locale::English);
        assert!(matches!(s.submit("Set x to 4."), Reply::Ran(d) if d.is_empty()));
        assert!(matches!(s.submit("Show x times 2."), Reply::Ran(_)));
        assert_eq!(s.interpreter().output(), "8");
    }

    #[test]
    fn blocks_run_after_an_empty_line() {
        let mut s = session(Locale::English);
        assert!(matches!(s.submit("Repeat 2 times:"), Reply::NeedMore));
        assert_eq!(s.prompt(), CONTINUATION_PROMPT);
        assert!(matches!(s.submit("    Increase n by 1."), Reply::NeedMore));
        assert!(matches!(s.submit(""), Reply::Ran(_)));
        assert_eq!(s.prompt(), PROMPT);
        assert_eq!(s.interpreter().global("n"), Some(Value::Int(2)));
    }

    #[test]
    fn commands_follow_the_locale() {
        let mut en = session(Locale::English);
        assert!(matches!(en.submit("help"), Reply::Help));
        assert!(matches!(en.submit("QUIT"), Reply::Exit));

        let mut fr = session(Locale::French);
        assert!(matches!(fr.submit("aide"), Reply::Help));
        assert!(matches!(fr.submit("sortie"), Reply::Exit));
        assert_eq!(fr.text().goodbye, "Au revoir!");
    }

    #[test]
    fn vars_lists_globals() {
        let mut s = session(Locale::English);
        s.submit("Set x to 4.");
        s.submit("Set greeting to \"hi\".");
        let Reply::Globals(lines) = s.submit("vars") else {
            panic!("expected the global listing");
        };
        assert_eq!(lines, vec!["greeting = hi", "x = 4"]);

        let mut fr = session(Locale::French);
        assert!(matches!(fr.submit("variables"), Reply::Globals(lines) if lines.is_empty()));
    }

    #[test]
    fn fatal_errors_keep_the_session() {
        let config = RunConfig {
            capture_output: true,
            max_call_depth: Some(10),
            ..RunConfig::default()
        };
        let mut s = Session::new(&config).unwrap();
        s.submit("Create a function named loop_forever that takes n:");
        s.submit("    Return loop_forever(n).");
        assert!(matches!(s.submit(""), Reply::Ran(_)));
        assert!(matches!(s.submit("Show loop_forever(1)."), Reply::Failed(..)));
        assert!(matches!(s.submit("Show 1."), Reply::Ran(_)));
        assert_eq!(s.interpreter().output(), "1");
    }

    #[test]
    fn finish_flushes_an_open_block() {
        let mut s = session(Locale::English);
        assert!(s.finish().is_none());
        s.submit("If true:");
        s.submit("    Show \"yes\".");
        assert!(matches!(s.finish(), Some(Reply::Ran(_))));
        assert_eq!(s.interpreter().output(), "yes");
    }
}
