//! Input source for `ask the user` statements.

use std::collections::VecDeque;
use std::io::BufRead;

use dav_vocab::Vocabulary;

use crate::value::Value;

/// Where input lines come from.
#[derive(Debug, Default)]
pub enum InputHandler {
    /// Read from stdin, blocking until a line arrives.
    #[default]
    Stdin,
    /// Pre-supplied lines, consumed in order.
    Scripted(VecDeque<String>),
}

impl InputHandler {
    pub fn scripted<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputHandler::Scripted(lines.into_iter().map(Into::into).collect())
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        match self {
            InputHandler::Stdin => {
                let mut line = String::new();
                match std::io::stdin().lock().read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
                }
            }
            InputHandler::Scripted(lines) => lines.pop_front(),
        }
    }
}

/// Convert a typed line to a value: a number, else a boolean word, else text.
///
/// A decimal comma is accepted (`3,5` reads as `3.5`).
pub fn coerce_input(line: &str, vocab: &Vocabulary) -> Value {
    let trimmed = line.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Int(n);
    }
    let decimal = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replacen(',', ".", 1)
    };
    if let Ok(x) = decimal.parse::<f64>() {
        if x.is_finite() {
            return Value::Float(x);
        }
    }
    if let Some(b) = vocab.boolean_word(trimmed) {
        return Value::Bool(b);
    }
    Value::text(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scripted_lines_run_out() {
        let mut input = InputHandler::scripted(["1", "two"]);
        assert_eq!(input.read_line().as_deref(), Some("1"));
        assert_eq!(input.read_line().as_deref(), Some("two"));
        assert_eq!(input.read_line(), None);
    }

    #[test]
    fn coercion_prefers_numbers() {
        let vocab = Vocabulary::english();
        assert_eq!(coerce_input(" 42 ", &vocab), Value::Int(42));
        assert_eq!(coerce_input("2.5", &vocab), Value::Float(2.5));
        assert_eq!(coerce_input("3,5", &vocab), Value::Float(3.5));
        assert_eq!(coerce_input("True", &vocab), Value::Bool(true));
        assert_eq!(coerce_input("hello", &vocab), Value::text("hello"));
        assert_eq!(coerce_input("inf", &vocab), Value::text("inf"));
    }

    #[test]
    fn french_boolean_words() {
        let vocab = Vocabulary::french();
        assert_eq!(coerce_input("vrai", &vocab), Value::Bool(true));
        assert_eq!(coerce_input("faux", &vocab), Value::Bool(false));
    }
}
