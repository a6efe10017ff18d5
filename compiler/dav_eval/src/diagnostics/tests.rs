#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;

fn frame(name: &str) -> CallFrame {
    CallFrame {
        name: name.to_string(),
    }
}

#[test]
fn push_and_pop_track_depth() {
    let mut stack = CallStack::new(None);
    stack.push(frame("fact")).unwrap();
    stack.push(frame("helper")).unwrap();
    assert_eq!(stack.frames.len(), 2);
    stack.pop();
    assert_eq!(stack.frames, vec![frame("fact")]);
}

#[test]
fn push_past_limit_fails_without_pushing() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame("a")).unwrap();
    stack.push(frame("b")).unwrap();
    let err = stack.push(frame("c")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 2 });
    assert!(err.is_fatal());
    assert_eq!(stack.frames.len(), 2);
}

#[test]
fn default_limit_is_one_thousand() {
    let mut stack = CallStack::default();
    for _ in 0..DEFAULT_MAX_CALL_DEPTH {
        stack.push(frame("f")).unwrap();
    }
    assert!(stack.push(frame("f")).is_err());
    for _ in 0..DEFAULT_MAX_CALL_DEPTH {
        stack.pop();
    }
    assert!(stack.push(frame("f")).is_ok());
}

#[test]
fn diagnostic_display_names_the_statement() {
    let diag = Diagnostic::error("division by zero").with_statement("set x to 1 / 0");
    assert_eq!(
        diag.to_string(),
        "error: division by zero (in `set x to 1 / 0`)"
    );
    assert!(diag.is_error());
    assert_eq!(
        Diagnostic::warning("Unable to import module turtle").to_string(),
        "warning: Unable to import module turtle"
    );
}
