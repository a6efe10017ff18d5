//! File-based tests for the runner entry points.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::io::Write;
use std::path::Path;

use dav_eval::EvalErrorKind;
use dav_vocab::{Locale, Vocabulary};
use davc::{print_tree, run, run_text, RunConfig, RunError};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn captured(locale: Locale) -> RunConfig {
    RunConfig {
        locale,
        capture_output: true,
        seed: Some(1),
        ..RunConfig::default()
    }
}

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

#[test]
fn runs_a_file() {
    let file = script("I have a number called x.\nSet x to 10.\nShow x.");
    let report = run(file.path(), &captured(Locale::English)).unwrap();
    assert_eq!(report.output, "10");
    assert!(report.diagnostics.is_empty());
}

#[test]
fn runs_a_french_file() {
    let file = script("J'ai une liste appelée l.\nAjoute 1 à l.\nAjoute 2 à l.\nAffiche somme(l).");
    let report = run(file.path(), &captured(Locale::French)).unwrap();
    assert_eq!(report.output, "3");
}

#[test]
fn missing_file_message() {
    let err = run(Path::new("no/such/script.dav"), &captured(Locale::English)).unwrap_err();
    assert!(matches!(err, RunError::FileNotFound(_)));
    assert_eq!(err.to_string(), "Error: File 'no/such/script.dav' not found.");
}

#[test]
fn soft_errors_are_reported_not_raised() {
    let report = run_text("Show undefined_thing.\nShow 2.", &captured(Locale::English)).unwrap();
    assert_eq!(report.output, "None2");
    assert!(report.has_errors());
}

#[test]
fn recursion_limit_keeps_partial_report() {
    let config = RunConfig {
        max_call_depth: Some(20),
        ..captured(Locale::English)
    };
    let source = "\
Show \"start\".
Create a function named down that takes n.
    Return down(n minus 1).
Show down(1).";
    let err = run_text(source, &config).unwrap_err();
    let RunError::RecursionLimit { source, report } = err else {
        panic!("expected a recursion limit error");
    };
    assert_eq!(source.kind, EvalErrorKind::RecursionLimit { depth: 20 });
    assert_eq!(report.output, "start");
    assert!(report.has_errors());
}

#[test]
fn custom_vocabulary_from_json() {
    let mut vocab = Vocabulary::english();
    vocab.name = "terse".to_string();
    vocab.statements.display = vec!["say {expr}".to_string()];
    let table = script(&vocab.to_json().unwrap());

    let config = RunConfig {
        vocab_path: Some(table.path().to_path_buf()),
        ..captured(Locale::English)
    };
    let report = run_text("Say 6 times 7.", &config).unwrap();
    assert_eq!(report.output, "42");
}

#[test]
fn broken_vocabulary_is_an_error() {
    let table = script("{ not json");
    let config = RunConfig {
        vocab_path: Some(table.path().to_path_buf()),
        ..captured(Locale::English)
    };
    assert!(matches!(
        run_text("Show 1.", &config),
        Err(RunError::Vocabulary(_))
    ));
}

#[test]
fn print_tree_reparses_to_the_same_output() {
    let source = "\
Create a function named double that takes n.
    Return n times 2.
Show double(4).";
    let config = captured(Locale::English);
    let printed = print_tree(source, &config).unwrap();
    assert_eq!(print_tree(&printed, &config).unwrap(), printed);
    assert_eq!(run_text(&printed, &config).unwrap().output, "8");
}
