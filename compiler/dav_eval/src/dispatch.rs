//! Leaf statement classification.
//!
//! A [`Dispatcher`] holds the compiled statement templates of one vocabulary
//! and turns a statement line into a [`StatementKind`]. Classification is
//! purely textual; the interpreter evaluates whatever expressions it carries.

use dav_parse::phrase::{split_commas, split_on_word, strip_suffix_ci, TemplateSet};
use dav_vocab::Vocabulary;

/// A classified statement. Slices borrow from the source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatementKind<'t> {
    Declare { type_word: &'t str, name: &'t str },
    Assign { name: &'t str, expr: &'t str },
    Input { name: &'t str },
    Import { name: &'t str },
    Return(Option<&'t str>),
    Break,
    Continue,
    ListAdd { expr: &'t str, name: &'t str },
    ListRemove { expr: &'t str, name: &'t str },
    Display { expr: &'t str, newline: bool },
    Increment { name: &'t str, expr: &'t str },
    Decrement { name: &'t str, expr: &'t str },
    Call { name: &'t str, args: Vec<&'t str> },
    LineBreak,
    /// Anything else, evaluated as a bare expression.
    Expression(&'t str),
}

/// Compiled statement templates for one vocabulary.
pub struct Dispatcher {
    declare: TemplateSet,
    assign: TemplateSet,
    input: TemplateSet,
    import: TemplateSet,
    return_: TemplateSet,
    break_: TemplateSet,
    continue_: TemplateSet,
    list_add: TemplateSet,
    list_remove: TemplateSet,
    display: TemplateSet,
    increment: TemplateSet,
    decrement: TemplateSet,
    call: TemplateSet,
    line_break: TemplateSet,
    screen_suffix: Vec<String>,
    newline_suffix: Vec<String>,
    no_newline_suffix: Vec<String>,
    conjunction: Vec<String>,
}

impl Dispatcher {
    pub fn new(vocab: &Vocabulary) -> Self {
        let s = &vocab.statements;
        Dispatcher {
            declare: TemplateSet::new(&s.declare),
            assign: TemplateSet::new(&s.assign),
            input: TemplateSet::new(&s.input),
            import: TemplateSet::new(&s.import),
            return_: TemplateSet::new(&s.return_),
            break_: TemplateSet::new(&s.break_),
            continue_: TemplateSet::new(&s.continue_),
            list_add: TemplateSet::new(&s.list_add),
            list_remove: TemplateSet::new(&s.list_remove),
            display: TemplateSet::new(&s.display),
            increment: TemplateSet::new(&s.increment),
            decrement: TemplateSet::new(&s.decrement),
            call: TemplateSet::new(&s.call),
            line_break: TemplateSet::new(&s.line_break),
            screen_suffix: s.screen_suffix.clone(),
            newline_suffix: s.newline_suffix.clone(),
            no_newline_suffix: s.no_newline_suffix.clone(),
            conjunction: s.conjunction.clone(),
        }
    }

    /// Classify one statement line.
    pub fn classify<'t>(&self, line: &'t str) -> StatementKind<'t> {
        let line = line.trim();
        let line = line.strip_suffix('.').unwrap_or(line).trim_end();

        if let Some(caps) = self.declare.matches(line) {
            return StatementKind::Declare {
                type_word: caps.text("type"),
                name: caps.text("name"),
            };
        }
        if let Some(caps) = self.assign.matches(line) {
            return StatementKind::Assign {
                name: caps.text("name"),
                expr: caps.text("expr"),
            };
        }
        if let Some(caps) = self.input.matches(line) {
            return StatementKind::Input {
                name: caps.text("name"),
            };
        }
        if let Some(caps) = self.import.matches(line) {
            return StatementKind::Import {
                name: caps.text("name"),
            };
        }
        if let Some(caps) = self.return_.matches(line) {
            return StatementKind::Return(caps.get("expr"));
        }
        if self.break_.matches(line).is_some() {
            return StatementKind::Break;
        }
        if self.continue_.matches(line).is_some() {
            return StatementKind::Continue;
        }
        if let Some(caps) = self.list_add.matches(line) {
            return StatementKind::ListAdd {
                expr: caps.text("expr"),
                name: caps.text("name"),
            };
        }
        if let Some(caps) = self.list_remove.matches(line) {
            return StatementKind::ListRemove {
                expr: caps.text("expr"),
                name: caps.text("name"),
            };
        }
        if let Some(caps) = self.display.matches(line) {
            let (expr, newline) = self.display_suffixes(caps.text("expr"));
            return StatementKind::Display { expr, newline };
        }
        if let Some(caps) = self.increment.matches(line) {
            return StatementKind::Increment {
                name: caps.text("name"),
                expr: caps.text("expr"),
            };
        }
        if let Some(caps) = self.decrement.matches(line) {
            return StatementKind::Decrement {
                name: caps.text("name"),
                expr: caps.text("expr"),
            };
        }
        if let Some(caps) = self.call.matches(line) {
            return StatementKind::Call {
                name: caps.text("name"),
                args: self.call_args(caps.text("args")),
            };
        }
        if self.line_break.matches(line).is_some() {
            return StatementKind::LineBreak;
        }
        StatementKind::Expression(line)
    }

    /// Strip the screen phrase and the newline control word from a display
    /// expression. Either order is accepted.
    fn display_suffixes<'t>(&self, expr: &'t str) -> (&'t str, bool) {
        let mut expr = strip_any(expr, &self.screen_suffix);
        let mut newline = false;
        if let Some(head) = find_suffix(expr, &self.newline_suffix) {
            expr = head;
            newline = true;
        } else if let Some(head) = find_suffix(expr, &self.no_newline_suffix) {
            expr = head;
        }
        (strip_any(expr, &self.screen_suffix), newline)
    }

    /// Arguments of an explicit call: split on the conjunction, then commas.
    fn call_args<'t>(&self, args: &'t str) -> Vec<&'t str> {
        let mut pieces = vec![args];
        for word in &self.conjunction {
            pieces = pieces
                .into_iter()
                .flat_map(|piece| split_on_word(piece, word))
                .collect();
        }
        pieces.into_iter().flat_map(split_commas).collect()
    }
}

fn find_suffix<'t>(text: &'t str, phrases: &[String]) -> Option<&'t str> {
    phrases.iter().find_map(|p| strip_suffix_ci(text, p))
}

fn strip_any<'t>(text: &'t str, phrases: &[String]) -> &'t str {
    find_suffix(text, phrases).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn english(line: &str) -> StatementKind<'_> {
        Dispatcher::new(&Vocabulary::english()).classify(line)
    }

    fn french(line: &str) -> StatementKind<'_> {
        Dispatcher::new(&Vocabulary::french()).classify(line)
    }

    #[test]
    fn declarations_and_assignments() {
        assert_eq!(
            english("I have a number called x."),
            StatementKind::Declare {
                type_word: "number",
                name: "x"
            }
        );
        assert_eq!(
            english("Set x to 10."),
            StatementKind::Assign {
                name: "x",
                expr: "10"
            }
        );
        assert_eq!(
            english("put n times 2 in result"),
            StatementKind::Assign {
                name: "result",
                expr: "n times 2"
            }
        );
        assert_eq!(
            french("J'ai un nombre appelé x."),
            StatementKind::Declare {
                type_word: "nombre",
                name: "x"
            }
        );
        assert_eq!(
            french("Mets x à 10."),
            StatementKind::Assign {
                name: "x",
                expr: "10"
            }
        );
    }

    #[test]
    fn display_suffixes_select_newline() {
        assert_eq!(
            english("Show x on screen."),
            StatementKind::Display {
                expr: "x",
                newline: false
            }
        );
        assert_eq!(
            english("Show the result of double(5) on the screen line"),
            StatementKind::Display {
                expr: "double(5)",
                newline: true
            }
        );
        assert_eq!(
            english("display x continue"),
            StatementKind::Display {
                expr: "x",
                newline: false
            }
        );
        assert_eq!(
            french("Affiche x à l'écran ligne."),
            StatementKind::Display {
                expr: "x",
                newline: true
            }
        );
    }

    #[test]
    fn control_statements() {
        assert_eq!(english("I will return n times 2."), StatementKind::Return(Some("n times 2")));
        assert_eq!(english("return"), StatementKind::Return(None));
        assert_eq!(english("Break."), StatementKind::Break);
        assert_eq!(english("continue"), StatementKind::Continue);
        assert_eq!(french("Arrête."), StatementKind::Break);
        assert_eq!(french("Je retourne n."), StatementKind::Return(Some("n")));
    }

    #[test]
    fn list_and_counter_statements() {
        assert_eq!(
            english("Add 1 to items."),
            StatementKind::ListAdd {
                expr: "1",
                name: "items"
            }
        );
        assert_eq!(
            french("Retire 2 de liste"),
            StatementKind::ListRemove {
                expr: "2",
                name: "liste"
            }
        );
        assert_eq!(
            english("Increase total by n."),
            StatementKind::Increment {
                name: "total",
                expr: "n"
            }
        );
        assert_eq!(
            french("Diminue compte de 1"),
            StatementKind::Decrement {
                name: "compte",
                expr: "1"
            }
        );
    }

    #[test]
    fn call_arguments_split_on_conjunction_and_commas() {
        assert_eq!(
            english("Call greet with \"Ann and Bob\" and max(1, 2), 3"),
            StatementKind::Call {
                name: "greet",
                args: vec!["\"Ann and Bob\"", "max(1, 2)", "3"]
            }
        );
        assert_eq!(
            french("Appelle salut"),
            StatementKind::Call {
                name: "salut",
                args: vec![]
            }
        );
    }

    #[test]
    fn input_import_and_line_break() {
        assert_eq!(
            english("Ask the user for a value for n."),
            StatementKind::Input { name: "n" }
        );
        assert_eq!(
            french("Demande à l'utilisateur pour age"),
            StatementKind::Input { name: "age" }
        );
        assert_eq!(
            english("Import the math module."),
            StatementKind::Import { name: "math" }
        );
        assert_eq!(english("New line."), StatementKind::LineBreak);
        assert_eq!(french("ligne"), StatementKind::LineBreak);
    }

    #[test]
    fn unknown_lines_fall_back_to_expressions() {
        assert_eq!(english("double(4)."), StatementKind::Expression("double(4)"));
        assert_eq!(
            english("Format the disk"),
            StatementKind::Expression("Format the disk")
        );
    }
}
