//! Expression front end: phrase canonicalization, lexing and parsing.
//!
//! ```text
//! "n times fact(n minus 1)."
//!   -> canonicalize -> "n * fact(n - 1)"
//!   -> tokenize     -> [Ident(n), Star, Ident(fact), LParen, ...]
//!   -> parse        -> Binary { Mul, Ident(n), Call { fact, [Binary { Sub, .. }] } }
//! ```

mod ast;
mod canon;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};

use dav_vocab::Vocabulary;

use crate::errors::EvalError;
use canon::Canonicalizer;

/// Parses expression text for one vocabulary.
pub struct ExprParser {
    canon: Canonicalizer,
}

impl ExprParser {
    pub fn new(vocab: &Vocabulary) -> Self {
        ExprParser {
            canon: Canonicalizer::new(vocab),
        }
    }

    /// Parse `text`; `Ok(None)` for an empty expression.
    pub fn parse(&self, text: &str) -> Result<Option<Expr>, EvalError> {
        let text = text.trim();
        let text = text.strip_suffix('.').unwrap_or(text).trim_end();
        if text.is_empty() {
            return Ok(None);
        }
        let canonical = self.canon.canonicalize(text);
        let tokens = lexer::tokenize(&canonical)?;
        parser::Parser::new(tokens).parse().map(Some)
    }

    /// The canonical operator form of `text`, for tracing.
    pub fn canonical_form(&self, text: &str) -> String {
        self.canon.canonicalize(text)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_en(text: &str) -> Expr {
        ExprParser::new(&Vocabulary::english())
            .parse(text)
            .unwrap()
            .unwrap()
    }

    fn ident(name: &str) -> Expr {
        Expr::Ident(name.into())
    }

    #[test]
    fn empty_and_terminator_only() {
        let parser = ExprParser::new(&Vocabulary::english());
        assert_eq!(parser.parse("").unwrap(), None);
        assert_eq!(parser.parse("  . ").unwrap(), None);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse_en("2 plus 3 times 4"),
            Expr::binary(
                BinaryOp::Add,
                Expr::Int(2),
                Expr::binary(BinaryOp::Mul, Expr::Int(3), Expr::Int(4))
            )
        );
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(
            parse_en("2 ** 3 ** 2"),
            Expr::binary(
                BinaryOp::Pow,
                Expr::Int(2),
                Expr::binary(BinaryOp::Pow, Expr::Int(3), Expr::Int(2))
            )
        );
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_eq!(
            parse_en("-2 ** 2"),
            Expr::unary(
                UnaryOp::Neg,
                Expr::binary(BinaryOp::Pow, Expr::Int(2), Expr::Int(2))
            )
        );
    }

    #[test]
    fn not_covers_a_comparison() {
        assert_eq!(
            parse_en("not x equals 3 or y"),
            Expr::binary(
                BinaryOp::Or,
                Expr::unary(
                    UnaryOp::Not,
                    Expr::binary(BinaryOp::Eq, ident("x"), Expr::Int(3))
                ),
                ident("y")
            )
        );
    }

    #[test]
    fn calls_members_and_indexing() {
        assert_eq!(
            parse_en("fact(n minus 1)"),
            Expr::Call {
                module: None,
                name: "fact".into(),
                args: vec![Expr::binary(BinaryOp::Sub, ident("n"), Expr::Int(1))],
            }
        );
        assert_eq!(
            parse_en("math.sqrt(16)"),
            Expr::Call {
                module: Some("math".into()),
                name: "sqrt".into(),
                args: vec![Expr::Int(16)],
            }
        );
        assert_eq!(
            parse_en("math.pi"),
            Expr::Member {
                module: "math".into(),
                member: "pi".into(),
            }
        );
        assert_eq!(
            parse_en("grid[1][0]"),
            Expr::Index {
                target: Box::new(Expr::Index {
                    target: Box::new(ident("grid")),
                    index: Box::new(Expr::Int(1)),
                }),
                index: Box::new(Expr::Int(0)),
            }
        );
    }

    #[test]
    fn nested_call_arguments_split_at_top_level() {
        assert_eq!(
            parse_en("max(min(1, 2), 3)"),
            Expr::Call {
                module: None,
                name: "max".into(),
                args: vec![
                    Expr::Call {
                        module: None,
                        name: "min".into(),
                        args: vec![Expr::Int(1), Expr::Int(2)],
                    },
                    Expr::Int(3),
                ],
            }
        );
    }

    #[test]
    fn list_literal() {
        assert_eq!(
            parse_en("[1, \"a\", [true]]"),
            Expr::List(vec![
                Expr::Int(1),
                Expr::Text("a".into()),
                Expr::List(vec![Expr::Bool(true)]),
            ])
        );
        assert_eq!(parse_en("[]"), Expr::List(vec![]));
    }

    #[test]
    fn french_comparison() {
        let parser = ExprParser::new(&Vocabulary::french());
        assert_eq!(
            parser.parse("n est inférieur ou égal à 1").unwrap().unwrap(),
            Expr::binary(BinaryOp::Le, ident("n"), Expr::Int(1))
        );
    }

    #[test]
    fn malformed_input_is_an_error() {
        let parser = ExprParser::new(&Vocabulary::english());
        assert!(parser.parse("2 plus").is_err());
        assert!(parser.parse("(1, 2").is_err());
        assert!(parser.parse("x y").is_err());
        assert!(parser.parse("format the disk").is_err());
    }
}
