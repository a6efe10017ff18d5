//! Tokenizer for canonical expressions.

use logos::Logos;

use crate::errors::{syntax_error, EvalError};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    // === Keywords ===
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("true", ignore(ascii_case))]
    True,
    #[token("false", ignore(ascii_case))]
    False,

    // === Operators ===
    #[token("**")]
    StarStar,
    #[token("*")]
    Star,
    #[token("//")]
    SlashSlash,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("==")]
    #[token("=")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // === Literals ===
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r#""[^"]*""#, |lex| unquote(lex.slice()))]
    #[regex(r"'[^']*'", |lex| unquote(lex.slice()))]
    Text(String),

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

fn unquote(slice: &str) -> String {
    slice[1..slice.len() - 1].to_string()
}

/// Tokenize a canonical expression.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, EvalError> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(syntax_error(format!(
                    "unexpected `{}` at offset {}",
                    lexer.slice(),
                    lexer.span().start
                )))
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_and_operators() {
        assert_eq!(
            tokenize("2 ** 3.5 // 4 != 1").unwrap(),
            vec![
                Token::Int(2),
                Token::StarStar,
                Token::Float(3.5),
                Token::SlashSlash,
                Token::Int(4),
                Token::NotEq,
                Token::Int(1),
            ]
        );
    }

    #[test]
    fn both_quote_styles() {
        assert_eq!(
            tokenize("\"it's\" + 'say \"hi\"'").unwrap(),
            vec![
                Token::Text("it's".into()),
                Token::Plus,
                Token::Text("say \"hi\"".into()),
            ]
        );
    }

    #[test]
    fn keywords_ignore_case_identifiers_keep_it() {
        assert_eq!(
            tokenize("NOT True and Résultat").unwrap(),
            vec![
                Token::Not,
                Token::True,
                Token::And,
                Token::Ident("Résultat".into()),
            ]
        );
        assert_eq!(tokenize("android").unwrap(), vec![Token::Ident("android".into())]);
    }

    #[test]
    fn member_access_and_indexing() {
        assert_eq!(
            tokenize("math.pi + xs[0]").unwrap(),
            vec![
                Token::Ident("math".into()),
                Token::Dot,
                Token::Ident("pi".into()),
                Token::Plus,
                Token::Ident("xs".into()),
                Token::LBracket,
                Token::Int(0),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn stray_characters_are_syntax_errors() {
        assert!(tokenize("x $ 2").is_err());
        assert!(tokenize("\"unterminated").is_err());
    }
}
