//! Precedence-climbing parser over canonical tokens.

use dav_stack::ensure_sufficient_stack;

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::lexer::Token;
use crate::errors::{syntax_error, EvalError};

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Parse the whole token stream as one expression.
    pub(crate) fn parse(mut self) -> Result<Expr, EvalError> {
        let expr = self.expression(0)?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(syntax_error(format!("unexpected {token:?} after expression"))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), EvalError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(syntax_error(format!("expected {what}")))
        }
    }

    fn expression(&mut self, min_prec: u8) -> Result<Expr, EvalError> {
        let mut left = ensure_sufficient_stack(|| self.prefix())?;

        while let Some(op) = self.peek().and_then(binary_op) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.pos += 1;
            let next_min = if op.is_right_assoc() { prec } else { prec + 1 };
            let right = self.expression(next_min)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn prefix(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek() {
            Some(Token::Not) => UnaryOp::Not,
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => {
                self.pos += 1;
                return self.expression(UnaryOp::Neg.precedence());
            }
            _ => return self.postfix(),
        };
        self.pos += 1;
        let operand = self.expression(op.precedence())?;
        Ok(Expr::unary(op, operand))
    }

    fn postfix(&mut self) -> Result<Expr, EvalError> {
        let mut expr = self.primary()?;
        while self.eat(&Token::LBracket) {
            let index = self.expression(0)?;
            self.expect(&Token::RBracket, "`]`")?;
            expr = Expr::Index {
                target: Box::new(expr),
                index: Box::new(index),
            };
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        match self.next() {
            Some(Token::Int(n)) => Ok(Expr::Int(n)),
            Some(Token::Float(x)) => Ok(Expr::Float(x)),
            Some(Token::Text(s)) => Ok(Expr::Text(s)),
            Some(Token::True) => Ok(Expr::Bool(true)),
            Some(Token::False) => Ok(Expr::Bool(false)),
            Some(Token::LParen) => {
                let inner = self.expression(0)?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(inner)
            }
            Some(Token::LBracket) => {
                let items = self.list_items(&Token::RBracket)?;
                Ok(Expr::List(items))
            }
            Some(Token::Ident(name)) => self.identifier(name),
            Some(token) => Err(syntax_error(format!("unexpected {token:?}"))),
            None => Err(syntax_error("unexpected end of expression")),
        }
    }

    /// `name`, `name(args)`, `module.member` or `module.member(args)`.
    fn identifier(&mut self, name: String) -> Result<Expr, EvalError> {
        if self.eat(&Token::LParen) {
            let args = self.list_items(&Token::RParen)?;
            return Ok(Expr::Call {
                module: None,
                name,
                args,
            });
        }
        if self.eat(&Token::Dot) {
            let Some(Token::Ident(member)) = self.next() else {
                return Err(syntax_error(format!("expected a member name after `{name}.`")));
            };
            if self.eat(&Token::LParen) {
                let args = self.list_items(&Token::RParen)?;
                return Ok(Expr::Call {
                    module: Some(name),
                    name: member,
                    args,
                });
            }
            return Ok(Expr::Member {
                module: name,
                member,
            });
        }
        Ok(Expr::Ident(name))
    }

    /// Comma-separated expressions up to and including `close`.
    fn list_items(&mut self, close: &Token) -> Result<Vec<Expr>, EvalError> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.expression(0)?);
            if self.eat(close) {
                return Ok(items);
            }
            self.expect(&Token::Comma, "`,`")?;
        }
    }
}

fn binary_op(token: &Token) -> Option<BinaryOp> {
    Some(match token {
        Token::Or => BinaryOp::Or,
        Token::And => BinaryOp::And,
        Token::EqEq => BinaryOp::Eq,
        Token::NotEq => BinaryOp::Ne,
        Token::Lt => BinaryOp::Lt,
        Token::LtEq => BinaryOp::Le,
        Token::Gt => BinaryOp::Gt,
        Token::GtEq => BinaryOp::Ge,
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Sub,
        Token::Star => BinaryOp::Mul,
        Token::Slash => BinaryOp::Div,
        Token::SlashSlash => BinaryOp::FloorDiv,
        Token::Percent => BinaryOp::Mod,
        Token::StarStar => BinaryOp::Pow,
        _ => return None,
    })
}
