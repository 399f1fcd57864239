//! # Eval Module - Arithmetic Expression Evaluation
//!
//! A small recursive-descent evaluator over a fixed grammar. It has no notion of variables,
//! functions or any other construct, so evaluating user text can never do anything but
//! arithmetic.
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! number  := digits ['.' [digits]] | '.' digits
//! ```
//!
//! Signs may be chained (`5--3` is `5 - (-3)`), so a toggled sign never has to be merged into
//! the operator in front of it. Parentheses and signs nest at most [MAX_NESTING] levels deep.
//!
//! ## Evaluation Flow
//!
#![doc = simple_mermaid::mermaid!("../diagrams/evaluation_flow.mmd")]
//!
//! ## Usage Example
//!
//! ```rust
//! use reckon::{evaluate, EvalError};
//!
//! assert_eq!(evaluate("2+3*4"), Ok(14.0));
//! assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
//! assert_eq!(evaluate("1/0"), Err(EvalError::NonFiniteResult));
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

use crate::sanitize;

/// How deep parentheses and unary signs may nest before an expression is rejected
pub const MAX_NESTING: usize = 256;

/// Reasons an expression could not be turned into a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression contains disallowed characters or is not well-formed
    #[error("Invalid expression")]
    InvalidExpression,

    /// The expression evaluated to infinity or NaN
    #[error("Result is not a finite number")]
    NonFiniteResult,
}

/// Sanitize and evaluate an expression
///
/// Percentages are rewritten by [sanitize], the result is parsed and evaluated with the usual
/// operator precedence. Non-finite results (e.g. division by zero) are rejected.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let sanitized = sanitize(expression)?;
    let tokens = tokenize(&sanitized)?;

    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
    };
    let value = parser.expression()?;

    // Everything must be consumed, e.g. "2 3" or "2(3)" are invalid
    if parser.peek().is_some() {
        return Err(EvalError::InvalidExpression);
    }

    if !value.is_finite() {
        return Err(EvalError::NonFiniteResult);
    }

    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    OpenParen,
    CloseParen,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(index, char)) = chars.peek() {
        let token = match char {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let end = scan_number(&mut chars);
                let literal = &expression[index..end];
                Token::Number(
                    literal
                        .parse()
                        .map_err(|_| EvalError::InvalidExpression)?,
                )
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            _ => return Err(EvalError::InvalidExpression),
        };

        if !matches!(token, Token::Number(_)) {
            chars.next();
        }
        tokens.push(token);
    }

    Ok(tokens)
}

/// Consume a number literal (digits with at most one decimal point), returning its end offset
fn scan_number(chars: &mut Peekable<CharIndices>) -> usize {
    let mut seen_point = false;
    let mut end = 0;

    while let Some(&(index, char)) = chars.peek() {
        match char {
            '0'..='9' => {}
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = index + char.len_utf8();
        chars.next();
    }

    end
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Open parentheses and pending unary signs
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.position += 1;
        token
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut left = self.term()?;

        while let Some(token @ (Token::Plus | Token::Minus)) = self.peek() {
            self.position += 1;
            let right = self.term()?;
            left = if token == Token::Plus {
                left + right
            } else {
                left - right
            };
        }

        Ok(left)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut left = self.unary()?;

        while let Some(token @ (Token::Star | Token::Slash)) = self.peek() {
            self.position += 1;
            let right = self.unary()?;
            left = if token == Token::Star {
                left * right
            } else {
                left / right
            };
        }

        Ok(left)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(token @ (Token::Minus | Token::Plus)) => {
                self.position += 1;
                let value = self.nested(Self::unary)?;
                Ok(if token == Token::Minus { -value } else { value })
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::OpenParen) => {
                let value = self.nested(Self::expression)?;
                match self.next() {
                    Some(Token::CloseParen) => Ok(value),
                    _ => Err(EvalError::InvalidExpression),
                }
            }
            _ => Err(EvalError::InvalidExpression),
        }
    }

    /// Parse one level deeper, failing once [MAX_NESTING] is exceeded
    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<f64, EvalError>,
    ) -> Result<f64, EvalError> {
        if self.depth >= MAX_NESTING {
            return Err(EvalError::InvalidExpression);
        }

        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }
}
