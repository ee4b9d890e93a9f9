/*!
Turns a pattern into a postfix token stream.

This happens in two steps. First, [`insert_concat`] lexes the pattern and
makes concatenation explicit, so that `ab*` becomes `a.b*`. Second,
[`to_postfix`] reorders the infix tokens into postfix order with the
shunting-yard algorithm, so that `a.b*` becomes `ab*.`.

Tokens are typed rather than kept as characters. In particular, the explicit
concatenation operator can never be confused with a literal `.` in the
pattern.
*/

use core::fmt;

use crate::error::{CompileError, CompileResult};

/// A single token of a pattern.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Token {
    /// A character that matches itself.
    Literal(char),
    /// Explicit concatenation. This never appears in a pattern and is only
    /// produced by [`insert_concat`].
    Concat,
    /// `|`
    Alternate,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `(`
    Open,
    /// `)`
    Close,
}

impl Token {
    fn from_char(ch: char) -> Token {
        match ch {
            '|' => Token::Alternate,
            '*' => Token::Star,
            '+' => Token::Plus,
            '(' => Token::Open,
            ')' => Token::Close,
            ch => Token::Literal(ch),
        }
    }

    /// Returns the character used to render this token. Concatenation is
    /// rendered as `.`.
    pub fn as_char(&self) -> char {
        match *self {
            Token::Literal(ch) => ch,
            Token::Concat => '.',
            Token::Alternate => '|',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Open => '(',
            Token::Close => ')',
        }
    }

    /// Returns the binding strength of an operator. Higher binds tighter.
    /// Non-operators have no precedence.
    fn precedence(&self) -> Option<u8> {
        match *self {
            Token::Alternate => Some(0),
            Token::Concat => Some(1),
            Token::Star | Token::Plus => Some(2),
            _ => None,
        }
    }

    /// Returns true if nothing can be concatenated onto this token.
    fn opens(&self) -> bool {
        matches!(*self, Token::Open | Token::Alternate)
    }

    /// Returns true if this token attaches to whatever precedes it.
    fn attaches_left(&self) -> bool {
        matches!(*self, Token::Star | Token::Plus | Token::Alternate | Token::Close)
    }
}

/// A borrowed token sequence that renders as a pattern string.
///
/// This is mostly useful for debugging, e.g., to show the postfix form of a
/// pattern.
#[derive(Clone, Copy, Debug)]
pub struct Tokens<'a>(pub &'a [Token]);

impl<'a> fmt::Display for Tokens<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.0 {
            write!(f, "{}", token.as_char())?;
        }
        Ok(())
    }
}

/// Lexes `pattern` and inserts an explicit [`Token::Concat`] between every
/// pair of adjacent tokens that are implicitly concatenated.
///
/// This never fails. A malformed pattern, e.g., one with unbalanced
/// parentheses, produces a malformed token stream and is reported by the
/// later stages.
pub fn insert_concat(pattern: &str) -> Vec<Token> {
    let tokens: Vec<Token> = pattern.chars().map(Token::from_char).collect();
    let mut output = Vec::with_capacity(tokens.len() * 2);
    for (i, &token) in tokens.iter().enumerate() {
        output.push(token);
        if token.opens() {
            continue;
        }
        match tokens.get(i + 1) {
            Some(next) if !next.attaches_left() => output.push(Token::Concat),
            _ => {}
        }
    }
    output
}

/// Converts an infix token stream with explicit concatenation into postfix
/// order.
///
/// All operators are left associative. `*` and `+` bind tightest, then
/// concatenation, then `|`. Parentheses are consumed and never appear in
/// the output.
///
/// # Errors
///
/// This returns an error when the parentheses in `infix` are unbalanced.
pub fn to_postfix(infix: &[Token]) -> CompileResult<Vec<Token>> {
    let mut output = Vec::with_capacity(infix.len());
    let mut stack: Vec<Token> = vec![];
    for &token in infix {
        match token {
            Token::Literal(_) => output.push(token),
            Token::Open => stack.push(token),
            Token::Close => loop {
                match stack.pop() {
                    None => return Err(CompileError::unmatched_close()),
                    Some(Token::Open) => break,
                    Some(op) => output.push(op),
                }
            },
            op => {
                let prec = op.precedence();
                while let Some(&top) = stack.last() {
                    if top == Token::Open || top.precedence() < prec {
                        break;
                    }
                    output.push(top);
                    stack.pop();
                }
                stack.push(op);
            }
        }
    }
    while let Some(op) = stack.pop() {
        if op == Token::Open {
            return Err(CompileError::unmatched_open());
        }
        output.push(op);
    }
    Ok(output)
}

/// Runs [`insert_concat`] and [`to_postfix`] on `pattern`.
pub fn parse(pattern: &str) -> CompileResult<Vec<Token>> {
    to_postfix(&insert_concat(pattern))
}
