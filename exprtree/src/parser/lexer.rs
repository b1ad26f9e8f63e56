use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::config::LexPolicy;
use crate::error::ExprError;
use crate::ir::ast::Operator;
use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Constant(u64),
    Operator(Operator),
    Bracket { open: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn is_bracket(&self) -> bool {
        matches!(self.kind, TokenKind::Bracket { .. })
    }

    pub fn is_open_bracket(&self) -> bool {
        matches!(self.kind, TokenKind::Bracket { open: true })
    }

    pub fn is_close_bracket(&self) -> bool {
        matches!(self.kind, TokenKind::Bracket { open: false })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Constant(value) => write!(f, "{value}"),
            TokenKind::Operator(op) => write!(f, "{}", op.symbol()),
            TokenKind::Bracket { open: true } => f.write_str("("),
            TokenKind::Bracket { open: false } => f.write_str(")"),
        }
    }
}

/// Where lenient lexing gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub position: usize,
    pub found: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub stopped_at: Option<Truncation>,
}

/// Renders a token slice back to text for error messages, one space between
/// tokens so adjacent constants stay apart.
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn tokenize(source: &str, policy: LexPolicy) -> Result<Lexed, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            ' ' => {
                chars.next();
            }
            '0'..='9' => {
                tokens.push(parse_number(&mut chars)?);
            }
            '(' | ')' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Bracket { open: ch == '(' },
                    span: Span::new(pos, pos + 1),
                });
            }
            _ => {
                if let Some(op) = Operator::from_symbol(ch) {
                    chars.next();
                    tokens.push(Token {
                        kind: TokenKind::Operator(op),
                        span: Span::new(pos, pos + 1),
                    });
                    continue;
                }

                let span = Span::new(pos, pos + ch.len_utf8());
                return match policy {
                    LexPolicy::Reject => Err(ExprError::UnrecognizedCharacter {
                        found: ch,
                        span: span.into(),
                    }),
                    LexPolicy::Truncate => {
                        log::warn!(
                            "unrecognized character '{ch}' at offset {pos}, ignoring the rest of the input"
                        );
                        Ok(Lexed {
                            tokens,
                            stopped_at: Some(Truncation {
                                position: pos,
                                found: ch,
                            }),
                        })
                    }
                };
            }
        }
    }

    Ok(Lexed {
        tokens,
        stopped_at: None,
    })
}

fn parse_number(chars: &mut Peekable<CharIndices>) -> Result<Token, ExprError> {
    let mut digits = String::new();
    let mut span = Span::default();

    while let Some(&(pos, ch)) = chars.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        if digits.is_empty() {
            span.start = pos;
        }
        span.end = pos + 1;
        digits.push(ch);
        chars.next();
    }

    match digits.parse::<u64>() {
        Ok(value) => Ok(Token {
            kind: TokenKind::Constant(value),
            span,
        }),
        Err(_) => Err(ExprError::ConstantOverflow {
            digits,
            span: span.into(),
        }),
    }
}
