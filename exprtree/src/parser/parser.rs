use crate::config::ParseOptions;
use crate::error::ExprError;
use crate::ir::ast::{Expression, Operator};
use crate::span::Span;

use super::lexer::{Token, TokenKind, render};
use super::precedence::{self, Associativity, PrecedenceGroup};
use super::scan::{self, Direction};

pub fn parse_tokens(tokens: &[Token], options: &ParseOptions) -> Result<Expression, ExprError> {
    Parser::new(*options).parse(tokens, 0)
}

/// Deepest operand nesting accepted. Each nested operand costs a few stack
/// frames, so the bound keeps long chains like `1+1+...+1` from overflowing
/// the stack.
pub const MAX_DEPTH: usize = 256;

/// Precedence-climbing by slicing: each call looks for the weakest operator
/// of its level, splits the slice there and recurses on the pieces.
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parses `tokens` starting at precedence `level`. A level that does not
    /// apply falls through to `level + 1`; past the last level the slice must
    /// be a single constant.
    pub fn parse(&self, tokens: &[Token], level: usize) -> Result<Expression, ExprError> {
        self.parse_nested(tokens, level, 0)
    }

    fn parse_nested(
        &self,
        tokens: &[Token],
        level: usize,
        depth: usize,
    ) -> Result<Expression, ExprError> {
        let Some(whole) = covering_span(tokens) else {
            return Err(ExprError::EmptyExpression {
                span: Span::default().into(),
            });
        };
        let tokens = strip_brackets(tokens)?;
        if tokens.is_empty() {
            return Err(ExprError::EmptyExpression { span: whole.into() });
        }
        if depth > MAX_DEPTH {
            return Err(ExprError::TooDeep {
                limit: MAX_DEPTH,
                span: whole.into(),
            });
        }

        let mut level = level;
        loop {
            log::debug!("parse level {level}: {}", render(tokens));

            let Some(group) = precedence::group(level) else {
                return terminal(tokens);
            };

            let parsed = match group.lead() {
                Operator::Invert => self.prefix(tokens, Operator::Subtract, Operator::Invert, depth)?,
                Operator::Negate if self.options.legacy_negate => None,
                Operator::Negate => self.prefix(tokens, Operator::Negate, Operator::Negate, depth)?,
                Operator::Sine | Operator::Log => self.postfix(tokens, group, depth)?,
                Operator::Exponentiate
                | Operator::Multiply
                | Operator::Divide
                | Operator::Add
                | Operator::Subtract
                | Operator::Assign => self.infix(tokens, group, depth)?,
            };

            match parsed {
                Some(expr) => return Ok(expr),
                None => level += 1,
            }
        }
    }

    /// `-x` or `!x`: applies when the slice starts with `trigger`.
    fn prefix(
        &self,
        tokens: &[Token],
        trigger: Operator,
        node: Operator,
        depth: usize,
    ) -> Result<Option<Expression>, ExprError> {
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(None);
        };
        if first.operator() != Some(trigger) {
            return Ok(None);
        }

        let arg = self.operand(rest, Span::new(first.span.end, first.span.end), depth)?;
        Ok(Some(Expression::unary(node, arg)))
    }

    /// `x s` or `x l`: applies when the slice ends with a member of `group`.
    fn postfix(
        &self,
        tokens: &[Token],
        group: &PrecedenceGroup,
        depth: usize,
    ) -> Result<Option<Expression>, ExprError> {
        let Some((last, rest)) = tokens.split_last() else {
            return Ok(None);
        };
        let Some(op) = last.operator().filter(|op| group.contains(*op)) else {
            return Ok(None);
        };

        let arg = self.operand(rest, Span::new(last.span.start, last.span.start), depth)?;
        Ok(Some(Expression::unary(op, arg)))
    }

    /// Splits at the top-level occurrence chosen by the group's associativity:
    /// rightmost for left-associative groups, leftmost for right-associative.
    fn infix(
        &self,
        tokens: &[Token],
        group: &PrecedenceGroup,
        depth: usize,
    ) -> Result<Option<Expression>, ExprError> {
        let direction = match group.associativity() {
            Associativity::Left => Direction::Backward,
            Associativity::Right => Direction::Forward,
        };

        let found = scan::find_top_level(tokens, group.operators(), direction)?;
        // An operator in first position has no left operand; it belongs to a
        // stronger level (unary minus).
        let Some(split) = found.filter(|&pos| pos > 0) else {
            return Ok(None);
        };
        let Some(op) = tokens[split].operator() else {
            return Ok(None);
        };

        log::debug!("split {} at {split}: {op}", render(tokens));

        let op_span = tokens[split].span;
        let left = self.operand(&tokens[..split], Span::new(op_span.start, op_span.start), depth)?;
        let right = self.operand(&tokens[split + 1..], Span::new(op_span.end, op_span.end), depth)?;
        Ok(Some(Expression::binary(op, left, right)))
    }

    /// Operands always restart from the weakest level, one level deeper.
    fn operand(&self, tokens: &[Token], near: Span, depth: usize) -> Result<Expression, ExprError> {
        if tokens.is_empty() {
            return Err(ExprError::EmptyExpression { span: near.into() });
        }
        self.parse_nested(tokens, 0, depth + 1)
    }
}

fn terminal(tokens: &[Token]) -> Result<Expression, ExprError> {
    match tokens {
        [
            Token {
                kind: TokenKind::Constant(value),
                ..
            },
        ] => Ok(Expression::Constant(*value)),
        _ => Err(ExprError::MalformedExpression {
            slice: render(tokens),
            span: covering_span(tokens).unwrap_or_default().into(),
        }),
    }
}

/// Removes every bracket pair that wraps the whole slice. `(1)+(2)` starts
/// and ends with a bracket but is not wrapped, so it is left alone.
fn strip_brackets(mut tokens: &[Token]) -> Result<&[Token], ExprError> {
    while let (Some(first), Some(last)) = (tokens.first(), tokens.last()) {
        if tokens.len() < 2 || !first.is_open_bracket() || !last.is_close_bracket() {
            break;
        }
        if scan::skip_group(tokens, 0, Direction::Forward)? != tokens.len() - 1 {
            break;
        }
        tokens = &tokens[1..tokens.len() - 1];
    }
    Ok(tokens)
}

fn covering_span(tokens: &[Token]) -> Option<Span> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(first.span.to(last.span))
}
