//! Bracket-aware scanning over a token slice.
//!
//! Operators nested inside a bracketed group are invisible to the scan: when
//! a bracket is met, the whole group is stepped over with a depth counter
//! and the scan resumes after it.

use crate::error::ExprError;
use crate::ir::ast::Operator;
use crate::parser::lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right.
    Forward,
    /// Right to left.
    Backward,
}

impl Direction {
    fn start(self, len: usize) -> Option<usize> {
        match self {
            Direction::Forward => (len > 0).then_some(0),
            Direction::Backward => len.checked_sub(1),
        }
    }

    fn advance(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Forward => (index + 1 < len).then_some(index + 1),
            Direction::Backward => index.checked_sub(1),
        }
    }

    /// Whether `token` opens a group when walking this way.
    fn opens(self, token: &Token) -> bool {
        match self {
            Direction::Forward => token.is_open_bracket(),
            Direction::Backward => token.is_close_bracket(),
        }
    }
}

/// Returns the index of the bracket that closes the group starting at `at`.
pub fn skip_group(tokens: &[Token], at: usize, direction: Direction) -> Result<usize, ExprError> {
    let unbalanced = |index: usize| ExprError::UnbalancedBracket {
        span: tokens[index].span.into(),
    };

    if !direction.opens(&tokens[at]) {
        return Err(unbalanced(at));
    }

    let mut depth = 1usize;
    let mut cursor = direction.advance(at, tokens.len());
    while let Some(i) = cursor {
        let token = &tokens[i];
        if token.is_bracket() {
            if direction.opens(token) {
                depth += 1;
            } else {
                depth -= 1;
            }
            if depth == 0 {
                log::trace!("group {at}..{i} skipped ({direction:?})");
                return Ok(i);
            }
        }
        cursor = direction.advance(i, tokens.len());
    }

    Err(unbalanced(at))
}

/// Finds the first top-level occurrence of any of `ops` met while walking in
/// `direction`.
pub fn find_top_level(
    tokens: &[Token],
    ops: &[Operator],
    direction: Direction,
) -> Result<Option<usize>, ExprError> {
    let mut cursor = direction.start(tokens.len());
    while let Some(i) = cursor {
        let token = &tokens[i];
        let resume = if token.is_bracket() {
            skip_group(tokens, i, direction)?
        } else {
            if token.operator().is_some_and(|op| ops.contains(&op)) {
                return Ok(Some(i));
            }
            i
        };
        cursor = direction.advance(resume, tokens.len());
    }
    Ok(None)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::LexPolicy;
    use crate::parser::lexer::tokenize;

    fn lex(input: &str) -> Vec<Token> {
        tokenize(input, LexPolicy::Reject).unwrap().tokens
    }

    #[test]
    fn skip_group_forward_finds_matching_close() {
        let tokens = lex("(1+(2*3))+4");
        assert_eq!(skip_group(&tokens, 0, Direction::Forward), Ok(8));
        assert_eq!(skip_group(&tokens, 3, Direction::Forward), Ok(7));
    }

    #[test]
    fn skip_group_backward_finds_matching_open() {
        let tokens = lex("4+((2*3)+1)");
        assert_eq!(skip_group(&tokens, 10, Direction::Backward), Ok(2));
        assert_eq!(skip_group(&tokens, 7, Direction::Backward), Ok(3));
    }

    #[test]
    fn skip_group_rejects_unclosed_group() {
        let tokens = lex("(1+(2)");
        assert!(matches!(
            skip_group(&tokens, 0, Direction::Forward),
            Err(ExprError::UnbalancedBracket { .. })
        ));
    }

    #[test]
    fn skip_group_rejects_bracket_facing_the_wrong_way() {
        let tokens = lex(")1(");
        assert!(matches!(
            skip_group(&tokens, 0, Direction::Forward),
            Err(ExprError::UnbalancedBracket { .. })
        ));
        assert!(matches!(
            skip_group(&tokens, 2, Direction::Backward),
            Err(ExprError::UnbalancedBracket { .. })
        ));
    }

    #[test]
    fn operators_inside_brackets_are_invisible() {
        let tokens = lex("(1+2)*(3+4)");
        let add_sub = [Operator::Add, Operator::Subtract];
        let mul_div = [Operator::Multiply, Operator::Divide];
        assert_eq!(find_top_level(&tokens, &add_sub, Direction::Backward), Ok(None));
        assert_eq!(find_top_level(&tokens, &add_sub, Direction::Forward), Ok(None));
        assert_eq!(find_top_level(&tokens, &mul_div, Direction::Backward), Ok(Some(5)));
        assert_eq!(find_top_level(&tokens, &mul_div, Direction::Forward), Ok(Some(5)));
    }

    #[test]
    fn direction_picks_rightmost_or_leftmost() {
        let tokens = lex("1-2+3");
        let add_sub = [Operator::Add, Operator::Subtract];
        assert_eq!(find_top_level(&tokens, &add_sub, Direction::Backward), Ok(Some(3)));
        assert_eq!(find_top_level(&tokens, &add_sub, Direction::Forward), Ok(Some(1)));
    }

    #[test]
    fn empty_slice_has_no_occurrence() {
        assert_eq!(find_top_level(&[], &[Operator::Add], Direction::Forward), Ok(None));
        assert_eq!(find_top_level(&[], &[Operator::Add], Direction::Backward), Ok(None));
    }

    #[test]
    fn unbalanced_group_surfaces_from_scan() {
        let tokens = lex("1+(2");
        assert!(matches!(
            find_top_level(&tokens, &[Operator::Assign], Direction::Forward),
            Err(ExprError::UnbalancedBracket { .. })
        ));
    }
}
