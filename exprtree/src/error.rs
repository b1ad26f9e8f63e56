use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ir::ast::Operator;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("Unrecognized character: '{found}'")]
    #[diagnostic(
        code(exprtree::lex::unrecognized),
        help("supported symbols are digits, ! + - * / ^ = s l, brackets and spaces")
    )]
    UnrecognizedCharacter {
        found: char,
        #[label("not part of the expression language")]
        span: SourceSpan,
    },

    #[error("Constant '{digits}' does not fit in 64 bits")]
    #[diagnostic(code(exprtree::lex::overflow))]
    ConstantOverflow {
        digits: String,
        #[label("too large")]
        span: SourceSpan,
    },

    #[error("Expected an operand, found nothing")]
    #[diagnostic(code(exprtree::parse::empty))]
    EmptyExpression {
        #[label("operand missing here")]
        span: SourceSpan,
    },

    #[error("Unbalanced bracket")]
    #[diagnostic(
        code(exprtree::parse::bracket),
        help("every '(' needs a matching ')' in the same sub-expression")
    )]
    UnbalancedBracket {
        #[label("no matching bracket")]
        span: SourceSpan,
    },

    #[error("Malformed expression: '{slice}'")]
    #[diagnostic(
        code(exprtree::parse::malformed),
        help("a lone operand must be a single constant")
    )]
    MalformedExpression {
        slice: String,
        #[label("cannot be reduced to a constant")]
        span: SourceSpan,
    },

    #[error("Expression nests deeper than {limit} operands")]
    #[diagnostic(
        code(exprtree::parse::depth),
        help("split the expression or group long chains with brackets")
    )]
    TooDeep {
        limit: usize,
        #[label("nesting limit reached here")]
        span: SourceSpan,
    },

    #[error("Operator {op} takes {expected} argument(s), found {found}")]
    #[diagnostic(code(exprtree::tree::arity))]
    ArityMismatch {
        op: Operator,
        expected: usize,
        found: usize,
    },

    #[error("Invalid JSON expression: {message}")]
    #[diagnostic(code(exprtree::json))]
    Json { message: String },
}

impl From<serde_json::Error> for ExprError {
    fn from(err: serde_json::Error) -> Self {
        ExprError::Json {
            message: err.to_string(),
        }
    }
}
