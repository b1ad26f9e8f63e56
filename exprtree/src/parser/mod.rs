pub mod lexer;
pub mod parser;
pub mod precedence;
pub mod scan;

use crate::config::ParseOptions;
use crate::error::ExprError;
use crate::ir::ast;

/// Text in, tree out. The source string is attached to the root once the
/// tree is complete.
pub fn parse(source: &str, options: &ParseOptions) -> Result<ast::ParsedExpression, ExprError> {
    let lexed = lexer::tokenize(source, options.lex_policy)?;
    let tree = parser::parse_tokens(&lexed.tokens, options)?;
    Ok(ast::ParsedExpression {
        raw: source.to_string(),
        tree,
        truncated_at: lexed.stopped_at.map(|t| t.position),
    })
}
