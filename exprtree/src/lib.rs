//! Parses flat arithmetic expressions such as `(2+3)*4` or `30s` into an
//! operator tree.
//!
//! The pipeline is `&str -> lexer::tokenize -> parser::parse_tokens ->
//! Expression`. Precedence lives in a fixed table (`parser::precedence`),
//! weakest group first:
//!
//! `=` < `+ -` < `* /` < `^` < `s l` (postfix) < `!` (prefix) < `-` (prefix)

pub mod config;
pub mod emit;
pub mod error;
pub mod ir;
pub mod parser;
pub mod span;

pub use config::{LexPolicy, ParseOptions};
pub use error::ExprError;
pub use ir::ast::{Expression, Operator, ParsedExpression};
pub use parser::parse;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    });
}
