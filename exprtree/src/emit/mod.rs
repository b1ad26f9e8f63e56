pub mod infix;
pub mod json;
pub mod tree;

use crate::error::ExprError;
use crate::ir::ast;

pub trait Emitter {
    fn emit(&mut self, parsed: &ast::ParsedExpression) -> Result<String, ExprError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Infix,
    Tree,
}

impl Format {
    pub fn all() -> Vec<Self> {
        vec![Self::Json, Self::Infix, Self::Tree]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Infix => "infix",
            Self::Tree => "tree",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Json => "pretty JSON, {op, args} per node",
            Self::Infix => "canonical expression text, re-parses to the same tree",
            Self::Tree => "indented outline, one node per line",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|f| f.name() == name)
    }

    pub fn create(&self) -> Box<dyn Emitter> {
        match self {
            Self::Json => Box::new(json::JsonEmitter),
            Self::Infix => Box::new(infix::InfixEmitter::new()),
            Self::Tree => Box::new(tree::TreeEmitter::new()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        for format in Format::all() {
            assert_eq!(Format::from_name(format.name()), Some(format));
        }
        assert_eq!(Format::from_name("xml"), None);
    }
}
