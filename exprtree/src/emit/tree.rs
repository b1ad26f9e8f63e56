use std::fmt::Write;

use crate::error::ExprError;
use crate::ir::ast::{Expression, ParsedExpression};

use super::Emitter;

pub struct TreeEmitter {
    indent: usize,
}

impl TreeEmitter {
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    fn node(&self, out: &mut String, expr: &Expression, depth: usize) {
        let pad = " ".repeat(depth * self.indent);
        match expr {
            Expression::Constant(value) => {
                // Writing into a String cannot fail.
                let _ = writeln!(out, "{pad}{value}");
            }
            Expression::Operation { op, args } => {
                let _ = writeln!(out, "{pad}{op}");
                for arg in args {
                    self.node(out, arg, depth + 1);
                }
            }
        }
    }
}

impl Default for TreeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for TreeEmitter {
    fn emit(&mut self, parsed: &ParsedExpression) -> Result<String, ExprError> {
        parsed.tree.check_arity()?;
        let mut out = String::new();
        self.node(&mut out, &parsed.tree, 0);
        if let Some(position) = parsed.truncated_at {
            let _ = writeln!(out, "(input truncated at offset {position})");
        }
        Ok(out)
    }
}
