use std::fmt::Write;

use crate::error::ExprError;
use crate::ir::ast::{Expression, ParsedExpression};

use super::Emitter;

/// Canonical text: constants bare, every operator operand bracketed.
/// Feeding the result back through the parser yields the same tree.
pub struct InfixEmitter {
    out: String,
}

impl InfixEmitter {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    fn expression(&mut self, expr: &Expression) -> Result<(), ExprError> {
        let Expression::Operation { op, args } = expr else {
            return self.operand(expr);
        };

        match args.as_slice() {
            [arg] if op.is_postfix() => {
                self.operand(arg)?;
                self.out.push(op.symbol());
            }
            [arg] => {
                self.out.push(op.symbol());
                self.operand(arg)?;
            }
            [left, right] => {
                self.operand(left)?;
                self.out.push(op.symbol());
                self.operand(right)?;
            }
            _ => {
                return Err(ExprError::ArityMismatch {
                    op: *op,
                    expected: op.arity(),
                    found: args.len(),
                });
            }
        }
        Ok(())
    }

    fn operand(&mut self, expr: &Expression) -> Result<(), ExprError> {
        match expr {
            Expression::Constant(value) => {
                // Writing into a String cannot fail.
                let _ = write!(self.out, "{value}");
            }
            Expression::Operation { .. } => {
                self.out.push('(');
                self.expression(expr)?;
                self.out.push(')');
            }
        }
        Ok(())
    }
}

impl Default for InfixEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for InfixEmitter {
    fn emit(&mut self, parsed: &ParsedExpression) -> Result<String, ExprError> {
        self.out.clear();
        self.expression(&parsed.tree)?;
        Ok(std::mem::take(&mut self.out))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::ParseOptions;
    use crate::ir::ast::Operator;
    use crate::parser::parse;

    fn canonical(input: &str) -> String {
        let parsed = parse(input, &ParseOptions::default()).unwrap();
        InfixEmitter::new().emit(&parsed).unwrap()
    }

    #[test]
    fn brackets_every_compound_operand() {
        assert_eq!(canonical("2+3*4"), "2+(3*4)");
        assert_eq!(canonical("8-3-2"), "(8-3)-2");
        assert_eq!(canonical(" ( 42 ) "), "42");
    }

    #[test]
    fn unary_placement() {
        assert_eq!(canonical("-5"), "-5");
        assert_eq!(canonical("-5s"), "(-5)s");
        assert_eq!(canonical("-(5s)"), "-(5s)");
        assert_eq!(canonical("!(2+3)l"), "(!(2+3))l");
    }

    #[test]
    fn emitter_is_reusable() {
        let mut emitter = InfixEmitter::new();
        let first = parse("1+2", &ParseOptions::default()).unwrap();
        let second = parse("3", &ParseOptions::default()).unwrap();
        assert_eq!(emitter.emit(&first).unwrap(), "1+2");
        assert_eq!(emitter.emit(&second).unwrap(), "3");
    }

    #[test]
    fn arity_mismatch_is_reported() {
        let parsed = ParsedExpression {
            raw: String::new(),
            tree: Expression::Operation {
                op: Operator::Add,
                args: vec![Expression::Constant(1)],
            },
            truncated_at: None,
        };
        assert!(matches!(
            InfixEmitter::new().emit(&parsed),
            Err(ExprError::ArityMismatch { .. })
        ));
    }
}
