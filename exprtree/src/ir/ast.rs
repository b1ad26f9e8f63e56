use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExprError;

/// Every operator the language knows. `Invert` never comes out of the lexer:
/// it is the role a leading `-` plays once the parser has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Invert,
    Negate,
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
    Assign,
    #[serde(rename = "Sin")]
    Sine,
    Log,
}

impl Operator {
    /// Lexical mapping for single-character operators.
    pub fn from_symbol(c: char) -> Option<Operator> {
        match c {
            '!' => Some(Operator::Negate),
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Exponentiate),
            '=' => Some(Operator::Assign),
            's' => Some(Operator::Sine),
            'l' => Some(Operator::Log),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Invert | Operator::Subtract => '-',
            Operator::Negate => '!',
            Operator::Add => '+',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Exponentiate => '^',
            Operator::Assign => '=',
            Operator::Sine => 's',
            Operator::Log => 'l',
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operator::Invert | Operator::Negate | Operator::Sine | Operator::Log => 1,
            Operator::Add
            | Operator::Subtract
            | Operator::Multiply
            | Operator::Divide
            | Operator::Exponentiate
            | Operator::Assign => 2,
        }
    }

    /// Function letters trail their operand: `30s`, `(2+3)l`.
    pub fn is_postfix(&self) -> bool {
        matches!(self, Operator::Sine | Operator::Log)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Invert => "Invert",
            Operator::Negate => "Negate",
            Operator::Add => "Add",
            Operator::Subtract => "Subtract",
            Operator::Multiply => "Multiply",
            Operator::Divide => "Divide",
            Operator::Exponentiate => "Exponentiate",
            Operator::Assign => "Assign",
            Operator::Sine => "Sin",
            Operator::Log => "Log",
        };
        f.write_str(name)
    }
}

/// A parsed expression. Leaves serialize as bare numbers,
/// operations as `{"op": ..., "args": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    /// 42
    Constant(u64),
    /// Add(2, 3), Sin(30)
    Operation { op: Operator, args: Vec<Expression> },
}

impl Expression {
    pub fn unary(op: Operator, arg: Expression) -> Self {
        debug_assert_eq!(op.arity(), 1);
        Expression::Operation {
            op,
            args: vec![arg],
        }
    }

    pub fn binary(op: Operator, left: Expression, right: Expression) -> Self {
        debug_assert_eq!(op.arity(), 2);
        Expression::Operation {
            op,
            args: vec![left, right],
        }
    }

    /// Walks the whole tree and rejects any node whose child count does not
    /// match its operator. Trees built by the parser always pass; trees read
    /// back from JSON may not.
    pub fn check_arity(&self) -> Result<(), ExprError> {
        match self {
            Expression::Constant(_) => Ok(()),
            Expression::Operation { op, args } => {
                if args.len() != op.arity() {
                    return Err(ExprError::ArityMismatch {
                        op: *op,
                        expected: op.arity(),
                        found: args.len(),
                    });
                }
                args.iter().try_for_each(Expression::check_arity)
            }
        }
    }
}

/// Root of a parse: the tree plus the text it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExpression {
    pub raw: String,
    pub tree: Expression,
    /// Byte offset where lenient lexing stopped, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated_at: Option<usize>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_symbol_maps_back_to_itself() {
        for c in "!+-*/^=sl".chars() {
            let op = Operator::from_symbol(c).expect("known symbol");
            assert_eq!(op.symbol(), c);
        }
        assert_eq!(Operator::from_symbol('-'), Some(Operator::Subtract));
        assert_eq!(Operator::from_symbol('x'), None);
    }

    #[test]
    fn leaves_serialize_as_numbers() {
        let tree = Expression::binary(
            Operator::Add,
            Expression::Constant(2),
            Expression::unary(Operator::Sine, Expression::Constant(30)),
        );
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"op":"Add","args":[2,{"op":"Sin","args":[30]}]}"#
        );
    }

    #[test]
    fn check_arity_rejects_foreign_trees() {
        let tree: Expression = serde_json::from_str(r#"{"op":"Add","args":[1]}"#).unwrap();
        assert_eq!(
            tree.check_arity(),
            Err(ExprError::ArityMismatch {
                op: Operator::Add,
                expected: 2,
                found: 1,
            })
        );

        let nested: Expression =
            serde_json::from_str(r#"{"op":"Invert","args":[{"op":"Log","args":[1,2]}]}"#).unwrap();
        assert!(matches!(
            nested.check_arity(),
            Err(ExprError::ArityMismatch { op: Operator::Log, .. })
        ));
    }
}
