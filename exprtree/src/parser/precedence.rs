use crate::ir::ast::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Operators that bind equally tightly.
#[derive(Debug)]
pub struct PrecedenceGroup {
    operators: &'static [Operator],
}

impl PrecedenceGroup {
    const fn new(operators: &'static [Operator]) -> Self {
        assert!(!operators.is_empty());
        Self { operators }
    }

    /// The member the parser dispatches on.
    pub fn lead(&self) -> Operator {
        self.operators[0]
    }

    pub fn operators(&self) -> &'static [Operator] {
        self.operators
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.operators.contains(&op)
    }

    /// Only assignment chains group to the right.
    pub fn associativity(&self) -> Associativity {
        match self.lead() {
            Operator::Assign => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

/// Weakest binding first. Level `n` of the parser is `PRECEDENCE[n]`;
/// anything past the end is a terminal.
pub static PRECEDENCE: [PrecedenceGroup; 7] = [
    PrecedenceGroup::new(&[Operator::Assign]),
    PrecedenceGroup::new(&[Operator::Add, Operator::Subtract]),
    PrecedenceGroup::new(&[Operator::Multiply, Operator::Divide]),
    PrecedenceGroup::new(&[Operator::Exponentiate]),
    PrecedenceGroup::new(&[Operator::Sine, Operator::Log]),
    PrecedenceGroup::new(&[Operator::Negate]),
    PrecedenceGroup::new(&[Operator::Invert]),
];

pub fn group(level: usize) -> Option<&'static PrecedenceGroup> {
    PRECEDENCE.get(level)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_runs_from_assign_to_invert() {
        assert_eq!(group(0).map(PrecedenceGroup::lead), Some(Operator::Assign));
        assert_eq!(group(6).map(PrecedenceGroup::lead), Some(Operator::Invert));
        assert!(group(PRECEDENCE.len()).is_none());
    }

    #[test]
    fn every_operator_has_exactly_one_level() {
        let all = [
            Operator::Invert,
            Operator::Negate,
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
            Operator::Exponentiate,
            Operator::Assign,
            Operator::Sine,
            Operator::Log,
        ];
        for op in all {
            let levels = PRECEDENCE.iter().filter(|g| g.contains(op)).count();
            assert_eq!(levels, 1, "{op} appears in {levels} groups");
        }
    }

    #[test]
    fn only_assign_is_right_associative() {
        for g in &PRECEDENCE {
            let expected = if g.lead() == Operator::Assign {
                Associativity::Right
            } else {
                Associativity::Left
            };
            assert_eq!(g.associativity(), expected);
        }
    }
}
