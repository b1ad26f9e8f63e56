/// What the lexer does when it meets a character outside the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexPolicy {
    /// Stop and keep the tokens read so far. The stop position is reported.
    #[default]
    Truncate,
    /// Fail with `ExprError::UnrecognizedCharacter`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub lex_policy: LexPolicy,
    /// Compatibility mode for `!`: the prefix check never matches, so any
    /// `!` ends up in a malformed terminal.
    pub legacy_negate: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            lex_policy: LexPolicy::Reject,
            ..Self::default()
        }
    }
}
