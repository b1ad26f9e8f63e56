use crate::error::ExprError;
use crate::ir::ast::ParsedExpression;

use super::Emitter;

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit(&mut self, parsed: &ParsedExpression) -> Result<String, ExprError> {
        Ok(serde_json::to_string_pretty(parsed)?)
    }
}

/// Reads back what `JsonEmitter` wrote. Trees from outside may break the
/// arity rules, so they are checked before being handed out.
pub fn read(json: &str) -> Result<ParsedExpression, ExprError> {
    let parsed: ParsedExpression = serde_json::from_str(json)?;
    parsed.tree.check_arity()?;
    Ok(parsed)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::ParseOptions;
    use crate::parser::parse;

    #[test]
    fn output_keeps_raw_text_and_tree() {
        let parsed = parse("2+3", &ParseOptions::default()).unwrap();
        let json = JsonEmitter.emit(&parsed).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "raw": "2+3",
                "tree": { "op": "Add", "args": [2, 3] }
            })
        );
    }

    #[test]
    fn truncation_point_is_reported() {
        let parsed = parse("7?", &ParseOptions::default()).unwrap();
        let json = JsonEmitter.emit(&parsed).unwrap();
        assert!(json.contains(r#""truncated_at": 1"#));
    }

    #[test]
    fn read_accepts_emitted_output() {
        let parsed = parse("(1+2)s", &ParseOptions::default()).unwrap();
        let json = JsonEmitter.emit(&parsed).unwrap();
        assert_eq!(read(&json).unwrap(), parsed);
    }

    #[test]
    fn read_rejects_bad_arity() {
        let err = read(r#"{"raw": "", "tree": {"op": "Sin", "args": [1, 2]}}"#).unwrap_err();
        assert!(matches!(err, ExprError::ArityMismatch { expected: 1, found: 2, .. }));
    }

    #[test]
    fn read_rejects_unknown_operator() {
        let err = read(r#"{"raw": "", "tree": {"op": "Modulo", "args": [1, 2]}}"#).unwrap_err();
        assert!(matches!(err, ExprError::Json { .. }));
    }
}
