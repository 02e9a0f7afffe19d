//! Value normalization ahead of escaping.

use crate::ast::Value;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Prepare a raw value for storage.
///
/// Falsy values pass through. Callables become their source text; arrays
/// and objects become JSON text. A value that cannot be encoded is passed
/// through unchanged and reported as a [`Diagnostic::SerializationFallback`].
pub fn normalize_value(value: Value, diagnostics: &dyn Diagnostics) -> Value {
    if value.is_falsy() {
        return value;
    }

    match value {
        Value::Function(src) => Value::String(src),
        Value::Array(_) | Value::Object(_) => match value.to_json() {
            Some(json) => Value::String(json.to_string()),
            None => {
                diagnostics.report(Diagnostic::SerializationFallback { kind: value.kind() });
                value
            }
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Recorder;
    use crate::transpiler::escape::escape_literal;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_array_round_trip() {
        let recorder = Recorder::new();
        let value = normalize_value(Value::from(vec![1, 2, 3]), &recorder);
        assert_eq!(escape_literal(&value), "'[1,2,3]'");
        assert!(recorder.diagnostics().is_empty());
    }

    #[test]
    fn test_object_becomes_json() {
        let recorder = Recorder::new();
        let value = normalize_value(Value::object([("a", 1), ("b", 2)]), &recorder);
        assert_eq!(value, Value::from(r#"{"a":1,"b":2}"#));
    }

    #[test]
    fn test_function_becomes_source() {
        let recorder = Recorder::new();
        let value = normalize_value(Value::Function("function () { return 1; }".into()), &recorder);
        assert_eq!(value, Value::from("function () { return 1; }"));
    }

    #[test]
    fn test_falsy_and_scalars_pass_through() {
        let recorder = Recorder::new();
        assert_eq!(normalize_value(Value::Null, &recorder), Value::Null);
        assert_eq!(normalize_value(Value::Int(0), &recorder), Value::Int(0));
        assert_eq!(normalize_value(Value::from("x"), &recorder), Value::from("x"));
        assert_eq!(normalize_value(Value::Int(7), &recorder), Value::Int(7));
    }

    #[test]
    fn test_encode_failure_falls_back() {
        let recorder = Recorder::new();
        let raw = Value::from(vec![Value::Float(f64::NAN)]);
        let value = normalize_value(raw.clone(), &recorder);
        assert!(matches!(value, Value::Array(_)));
        assert_eq!(
            recorder.diagnostics(),
            vec![Diagnostic::SerializationFallback { kind: "array" }]
        );
    }
}
