//! Identifier and literal escaping for bracket-quoted T-SQL.

use chrono::{DateTime, Utc};

use crate::ast::Value;

/// Wrap an identifier in brackets, doubling single quotes.
///
/// Closing brackets inside `name` are left as they are.
pub fn escape_identifier(name: &str) -> String {
    format!("[{}]", name.replace('\'', "''"))
}

/// Render a value as a SQL literal.
pub fn escape_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => number_text(*n),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}

/// Decimal text of a float, switching to exponent form (`1e+21`, `1e-7`)
/// from 1e21 up and below 1e-6. Non-finite values become `NaN`,
/// `Infinity` and `-Infinity`.
pub fn number_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{:e}", n);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }
    n.to_string()
}

/// DATETIME2 text: `YYYY-MM-DDThh:mm:ss.ffffff`, UTC.
pub fn to_sql_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
