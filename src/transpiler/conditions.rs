//! WHERE-tree compilation.

use crate::ast::*;
use crate::diagnostics::Diagnostics;
use crate::error::{CompileError, CompileResult};
use crate::parser::comparator_tests;
use crate::transpiler::build_csv;
use crate::transpiler::escape::{escape_identifier, escape_literal};
use crate::transpiler::normalize::normalize_value;

/// Escaped-percent marker accepted inside `like` patterns.
const ESCAPED_PERCENT: &str = "%%%";

/// Compile a WHERE mapping: predicates joined with AND.
pub fn compile_where(filter: &Where, diagnostics: &dyn Diagnostics) -> CompileResult<String> {
    let parts = filter
        .predicates()
        .iter()
        .map(|p| compile_predicate(p, diagnostics))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(parts.join(" AND "))
}

/// Compile OR-ed sub-wheres into a parenthesized group.
pub fn compile_or_groups(groups: &[Where], diagnostics: &dyn Diagnostics) -> CompileResult<String> {
    compile_group(groups, " OR ", diagnostics)
}

fn compile_group(
    groups: &[Where],
    joiner: &str,
    diagnostics: &dyn Diagnostics,
) -> CompileResult<String> {
    if groups.is_empty() {
        return Err(CompileError::invalid("empty criteria group"));
    }
    let parts = groups
        .iter()
        .map(|g| compile_where(g, diagnostics))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(format!("({})", parts.join(joiner)))
}

fn compile_predicate(
    predicate: &Predicate,
    diagnostics: &dyn Diagnostics,
) -> CompileResult<String> {
    match predicate {
        Predicate::Equality { column, value } => Ok(compile_criterion(column, value, diagnostics)),
        Predicate::Comparator { column, tests } => {
            Ok(compile_comparators(column, tests, diagnostics))
        }
        Predicate::InList { column, values } => Ok(compile_in_list(column, values, diagnostics)),
        Predicate::Or(groups) => compile_group(groups, " OR ", diagnostics),
        Predicate::And(groups) => compile_group(groups, " AND ", diagnostics),
        Predicate::Like(entries) => compile_like(entries, diagnostics),
    }
}

fn compile_comparators(
    column: &str,
    tests: &[(ComparatorOp, Value)],
    diagnostics: &dyn Diagnostics,
) -> String {
    let parts = tests
        .iter()
        .map(|(op, value)| compile_op(column, *op, value, diagnostics))
        .collect::<Vec<_>>();
    parts.join(" AND ")
}

/// Compile one comparator test against `column`, with the operator given
/// by its key (`">"`, `"greaterThan"`, `"contains"`, ...).
///
/// Fails with [`CompileError::UnsupportedOperator`] for any other key.
pub fn compile_comparator(
    column: &str,
    key: &str,
    value: &Value,
    diagnostics: &dyn Diagnostics,
) -> CompileResult<String> {
    let op = key.parse::<ComparatorOp>()?;
    Ok(compile_op(column, op, value, diagnostics))
}

fn compile_op(
    column: &str,
    op: ComparatorOp,
    value: &Value,
    diagnostics: &dyn Diagnostics,
) -> String {
    let attr = escape_identifier(column);

    let symbol = match op {
        ComparatorOp::LessThan => "<",
        ComparatorOp::LessThanOrEqual => "<=",
        ComparatorOp::GreaterThan => ">",
        ComparatorOp::GreaterThanOrEqual => ">=",
        ComparatorOp::Not => {
            return match value {
                Value::Null => format!("{} IS NOT NULL", attr),
                Value::Array(items) => {
                    format!("{} NOT IN ({})", attr, value_list_or_null(items, diagnostics))
                }
                _ => format!("{}<>{}", attr, compile_value(value, diagnostics)),
            };
        }
        ComparatorOp::Like
        | ComparatorOp::Contains
        | ComparatorOp::StartsWith
        | ComparatorOp::EndsWith => {
            let literal = compile_value(value, diagnostics);
            let naked = literal.trim_matches('\'');
            let pattern = match op {
                ComparatorOp::Contains => format!("%{}%", naked),
                ComparatorOp::StartsWith => format!("{}%", naked),
                ComparatorOp::EndsWith => format!("%{}", naked),
                _ => naked.to_string(),
            };
            return format!("{} LIKE '{}'", attr, pattern);
        }
    };

    format!("{}{}{}", attr, symbol, compile_value(value, diagnostics))
}

/// Compile an equality leaf: `[col]=value`, or `[col] IS NULL`.
pub fn compile_criterion(column: &str, value: &Value, diagnostics: &dyn Diagnostics) -> String {
    let attr = escape_identifier(column);
    match value {
        Value::Null => format!("{} IS NULL", attr),
        v => format!("{}={}", attr, compile_value(v, diagnostics)),
    }
}

/// Compile `[col] IN (...)`. An empty list becomes `IN (NULL)`, which
/// matches nothing.
pub fn compile_in_list(column: &str, values: &[Value], diagnostics: &dyn Diagnostics) -> String {
    format!(
        "{} IN ({})",
        escape_identifier(column),
        value_list_or_null(values, diagnostics)
    )
}

fn value_list_or_null(values: &[Value], diagnostics: &dyn Diagnostics) -> String {
    if values.is_empty() {
        return "NULL".to_string();
    }
    values
        .iter()
        .map(|v| compile_value(v, diagnostics))
        .collect::<Vec<_>>()
        .join(", ")
}

fn compile_like(
    entries: &[(String, Value)],
    diagnostics: &dyn Diagnostics,
) -> CompileResult<String> {
    let parts = entries
        .iter()
        .map(|(column, value)| {
            if let Value::Regex(pattern) = value {
                return Err(CompileError::UnsupportedValueType(format!(
                    "RegExp not supported in LIKE on [{}]: /{}/",
                    column, pattern
                )));
            }
            let literal = compile_value(value, diagnostics).replace(ESCAPED_PERCENT, "\\%");
            Ok(format!("{} LIKE {}", escape_identifier(column), literal))
        })
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(parts.join(" AND "))
}

/// Normalize and escape a single value.
pub fn compile_value(value: &Value, diagnostics: &dyn Diagnostics) -> String {
    escape_literal(&normalize_value(value.clone(), diagnostics))
}

/// Compile the assignments of an UPDATE.
///
/// Entries compile as criteria (comparator objects included) joined with
/// `, `. Every ` IS NULL` in the result is then rewritten to `=NULL`; the
/// rewrite is textual and also touches string literals containing it.
pub fn compile_update_criteria(
    values: &[(String, Value)],
    diagnostics: &dyn Diagnostics,
) -> CompileResult<String> {
    let sql = build_csv(values, ", ", |column, value| match comparator_tests(value)? {
        Some(tests) => Ok(compile_comparators(column, &tests, diagnostics)),
        None => Ok(compile_criterion(column, value, diagnostics)),
    })?;
    Ok(sql.replace(" IS NULL", "=NULL"))
}
