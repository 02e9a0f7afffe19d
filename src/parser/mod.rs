//! Criteria parser.
//!
//! Turns a raw criteria [`Value`] (typically decoded from JSON) into the typed
//! [`Criteria`] / [`Where`] tree. Shape sniffing happens here, once; the
//! compiler only ever sees tagged predicates.
//!
//! # Where entries
//!
//! ```text
//! { "age": { ">": 30 } }          comparator object
//! { "or": [ {...}, {...} ] }      OR group
//! { "and": [ {...}, {...} ] }     AND group
//! { "id": [1, 2, 3] }             IN list
//! { "like": { "name": "jo%" } }   LIKE
//! { "name": "john" }              equality
//! ```

pub mod sort;

use crate::ast::*;
use crate::error::{CompileError, CompileResult};

pub use sort::parse_sort_expr;

/// Parse a criteria object.
///
/// # Example
///
/// ```
/// use tsql_criteria::ast::Value;
/// use tsql_criteria::parser::parse_criteria;
///
/// let raw = Value::from(serde_json::json!({ "where": { "age": 30 }, "limit": 10 }));
/// let criteria = parse_criteria(&raw).unwrap();
/// assert_eq!(criteria.limit, Some(10));
/// ```
pub fn parse_criteria(input: &Value) -> CompileResult<Criteria> {
    let entries = input
        .as_object()
        .ok_or_else(|| {
            CompileError::invalid(format!("criteria must be an object, got {}", input.kind()))
        })?;

    let mut criteria = Criteria::default();

    for (key, value) in entries {
        match key.as_str() {
            "where" => {
                if !value.is_null() {
                    criteria.filter = Some(parse_where(value)?);
                }
            }
            "or" => {
                // Only a non-empty list is honoured at the top level.
                if matches!(value, Value::Array(items) if !items.is_empty()) {
                    criteria.or = parse_groups(key, value)?;
                }
            }
            "sort" => criteria.sort = parse_sort(value)?,
            "skip" => criteria.skip = value.as_count(),
            "limit" => criteria.limit = value.as_count(),
            "select" => criteria.select = column_list(value),
            "groupBy" => criteria.group_by = column_list(value),
            "sum" => criteria.sum = column_list(value),
            "average" => criteria.average = column_list(value),
            "max" => criteria.max = column_list(value),
            "min" => criteria.min = column_list(value),
            _ => {}
        }
    }

    Ok(criteria)
}

/// Parse a criteria object from JSON text.
pub fn parse_criteria_json(input: &str) -> CompileResult<Criteria> {
    let json: serde_json::Value = serde_json::from_str(input)
        .map_err(|e| CompileError::invalid(format!("criteria is not valid JSON: {}", e)))?;
    parse_criteria(&Value::from(json))
}

/// Parse a WHERE mapping.
pub fn parse_where(input: &Value) -> CompileResult<Where> {
    let entries = input
        .as_object()
        .ok_or_else(|| {
            CompileError::invalid(format!("where must be an object, got {}", input.kind()))
        })?;

    let mut predicates = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        predicates.push(parse_predicate(key, value)?);
    }
    Ok(Where(predicates))
}

fn parse_predicate(key: &str, value: &Value) -> CompileResult<Predicate> {
    if let Some(tests) = comparator_tests(value)? {
        return Ok(Predicate::Comparator {
            column: key.to_string(),
            tests,
        });
    }

    let lowered = key.to_ascii_lowercase();

    if lowered == "or" {
        Ok(Predicate::Or(parse_groups(key, value)?))
    } else if lowered == "and" {
        Ok(Predicate::And(parse_groups(key, value)?))
    } else if let Value::Array(items) = value {
        Ok(Predicate::InList {
            column: key.to_string(),
            values: items.clone(),
        })
    } else if lowered == "like" {
        let entries = value
            .as_object()
            .ok_or_else(|| CompileError::invalid("`like` must map attributes to patterns"))?;
        Ok(Predicate::Like(entries.to_vec()))
    } else if lowered == "not" {
        Err(CompileError::UnsupportedOperator("NOT not supported yet".to_string()))
    } else {
        Ok(Predicate::Equality {
            column: key.to_string(),
            value: value.clone(),
        })
    }
}

/// Comparator tests of a comparator object, or `None` when `value` is not one.
///
/// An object counts as a comparator object as soon as one key is a known
/// operator; every other key on it is then an unknown comparator.
pub fn comparator_tests(value: &Value) -> CompileResult<Option<Vec<(ComparatorOp, Value)>>> {
    let Some(entries) = value.as_object() else {
        return Ok(None);
    };
    if !entries.iter().any(|(k, _)| ComparatorOp::is_key(k)) {
        return Ok(None);
    }

    let mut tests = Vec::with_capacity(entries.len());
    for (key, v) in entries {
        tests.push((key.parse::<ComparatorOp>()?, v.clone()));
    }
    Ok(Some(tests))
}

fn parse_groups(key: &str, value: &Value) -> CompileResult<Vec<Where>> {
    let members: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(entries) => entries.iter().map(|(_, v)| v).collect(),
        other => {
            return Err(CompileError::invalid(format!(
                "`{}` must be a list of criteria, got {}",
                key,
                other.kind()
            )));
        }
    };
    if members.is_empty() {
        return Err(CompileError::invalid(format!("`{}` needs at least one criteria", key)));
    }
    members.into_iter().map(parse_where).collect()
}

fn parse_sort(value: &Value) -> CompileResult<Option<Sort>> {
    match value {
        Value::String(expr) if !expr.trim().is_empty() => Ok(Some(Sort::Expr(expr.clone()))),
        Value::Object(entries) => {
            let mut columns = Vec::with_capacity(entries.len());
            for (column, v) in entries {
                let descending_value = match v {
                    Value::Null | Value::Bool(false) => continue,
                    Value::Int(n) => *n <= 0,
                    Value::Float(n) => *n <= 0.0,
                    Value::String(s) => s.eq_ignore_ascii_case("desc"),
                    _ => false,
                };
                let (name, dashed) = match column.strip_prefix('-') {
                    Some(stripped) => (stripped, true),
                    None => (column.as_str(), false),
                };
                let direction = if dashed || descending_value {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                columns.push((name.to_string(), direction));
            }
            Ok((!columns.is_empty()).then_some(Sort::Columns(columns)))
        }
        Value::Null | Value::String(_) => Ok(None),
        other => Err(CompileError::invalid(format!(
            "sort must be a string or an object, got {}",
            other.kind()
        ))),
    }
}

/// A column name or list of column names.
fn column_list(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(|v| v.to_string()).collect(),
        other => vec![other.to_string()],
    }
}

/// Ordered attribute/value pairs of a row object (INSERT data, UPDATE values).
pub fn parse_values(input: &Value) -> CompileResult<Vec<(String, Value)>> {
    input
        .as_object()
        .map(|entries| entries.to_vec())
        .ok_or_else(|| {
            CompileError::invalid(format!("values must be an object, got {}", input.kind()))
        })
}

/// Parse an attribute mapping from JSON text, keeping declaration order.
///
/// Each entry is either a bare type name or a full definition object.
pub fn parse_attributes_json(input: &str) -> CompileResult<Attributes> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(input)
        .map_err(|e| CompileError::invalid(format!("attributes are not a JSON object: {}", e)))?;

    map.into_iter()
        .map(|(name, raw)| {
            let def = serde_json::from_value::<AttributeDef>(raw)
                .map_err(|e| CompileError::invalid(format!("attribute [{}]: {}", name, e)))?;
            Ok((name, def))
        })
        .collect()
}
