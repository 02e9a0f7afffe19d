//! SELECT compilation tests.

use pretty_assertions::assert_eq;
use serde_json::json;

use super::{criteria, select};
use crate::ast::Value;
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::parser::parse_criteria;
use crate::transpiler::Compiler;

#[test]
fn test_simple_select() {
    assert_eq!(select(json!({})), "SELECT * FROM [users]");
}

#[test]
fn test_comparator_in_where() {
    let sql = select(json!({ "where": { "age": { ">": 30 } } }));
    assert_eq!(sql, "SELECT * FROM [users] WHERE [age]>30");
}

#[test]
fn test_null_filter() {
    let sql = select(json!({ "where": { "name": null } }));
    assert_eq!(sql, "SELECT * FROM [users] WHERE [name] IS NULL");
}

#[test]
fn test_where_mixed() {
    let sql = select(json!({
        "where": {
            "active": true,
            "id": [1, 2, 3],
            "email": { "endsWith": "@example.com", "!": null }
        }
    }));
    assert_eq!(
        sql,
        "SELECT * FROM [users] WHERE [active]=1 AND [id] IN (1, 2, 3) \
         AND [email] LIKE '%@example.com' AND [email] IS NOT NULL"
    );
}

#[test]
fn test_empty_in_list_matches_nothing() {
    let sql = select(json!({ "where": { "id": [] } }));
    assert_eq!(sql, "SELECT * FROM [users] WHERE [id] IN (NULL)");
}

#[test]
fn test_nested_or_inside_where() {
    let sql = select(json!({
        "where": { "or": [ { "name": "a" }, { "age": { ">=": 18 }, "admin": false } ] }
    }));
    assert_eq!(
        sql,
        "SELECT * FROM [users] WHERE ([name]='a' OR [age]>=18 AND [admin]=0)"
    );
}

#[test]
fn test_and_group_inside_where() {
    let sql = select(json!({ "where": { "AND": [ { "a": 1 }, { "b": { "!": [] } } ] } }));
    assert_eq!(sql, "SELECT * FROM [users] WHERE ([a]=1 AND [b] NOT IN (NULL))");
}

#[test]
fn test_or_group_given_as_object() {
    let sql = select(json!({ "where": { "or": { "x": { "a": 1 }, "y": { "b": 2 } } } }));
    assert_eq!(sql, "SELECT * FROM [users] WHERE ([a]=1 OR [b]=2)");
}

#[test]
fn test_empty_group_fails() {
    let raw = Value::from(json!({ "where": { "or": [] } }));
    let err = parse_criteria(&raw).unwrap_err();
    assert!(matches!(err, CompileError::InvalidCriteria(_)));
}

#[test]
fn test_top_level_or_is_anded_onto_where() {
    let sql = select(json!({
        "where": { "active": true },
        "or": [ { "role": "admin" }, { "role": "mod" } ]
    }));
    assert_eq!(
        sql,
        "SELECT * FROM [users] WHERE [active]=1 AND ([role]='admin' OR [role]='mod')"
    );
}

#[test]
fn test_sort_string_desc() {
    let sql = select(json!({ "sort": "-age" }));
    assert_eq!(sql, "SELECT * FROM [users] ORDER BY [age] DESC");
}

#[test]
fn test_sort_string_default_asc() {
    assert_eq!(select(json!({ "sort": "name" })), "SELECT * FROM [users] ORDER BY [name] ASC");
    assert_eq!(
        select(json!({ "sort": "name DESC" })),
        "SELECT * FROM [users] ORDER BY [name] DESC"
    );
}

#[test]
fn test_sort_mapping() {
    let sql = select(json!({ "sort": { "name": 1, "age": -1 } }));
    assert_eq!(sql, "SELECT * FROM [users] ORDER BY [name] ASC, [age] DESC");
}

#[test]
fn test_limit_uses_top() {
    let sql = select(json!({ "limit": 10, "where": { "active": true } }));
    assert_eq!(sql, "SELECT TOP 10 * FROM [users] WHERE [active]=1");
}

#[test]
fn test_skip_without_sort_synthesizes_order() {
    let sql = select(json!({ "skip": 10, "limit": 5 }));
    assert_eq!(
        sql,
        "SELECT * FROM [users] ORDER BY @@IDENTITY OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY"
    );
}

#[test]
fn test_skip_with_sort() {
    let sql = select(json!({ "skip": 20, "sort": "-created" }));
    assert_eq!(sql, "SELECT * FROM [users] ORDER BY [created] DESC OFFSET 20 ROWS");
}

#[test]
fn test_zero_skip_keeps_top() {
    let sql = select(json!({ "skip": 0, "limit": 3 }));
    assert_eq!(sql, "SELECT TOP 3 * FROM [users]");
}

#[test]
fn test_fallback_order_is_configurable() {
    let compiler = Compiler::new(CompilerConfig::builder().fallback_order_by("[id]").build());
    let sql = compiler
        .compile_select(&criteria(json!({ "skip": 5 })), "users")
        .unwrap();
    assert_eq!(sql, "SELECT * FROM [users] ORDER BY [id] OFFSET 5 ROWS");
}

#[test]
fn test_select_columns() {
    let sql = select(json!({ "select": ["id", "email"] }));
    assert_eq!(sql, "SELECT [id], [email] FROM [users]");
}

#[test]
fn test_group_by_and_aggregates() {
    let sql = select(json!({
        "select": ["country"],
        "groupBy": ["country", "city"],
        "sum": "total",
        "average": ["age"],
        "max": "score",
        "min": "score"
    }));
    assert_eq!(
        sql,
        "SELECT [country], [city], SUM([total]) AS [total], AVG(CAST([age] AS FLOAT)) AS [age], \
         MAX([score]) AS [score], MIN([score]) AS [score] FROM [users] GROUP BY [country], [city]"
    );
}

#[test]
fn test_aggregate_only_has_no_star() {
    let sql = select(json!({ "sum": "total", "where": { "paid": true } }));
    assert_eq!(sql, "SELECT SUM([total]) AS [total] FROM [users] WHERE [paid]=1");
}

#[test]
fn test_like_group() {
    let sql = select(json!({ "where": { "like": { "name": "%john%", "note": "100%%%" } } }));
    assert_eq!(
        sql,
        "SELECT * FROM [users] WHERE [name] LIKE '%john%' AND [note] LIKE '100\\%'"
    );
}

#[test]
fn test_not_group_fails() {
    let err = parse_criteria(&Value::from(json!({ "where": { "not": { "a": 1 } } }))).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedOperator(_)));
}

#[test]
fn test_regex_like_fails() {
    let raw = Value::object([(
        "where",
        Value::object([("like", Value::object([("name", Value::Regex("^jo".into()))]))]),
    )]);
    let criteria = parse_criteria(&raw).unwrap();
    let err = Compiler::default().compile_select(&criteria, "users").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedValueType(_)));
}

#[test]
fn test_date_values_use_datetime2_text() {
    use chrono::{TimeZone, Utc};

    let date = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
    let raw = Value::object([(
        "where",
        Value::object([("created", Value::object([("<", Value::Date(date))]))]),
    )]);
    let sql = Compiler::default()
        .compile_select(&parse_criteria(&raw).unwrap(), "users")
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM [users] WHERE [created]<'2021-01-02T03:04:05.000000'"
    );
}
