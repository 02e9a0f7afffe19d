//! INSERT, UPDATE, DELETE and DDL compilation tests.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use super::criteria;
use crate::ast::{AttributeDef, Criteria, Value};
use crate::config::CompilerConfig;
use crate::diagnostics::{Diagnostic, Recorder};
use crate::error::CompileError;
use crate::transpiler::Compiler;

fn row(entries: &[(&str, Value)]) -> Vec<(String, Value)> {
    entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

// ============= INSERT =============

#[test]
fn test_insert_captures_identity() {
    let data = row(&[("name", Value::from("john")), ("age", Value::Int(30))]);
    let sql = Compiler::default().compile_insert("users", "dbo", &data).unwrap();
    assert_eq!(
        sql,
        "DECLARE @Inserted AS TABLE (id NVARCHAR(255)); \
         INSERT INTO [dbo].[users] ([name], [age]) OUTPUT INSERTED.[id] INTO @Inserted VALUES ('john', 30); \
         SELECT id FROM @Inserted"
    );
}

#[test]
fn test_insert_serializes_structured_values() {
    let data = row(&[
        ("tags", Value::from(vec!["a", "b"])),
        ("active", Value::Bool(false)),
        ("note", Value::Null),
    ]);
    let sql = Compiler::default().compile_insert("posts", "dbo", &data).unwrap();
    assert!(sql.contains(r#"VALUES ('["a","b"]', 0, NULL)"#), "{}", sql);
}

#[test]
fn test_insert_without_data_uses_defaults() {
    let sql = Compiler::default().compile_insert("users", "dbo", &[]).unwrap();
    assert_eq!(
        sql,
        "DECLARE @Inserted AS TABLE (id NVARCHAR(255)); \
         INSERT INTO [dbo].[users] OUTPUT INSERTED.[id] INTO @Inserted DEFAULT VALUES; \
         SELECT id FROM @Inserted"
    );
}

#[test]
fn test_insert_with_custom_capture() {
    let config = CompilerConfig::builder()
        .schema("app")
        .primary_key("uid")
        .capture("@Ids", "UNIQUEIDENTIFIER")
        .build();
    let compiler = Compiler::new(config);
    let sql = compiler
        .compile_insert("users", &compiler.config().schema, &row(&[("name", Value::from("a"))]))
        .unwrap();
    assert_eq!(
        sql,
        "DECLARE @Ids AS TABLE (uid UNIQUEIDENTIFIER); \
         INSERT INTO [app].[users] ([name]) OUTPUT INSERTED.[uid] INTO @Ids VALUES ('a'); \
         SELECT uid FROM @Ids"
    );
}

// ============= UPDATE =============

#[test]
fn test_update_sets_null() {
    let values = row(&[("name", Value::Null), ("age", Value::Int(3))]);
    let sql = Compiler::default()
        .compile_update("users", &values, &criteria(json!({ "where": { "id": 7 } })))
        .unwrap();
    assert_eq!(sql, "UPDATE [users] SET [name]=NULL, [age]=3 WHERE [id]=7");
}

#[test]
fn test_update_without_values_fails() {
    let err = Compiler::default()
        .compile_update("users", &[], &Criteria::new())
        .unwrap_err();
    assert!(matches!(err, CompileError::InvalidCriteria(_)));
}

#[test]
fn test_update_with_or_groups() {
    let values = row(&[("flag", Value::Bool(true))]);
    let sql = Compiler::default()
        .compile_update(
            "users",
            &values,
            &criteria(json!({ "where": { "a": 1 }, "or": [ { "b": 2 }, { "c": 3 } ] })),
        )
        .unwrap();
    assert_eq!(sql, "UPDATE [users] SET [flag]=1 WHERE [a]=1 AND ([b]=2 OR [c]=3)");
}

// ============= DELETE =============

#[test]
fn test_delete() {
    let sql = Compiler::default()
        .compile_delete("users", &criteria(json!({ "where": { "age": { "<": 18 } } })))
        .unwrap();
    assert_eq!(sql, "DELETE FROM [users] WHERE [age]<18");
}

#[test]
fn test_delete_everything() {
    let sql = Compiler::default().compile_delete("users", &Criteria::new()).unwrap();
    assert_eq!(sql, "DELETE FROM [users]");
}

// ============= DDL =============

#[test]
fn test_column_definitions() {
    let c = Compiler::default();
    assert_eq!(
        c.compile_column_definition("id", &AttributeDef::new("integer").primary_key()),
        "[id] INT IDENTITY PRIMARY KEY"
    );
    assert_eq!(
        c.compile_column_definition("code", &AttributeDef::new("string").primary_key()),
        "[code] VARCHAR(255) NOT NULL PRIMARY KEY"
    );
    assert_eq!(
        c.compile_column_definition("email", &AttributeDef::new("string").size(120).unique()),
        "[email] NVARCHAR(120) UNIQUE"
    );
    assert_eq!(
        c.compile_column_definition("bio", &AttributeDef::new("text").not_null()),
        "[bio] VARCHAR(MAX) NOT NULL"
    );
    assert_eq!(
        c.compile_column_definition("born", &AttributeDef::new("date")),
        "[born] DATE NULL"
    );
}

#[test]
fn test_create_table() {
    let attributes = vec![
        ("id".to_string(), AttributeDef::new("integer").primary_key()),
        ("name".to_string(), AttributeDef::new("string")),
        ("active".to_string(), AttributeDef::new("boolean")),
    ];
    let sql = Compiler::default().compile_create_table("users", &attributes).unwrap();
    assert_eq!(
        sql,
        "CREATE TABLE [users] ([id] INT IDENTITY PRIMARY KEY, [name] NVARCHAR(MAX) NULL, [active] BIT NULL)"
    );
}

#[test]
fn test_create_table_needs_attributes() {
    let err = Compiler::default().compile_create_table("users", &[]).unwrap_err();
    assert!(matches!(err, CompileError::InvalidCriteria(_)));
}

#[test]
fn test_alter_and_drop() {
    let c = Compiler::default();
    assert_eq!(
        c.compile_add_column("users", "age", &AttributeDef::new("integer")),
        "ALTER TABLE [users] ADD [age] INT NULL"
    );
    assert_eq!(c.compile_drop_column("users", "age"), "ALTER TABLE [users] DROP COLUMN [age]");
    assert_eq!(c.compile_drop_table("users"), "DROP TABLE [users]");
}

#[test]
fn test_unknown_type_is_reported() {
    let recorder = Arc::new(Recorder::new());
    let c = Compiler::default().with_diagnostics(recorder.clone());
    assert_eq!(
        c.compile_column_definition("mail", &AttributeDef::new("email")),
        "[mail] VARCHAR NULL"
    );
    assert_eq!(
        recorder.diagnostics(),
        vec![Diagnostic::UnknownType {
            type_name: "email".to_string(),
            fallback: "VARCHAR".to_string(),
        }]
    );
}
