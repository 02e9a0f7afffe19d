//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `select`: SELECT columns, filters, ordering, pagination
//! - `statements`: INSERT, UPDATE, DELETE, DDL

mod select;
mod statements;

use crate::ast::{Criteria, Value};
use crate::parser::parse_criteria;
use crate::transpiler::Compiler;

/// Parse JSON criteria, panicking on malformed test input.
fn criteria(json: serde_json::Value) -> Criteria {
    parse_criteria(&Value::from(json)).unwrap()
}

fn select(json: serde_json::Value) -> String {
    Compiler::default().compile_select(&criteria(json), "users").unwrap()
}
