//! UPDATE SQL generation.

use crate::ast::{Criteria, Value};
use crate::error::{CompileError, CompileResult};
use crate::transpiler::conditions::compile_update_criteria;
use crate::transpiler::dml::filter_clause;
use crate::transpiler::escape::escape_identifier;
use crate::transpiler::Compiler;

/// Generate UPDATE SQL.
pub fn build_update(
    compiler: &Compiler,
    table: &str,
    values: &[(String, Value)],
    criteria: &Criteria,
) -> CompileResult<String> {
    if values.is_empty() {
        return Err(CompileError::invalid("UPDATE needs at least one value"));
    }

    let mut sql = String::from("UPDATE ");
    sql.push_str(&escape_identifier(table));

    // SET clause
    sql.push_str(" SET ");
    sql.push_str(&compile_update_criteria(values, compiler.diagnostics())?);

    // WHERE clause
    sql.push_str(&filter_clause(criteria, compiler.diagnostics())?);

    Ok(sql)
}
