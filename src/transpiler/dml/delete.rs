//! DELETE SQL generation.

use crate::ast::Criteria;
use crate::error::CompileResult;
use crate::transpiler::dml::filter_clause;
use crate::transpiler::escape::escape_identifier;
use crate::transpiler::Compiler;

/// Generate DELETE SQL.
pub fn build_delete(
    compiler: &Compiler,
    table: &str,
    criteria: &Criteria,
) -> CompileResult<String> {
    let mut sql = String::from("DELETE FROM ");
    sql.push_str(&escape_identifier(table));
    sql.push_str(&filter_clause(criteria, compiler.diagnostics())?);
    Ok(sql)
}
