//! DML (Data Manipulation Language) SQL generation.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

use crate::ast::Criteria;
use crate::diagnostics::Diagnostics;
use crate::error::CompileResult;
use crate::transpiler::conditions::{compile_or_groups, compile_where};

/// WHERE clause plus the top-level OR group, with a leading space, or an
/// empty string when the criteria do not filter.
///
/// The OR group is always appended as ` AND (...)`, even without a WHERE.
pub(crate) fn filter_clause(
    criteria: &Criteria,
    diagnostics: &dyn Diagnostics,
) -> CompileResult<String> {
    let mut sql = String::new();

    if let Some(filter) = criteria.filter.as_ref().filter(|f| !f.is_empty()) {
        sql.push_str(" WHERE ");
        sql.push_str(&compile_where(filter, diagnostics)?);
    }

    if !criteria.or.is_empty() {
        sql.push_str(" AND ");
        sql.push_str(&compile_or_groups(&criteria.or, diagnostics)?);
    }

    Ok(sql)
}
