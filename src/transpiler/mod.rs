//! SQL Server transpiler for criteria.
//!
//! Converts typed criteria and attribute definitions into T-SQL strings.

pub mod conditions;
pub mod ddl;
pub mod dml;
pub mod escape;
pub mod normalize;
pub mod types;

use std::sync::Arc;

use crate::ast::*;
use crate::config::CompilerConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::CompileResult;

pub use escape::{escape_identifier, escape_literal, to_sql_date};
pub use normalize::normalize_value;
pub use types::{map_type, normalize_schema};

/// Trait for converting nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

impl ToSql for Value {
    fn to_sql(&self) -> String {
        escape_literal(self)
    }
}

impl ToSql for SortDirection {
    fn to_sql(&self) -> String {
        self.as_sql().to_string()
    }
}

/// Join the compiled entries of an ordered mapping with `separator`.
///
/// `compile` is called once per entry with its key and value.
pub fn build_csv<T, F>(
    entries: &[(String, T)],
    separator: &str,
    mut compile: F,
) -> CompileResult<String>
where
    F: FnMut(&str, &T) -> CompileResult<String>,
{
    let parts = entries
        .iter()
        .map(|(key, value)| compile(key, value))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(parts.join(separator))
}

/// Statement compiler for the bracket-quoted SQL Server dialect.
///
/// Holds dialect conventions and the diagnostics sink; compiling never
/// mutates it, so one instance can be shared across threads.
///
/// # Example
///
/// ```
/// use tsql_criteria::prelude::*;
///
/// let criteria = parse_criteria_json(r#"{ "where": { "age": { ">": 30 } }, "sort": "-age" }"#).unwrap();
/// let sql = Compiler::default().compile_select(&criteria, "users").unwrap();
/// assert_eq!(sql, "SELECT * FROM [users] WHERE [age]>30 ORDER BY [age] DESC");
/// ```
#[derive(Clone)]
pub struct Compiler {
    config: CompilerConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Compiler {
    /// Compiler reporting diagnostics through `tracing`.
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// `SELECT ...` for `criteria` against `table`.
    pub fn compile_select(&self, criteria: &Criteria, table: &str) -> CompileResult<String> {
        let sql = dml::select::build_select(self, criteria, table)?;
        tracing::debug!(table, sql = %sql, "compiled select");
        Ok(sql)
    }

    /// Insert one row into `[schema].[table]`, capturing its generated id.
    pub fn compile_insert(
        &self,
        table: &str,
        schema: &str,
        data: &[(String, Value)],
    ) -> CompileResult<String> {
        let sql = dml::insert::build_insert(self, table, schema, data)?;
        tracing::debug!(table, sql = %sql, "compiled insert");
        Ok(sql)
    }

    /// `UPDATE [table] SET ...` restricted by `criteria`.
    pub fn compile_update(
        &self,
        table: &str,
        values: &[(String, Value)],
        criteria: &Criteria,
    ) -> CompileResult<String> {
        let sql = dml::update::build_update(self, table, values, criteria)?;
        tracing::debug!(table, sql = %sql, "compiled update");
        Ok(sql)
    }

    /// `DELETE FROM [table]` restricted by `criteria`.
    pub fn compile_delete(&self, table: &str, criteria: &Criteria) -> CompileResult<String> {
        let sql = dml::delete::build_delete(self, table, criteria)?;
        tracing::debug!(table, sql = %sql, "compiled delete");
        Ok(sql)
    }

    /// Boolean expression for a WHERE mapping.
    pub fn compile_where(&self, filter: &Where) -> CompileResult<String> {
        conditions::compile_where(filter, self.diagnostics())
    }

    /// SET-clause assignments; ` IS NULL` is rewritten to `=NULL`.
    pub fn compile_update_criteria(&self, values: &[(String, Value)]) -> CompileResult<String> {
        conditions::compile_update_criteria(values, self.diagnostics())
    }

    pub fn compile_add_column(&self, table: &str, attr: &str, def: &AttributeDef) -> String {
        ddl::build_add_column(self, table, attr, def)
    }

    pub fn compile_drop_column(&self, table: &str, attr: &str) -> String {
        ddl::build_drop_column(table, attr)
    }

    pub fn compile_create_table(
        &self,
        table: &str,
        attributes: &[(String, AttributeDef)],
    ) -> CompileResult<String> {
        ddl::build_create_table(self, table, attributes)
    }

    pub fn compile_drop_table(&self, table: &str) -> String {
        ddl::build_drop_table(table)
    }

    /// Single column definition, e.g. `[id] INT IDENTITY PRIMARY KEY`.
    pub fn compile_column_definition(&self, attr: &str, def: &AttributeDef) -> String {
        ddl::column_definition(self, attr, def)
    }

    /// Comma-separated column definitions for DDL.
    pub fn compile_column_definition_list(
        &self,
        attributes: &[(String, AttributeDef)],
    ) -> CompileResult<String> {
        build_csv(attributes, ", ", |attr, def| Ok(ddl::column_definition(self, attr, def)))
    }

    /// Comma-separated bracketed attribute names.
    pub fn compile_attribute_list<T>(&self, entries: &[(String, T)]) -> CompileResult<String> {
        build_csv(entries, ", ", |attr, _| Ok(escape_identifier(attr)))
    }

    /// Comma-separated normalized, escaped values.
    pub fn compile_value_list(&self, data: &[(String, Value)]) -> CompileResult<String> {
        build_csv(data, ", ", |_, value| Ok(conditions::compile_value(value, self.diagnostics())))
    }

    /// Physical column type for an abstract type.
    pub fn map_type(&self, attr_type: &str, size: Option<u32>) -> String {
        types::map_type(attr_type, size, self.diagnostics())
    }

    /// Normalize a raw value for storage.
    pub fn normalize_value(&self, value: Value) -> Value {
        normalize::normalize_value(value, self.diagnostics())
    }
}

#[cfg(test)]
mod tests;
