//! DDL (Data Definition Language) SQL generation.

use crate::ast::AttributeDef;
use crate::error::{CompileError, CompileResult};
use crate::transpiler::escape::escape_identifier;
use crate::transpiler::Compiler;

/// Column definition for CREATE TABLE / ALTER TABLE ADD.
///
/// An integer primary key becomes an identity column; any other primary key
/// is stored as `VARCHAR(255) NOT NULL`.
pub fn column_definition(compiler: &Compiler, attr: &str, def: &AttributeDef) -> String {
    let name = escape_identifier(attr);
    let col_type = compiler.map_type(&def.attr_type, def.size);

    if def.is_primary_key() {
        if col_type == "INT" {
            return format!("{} INT IDENTITY PRIMARY KEY", name);
        }
        return format!("{} VARCHAR(255) NOT NULL PRIMARY KEY", name);
    }

    if def.is_unique() {
        return format!("{} {} UNIQUE", name, col_type);
    }

    if def.nullable == Some(false) {
        return format!("{} {} NOT NULL", name, col_type);
    }

    format!("{} {} NULL", name, col_type)
}

/// Generate CREATE TABLE SQL.
pub fn build_create_table(
    compiler: &Compiler,
    table: &str,
    attributes: &[(String, AttributeDef)],
) -> CompileResult<String> {
    if attributes.is_empty() {
        return Err(CompileError::invalid(format!(
            "CREATE TABLE {} needs at least one attribute",
            escape_identifier(table)
        )));
    }

    Ok(format!(
        "CREATE TABLE {} ({})",
        escape_identifier(table),
        compiler.compile_column_definition_list(attributes)?
    ))
}

/// Generate DROP TABLE SQL.
pub fn build_drop_table(table: &str) -> String {
    format!("DROP TABLE {}", escape_identifier(table))
}

/// Generate ALTER TABLE ... ADD SQL.
pub fn build_add_column(
    compiler: &Compiler,
    table: &str,
    attr: &str,
    def: &AttributeDef,
) -> String {
    format!(
        "ALTER TABLE {} ADD {}",
        escape_identifier(table),
        column_definition(compiler, attr, def)
    )
}

/// Generate ALTER TABLE ... DROP COLUMN SQL.
pub fn build_drop_column(table: &str, attr: &str) -> String {
    format!(
        "ALTER TABLE {} DROP COLUMN {}",
        escape_identifier(table),
        escape_identifier(attr)
    )
}
