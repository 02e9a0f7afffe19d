//! INSERT SQL generation.
//!
//! SQL Server has no `RETURNING`; the generated id is captured through
//! `OUTPUT INSERTED.<pk>` into a table variable and selected back out:
//!
//! ```text
//! DECLARE @Inserted AS TABLE (id NVARCHAR(255));
//! INSERT INTO [dbo].[users] ([name]) OUTPUT INSERTED.[id] INTO @Inserted VALUES ('john');
//! SELECT id FROM @Inserted
//! ```

use crate::ast::Value;
use crate::error::CompileResult;
use crate::transpiler::escape::escape_identifier;
use crate::transpiler::Compiler;

/// Generate INSERT SQL for one row.
pub fn build_insert(
    compiler: &Compiler,
    table: &str,
    schema: &str,
    data: &[(String, Value)],
) -> CompileResult<String> {
    let config = compiler.config();
    let capture = &config.capture_table;
    let pk = &config.primary_key;

    let mut sql = format!(
        "DECLARE {} AS TABLE ({} {}); ",
        capture, pk, config.capture_type
    );

    sql.push_str("INSERT INTO ");
    sql.push_str(&escape_identifier(schema));
    sql.push('.');
    sql.push_str(&escape_identifier(table));

    let output = format!("OUTPUT INSERTED.{} INTO {}", escape_identifier(pk), capture);

    if data.is_empty() {
        sql.push_str(&format!(" {} DEFAULT VALUES", output));
    } else {
        sql.push_str(&format!(
            " ({}) {} VALUES ({})",
            compiler.compile_attribute_list(data)?,
            output,
            compiler.compile_value_list(data)?
        ));
    }

    sql.push_str(&format!("; SELECT {} FROM {}", pk, capture));

    Ok(sql)
}
