//! # tsql-criteria
//!
//! Compiles declarative query criteria into SQL Server (T-SQL) statements.
//!
//! Criteria arrive as plain data (usually JSON) and are parsed into a typed
//! tree once; the compiler turns that tree into bracket-quoted T-SQL with
//! inline literals.
//!
//! ## Quick Example
//!
//! ```
//! use tsql_criteria::prelude::*;
//!
//! let criteria = parse_criteria_json(r#"{
//!     "where": { "age": { ">": 30 }, "name": null },
//!     "sort": "-age",
//!     "limit": 10
//! }"#).unwrap();
//!
//! let sql = Compiler::default().compile_select(&criteria, "users").unwrap();
//! assert_eq!(sql, "SELECT TOP 10 * FROM [users] WHERE [age]>30 AND [name] IS NULL ORDER BY [age] DESC");
//! ```
//!
//! ## Where entries
//!
//! | Shape                           | SQL                         |
//! |---------------------------------|-----------------------------|
//! | `{ "a": 1 }`                    | `[a]=1`                     |
//! | `{ "a": null }`                 | `[a] IS NULL`               |
//! | `{ "a": [1, 2] }`               | `[a] IN (1, 2)`             |
//! | `{ "a": { ">": 1 } }`           | `[a]>1`                     |
//! | `{ "a": { "!": null } }`        | `[a] IS NOT NULL`           |
//! | `{ "a": { "contains": "x" } }`  | `[a] LIKE '%x%'`            |
//! | `{ "or": [ {...}, {...} ] }`    | `(... OR ...)`              |
//! | `{ "like": { "a": "x%" } }`     | `[a] LIKE 'x%'`             |

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::CompilerConfig;
    pub use crate::diagnostics::{Diagnostic, Diagnostics, Recorder, TracingDiagnostics};
    pub use crate::error::*;
    pub use crate::parser::{
        parse_attributes_json, parse_criteria, parse_criteria_json, parse_values, parse_where,
    };
    pub use crate::transpiler::{
        Compiler, ToSql, escape_identifier, escape_literal, map_type, normalize_schema,
        normalize_value, to_sql_date,
    };
}

/// Compile JSON criteria into a SELECT with the default compiler.
///
/// # Example
///
/// ```
/// let sql = tsql_criteria::select_sql("users", r#"{ "skip": 10, "limit": 5 }"#).unwrap();
/// assert_eq!(sql, "SELECT * FROM [users] ORDER BY @@IDENTITY OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY");
/// ```
pub fn select_sql(table: &str, criteria: &str) -> error::CompileResult<String> {
    let criteria = parser::parse_criteria_json(criteria)?;
    transpiler::Compiler::default().compile_select(&criteria, table)
}
