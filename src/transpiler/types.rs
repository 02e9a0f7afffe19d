//! Abstract attribute types to SQL Server column types, and back from
//! introspected column metadata.

use crate::ast::{AttrType, AttributeDef, Attributes, ColumnMetadata};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Physical type used for anything outside the known enumeration.
pub const FALLBACK_TYPE: &str = "VARCHAR";

/// Map an abstract type and optional size to a physical column type.
///
/// Unknown types report a [`Diagnostic::UnknownType`] and map to
/// [`FALLBACK_TYPE`].
pub fn map_type(attr_type: &str, size: Option<u32>, diagnostics: &dyn Diagnostics) -> String {
    let size = size.map_or_else(|| "MAX".to_string(), |n| n.to_string());

    match attr_type.parse::<AttrType>() {
        Ok(AttrType::Binary | AttrType::String) => format!("NVARCHAR({})", size),
        Ok(AttrType::Array | AttrType::Json | AttrType::Text) => format!("VARCHAR({})", size),
        Ok(AttrType::Boolean) => "BIT".to_string(),
        Ok(AttrType::Integer) => "INT".to_string(),
        Ok(AttrType::Float) => "FLOAT".to_string(),
        Ok(AttrType::Date) => "DATE".to_string(),
        Ok(AttrType::Time) => "TIME".to_string(),
        Ok(AttrType::DateTime) => "DATETIME2".to_string(),
        Err(type_name) => {
            diagnostics.report(Diagnostic::UnknownType {
                type_name,
                fallback: FALLBACK_TYPE.to_string(),
            });
            FALLBACK_TYPE.to_string()
        }
    }
}

/// Turn introspected column rows into an attribute mapping keyed by column
/// name. Flags are carried over as-is.
pub fn normalize_schema(rows: &[ColumnMetadata]) -> Attributes {
    rows.iter()
        .map(|row| {
            let def = AttributeDef {
                attr_type: row.type_name.clone(),
                size: None,
                primary_key: row.primary_key,
                unique: row.unique,
                auto_increment: row.auto_increment,
                nullable: row.nullable,
                indexed: row.indexed,
            };
            (row.column_name.clone(), def)
        })
        .collect()
}
