//! SELECT SQL generation.

use crate::ast::*;
use crate::error::CompileResult;
use crate::parser::parse_sort_expr;
use crate::transpiler::dml::filter_clause;
use crate::transpiler::escape::escape_identifier;
use crate::transpiler::{Compiler, ToSql};

/// Generate SELECT SQL.
pub fn build_select(
    compiler: &Compiler,
    criteria: &Criteria,
    table: &str,
) -> CompileResult<String> {
    let offset = criteria.offset();
    let limit = criteria.row_limit();

    let mut sql = String::from("SELECT ");

    // TOP only without a skip; paging goes through OFFSET/FETCH
    if let (Some(n), None) = (limit, offset) {
        sql.push_str(&format!("TOP {} ", n));
    }

    sql.push_str(&column_list(criteria));

    // FROM
    sql.push_str(" FROM ");
    sql.push_str(&escape_identifier(table));

    // WHERE + OR group
    sql.push_str(&filter_clause(criteria, compiler.diagnostics())?);

    // GROUP BY
    if !criteria.group_by.is_empty() {
        let cols: Vec<String> = criteria.group_by.iter().map(|c| escape_identifier(c)).collect();
        sql.push_str(" GROUP BY ");
        sql.push_str(&cols.join(", "));
    }

    // ORDER BY
    let order_by = match &criteria.sort {
        Some(sort) if !sort.is_empty() => Some(order_by(sort)?),
        _ => None,
    };
    match (&order_by, offset) {
        (Some(order), _) => {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }
        // OFFSET needs an ORDER BY
        (None, Some(_)) => {
            sql.push_str(" ORDER BY ");
            sql.push_str(&compiler.config().fallback_order_by);
        }
        (None, None) => {}
    }

    // OFFSET / FETCH
    if let Some(skip) = offset {
        sql.push_str(&format!(" OFFSET {} ROWS", skip));
        if let Some(n) = limit {
            sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", n));
        }
    }

    Ok(sql)
}

/// Select list: explicit columns, then unselected GROUP BY columns, then
/// aggregates. `*` when there is none of them.
fn column_list(criteria: &Criteria) -> String {
    let mut cols: Vec<String> = criteria.select.iter().map(|c| escape_identifier(c)).collect();

    for col in &criteria.group_by {
        if !criteria.select.contains(col) {
            cols.push(escape_identifier(col));
        }
    }

    let aggregates: [(&[String], fn(&str) -> String); 4] = [
        (criteria.sum.as_slice(), |c| format!("SUM({})", c)),
        // AVG over an INT column is integer-valued without the cast
        (criteria.average.as_slice(), |c| format!("AVG(CAST({} AS FLOAT))", c)),
        (criteria.max.as_slice(), |c| format!("MAX({})", c)),
        (criteria.min.as_slice(), |c| format!("MIN({})", c)),
    ];
    for (columns, wrap) in aggregates {
        for col in columns {
            let ident = escape_identifier(col);
            cols.push(format!("{} AS {}", wrap(&ident), ident));
        }
    }

    if cols.is_empty() {
        "*".to_string()
    } else {
        cols.join(", ")
    }
}

fn order_by(sort: &Sort) -> CompileResult<String> {
    match sort {
        Sort::Expr(expr) => {
            let (column, direction) = parse_sort_expr(expr)?;
            Ok(format!("{} {}", escape_identifier(&column), direction.to_sql()))
        }
        Sort::Columns(columns) => Ok(columns
            .iter()
            .map(|(column, direction)| {
                format!("{} {}", escape_identifier(column), direction.to_sql())
            })
            .collect::<Vec<_>>()
            .join(", ")),
    }
}
