//! Sort-string grammar.
//!
//! ```text
//! -created_at        created_at DESC
//! name               name ASC
//! name asc           name ASC
//! name DESC          name DESC
//! ```

use nom::{
    bytes::complete::take_till1,
    character::complete::{char, multispace0},
    combinator::opt,
    IResult,
};

use crate::ast::SortDirection;
use crate::error::{CompileError, CompileResult};

/// Parse a string sort spec into its column and direction.
///
/// A leading `-` always sorts descending. Otherwise a missing or `ASC`
/// (any case) second word sorts ascending and any other word descending.
/// Words after the second are ignored.
pub fn parse_sort_expr(input: &str) -> CompileResult<(String, SortDirection)> {
    match sort_expr(input) {
        Ok((_, (dash, column, word))) => {
            let direction = if dash.is_some() {
                SortDirection::Desc
            } else {
                match word {
                    None => SortDirection::Asc,
                    Some(w) if w.eq_ignore_ascii_case("ASC") => SortDirection::Asc,
                    Some(_) => SortDirection::Desc,
                }
            };
            Ok((column.to_string(), direction))
        }
        Err(e) => Err(CompileError::invalid(format!(
            "Bad sort expression '{}': {:?}",
            input, e
        ))),
    }
}

fn sort_expr(input: &str) -> IResult<&str, (Option<char>, &str, Option<&str>)> {
    let (input, _) = multispace0(input)?;
    let (input, dash) = opt(char('-'))(input)?;
    let (input, column) = take_till1(|c: char| c.is_whitespace())(input)?;
    let (input, _) = multispace0(input)?;
    let (input, word) = opt(take_till1(|c: char| c.is_whitespace()))(input)?;
    Ok((input, (dash, column, word)))
}
