use std::str::FromStr;

use crate::ast::Value;
use crate::error::CompileError;

/// Sub-attribute comparator operators.
///
/// Each variant accepts both its word and its symbol spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorOp {
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Not,
    Like,
    Contains,
    StartsWith,
    EndsWith,
}

impl ComparatorOp {
    /// Every key that marks an object as a comparator object.
    pub const KEYS: [&'static str; 14] = [
        "<",
        "lessThan",
        "<=",
        "lessThanOrEqual",
        ">",
        "greaterThan",
        ">=",
        "greaterThanOrEqual",
        "!",
        "not",
        "like",
        "contains",
        "startsWith",
        "endsWith",
    ];

    pub fn is_key(key: &str) -> bool {
        Self::KEYS.contains(&key)
    }
}

impl FromStr for ComparatorOp {
    type Err = CompileError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "<" | "lessThan" => Ok(ComparatorOp::LessThan),
            "<=" | "lessThanOrEqual" => Ok(ComparatorOp::LessThanOrEqual),
            ">" | "greaterThan" => Ok(ComparatorOp::GreaterThan),
            ">=" | "greaterThanOrEqual" => Ok(ComparatorOp::GreaterThanOrEqual),
            "!" | "not" => Ok(ComparatorOp::Not),
            "like" => Ok(ComparatorOp::Like),
            "contains" => Ok(ComparatorOp::Contains),
            "startsWith" => Ok(ComparatorOp::StartsWith),
            "endsWith" => Ok(ComparatorOp::EndsWith),
            other => Err(CompileError::unknown_comparator(other)),
        }
    }
}

/// A single node of a WHERE tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column = value`, or `column IS NULL` for null
    Equality { column: String, value: Value },
    /// Comparator object applied to its parent column
    Comparator {
        column: String,
        tests: Vec<(ComparatorOp, Value)>,
    },
    /// `column IN (...)`
    InList { column: String, values: Vec<Value> },
    /// Sub-wheres joined with AND
    And(Vec<Where>),
    /// Sub-wheres joined with OR
    Or(Vec<Where>),
    /// `column LIKE pattern` for each entry
    Like(Vec<(String, Value)>),
}

/// A WHERE mapping: predicates implicitly joined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where(pub Vec<Predicate>);

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.0
    }

    /// Add an equality test.
    pub fn equals(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push(Predicate::Equality {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Add a single comparator test.
    pub fn compare(
        mut self,
        column: impl Into<String>,
        op: ComparatorOp,
        value: impl Into<Value>,
    ) -> Self {
        self.0.push(Predicate::Comparator {
            column: column.into(),
            tests: vec![(op, value.into())],
        });
        self
    }

    /// Add an IN list.
    pub fn is_in<V: Into<Value>>(mut self, column: impl Into<String>, values: Vec<V>) -> Self {
        self.0.push(Predicate::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add a LIKE test.
    pub fn like(mut self, column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        self.0.push(Predicate::Like(vec![(column.into(), pattern.into())]));
        self
    }

    /// Add an OR group.
    pub fn or(mut self, groups: Vec<Where>) -> Self {
        self.0.push(Predicate::Or(groups));
        self
    }

    /// Add an AND group.
    pub fn and(mut self, groups: Vec<Where>) -> Self {
        self.0.push(Predicate::And(groups));
        self
    }
}
