use crate::ast::Where;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A sort specification.
#[derive(Debug, Clone, PartialEq)]
pub enum Sort {
    /// String form, e.g. `-age` or `name DESC`
    Expr(String),
    /// Mapping form, one entry per column
    Columns(Vec<(String, SortDirection)>),
}

impl Sort {
    pub fn is_empty(&self) -> bool {
        match self {
            Sort::Expr(expr) => expr.trim().is_empty(),
            Sort::Columns(cols) => cols.is_empty(),
        }
    }
}

/// A full query description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub filter: Option<Where>,
    /// Top-level `or` groups, ANDed onto the filter
    pub or: Vec<Where>,
    pub sort: Option<Sort>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub select: Vec<String>,
    pub group_by: Vec<String>,
    pub sum: Vec<String>,
    pub average: Vec<String>,
    pub max: Vec<String>,
    pub min: Vec<String>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn or(mut self, groups: Vec<Where>) -> Self {
        self.or = groups;
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn select<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.select = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn group_by<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.group_by = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn sum<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.sum = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn average<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.average = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn max<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.max = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn min<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.min = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Positive skip; zero behaves as if absent.
    pub fn offset(&self) -> Option<u64> {
        self.skip.filter(|n| *n > 0)
    }

    /// Positive limit; zero behaves as if absent.
    pub fn row_limit(&self) -> Option<u64> {
        self.limit.filter(|n| *n > 0)
    }

    pub fn has_aggregates(&self) -> bool {
        !(self.sum.is_empty()
            && self.average.is_empty()
            && self.max.is_empty()
            && self.min.is_empty())
    }
}
