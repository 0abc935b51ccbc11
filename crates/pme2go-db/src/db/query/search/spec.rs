use super::builder::{QueryResult, build};
use super::request::QueryRequest;

/// How a filter value is compared against its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `column = $n`
    Exact,
    /// `LOWER(column) LIKE $n` with a `%value%` pattern.
    SubstringCaseInsensitive,
    /// `column ? $n` for each value, OR-ed. The column is a JSONB array.
    ArrayContainsAny,
}

/// Shape a filter value must have to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    StringList,
    /// A single string drawn from a closed set.
    Enum(&'static [&'static str]),
}

/// One supported, named search filter and the column it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub field: &'static str,
    pub column: &'static str,
    pub match_mode: MatchMode,
    pub value_type: ValueType,
}

impl FilterSpec {
    #[must_use]
    pub const fn exact(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            match_mode: MatchMode::Exact,
            value_type: ValueType::String,
        }
    }

    #[must_use]
    pub const fn one_of(
        field: &'static str,
        column: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            column,
            match_mode: MatchMode::Exact,
            value_type: ValueType::Enum(allowed),
        }
    }

    #[must_use]
    pub const fn substring(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            match_mode: MatchMode::SubstringCaseInsensitive,
            value_type: ValueType::String,
        }
    }

    #[must_use]
    pub const fn contains_any(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            match_mode: MatchMode::ArrayContainsAny,
            value_type: ValueType::StringList,
        }
    }

    /// Whether callers supply several values for this filter.
    #[must_use]
    pub const fn is_multi_valued(&self) -> bool {
        matches!(self.value_type, ValueType::StringList)
    }
}

/// An allow-listed sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub column: &'static str,
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self { field, column }
    }
}

/// The table a search runs against and its fixed SQL vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTarget {
    pub table: &'static str,
    pub select_list: &'static str,
    /// Compared as text against the excluded identity.
    pub id_column: &'static str,
    pub free_text_columns: &'static [&'static str],
    /// Column ranked on by relevance ordering.
    pub primary_text_column: &'static str,
    /// Secondary key of relevance ordering, most recent first.
    pub recency_column: &'static str,
    /// Sort field used when no valid sort is requested and no free text is given.
    pub default_sort_field: &'static str,
}

/// A complete, static search catalog: target plus filter and sort allow-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSchema {
    pub target: SearchTarget,
    pub filters: &'static [FilterSpec],
    pub sorts: &'static [SortSpec],
}

impl SearchSchema {
    #[must_use]
    pub fn filter(&self, field: &str) -> Option<&'static FilterSpec> {
        self.filters.iter().find(|spec| spec.field == field)
    }

    /// ## Summary
    /// Builds the data and count queries for `request` against this catalog.
    #[must_use]
    pub fn build(&self, request: &QueryRequest) -> QueryResult {
        build(request, &self.target, self.filters, self.sorts)
    }
}
