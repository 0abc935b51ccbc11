use thiserror::Error;

/// A non-fatal correction applied to search input.
///
/// None of these abort a search; they are reported alongside the built query
/// so callers can log or surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchAdjustment {
    #[error("unsupported sort field `{0}`, using default ordering")]
    InvalidSortField(String),

    #[error("{parameter} {requested} out of range, using {applied}")]
    InvalidPagination {
        parameter: &'static str,
        requested: i64,
        applied: i64,
    },

    #[error("unknown filter field `{0}` ignored")]
    UnknownFilterField(String),

    #[error("malformed value for filter `{0}` ignored")]
    MalformedFilterValue(String),
}
