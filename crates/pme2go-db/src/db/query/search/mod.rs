//! Filtered, paginated search over a single table.
//!
//! [`build`] turns an untrusted [`QueryRequest`] into a parameterized data
//! query and a matching count query. Conditions and their bound values are
//! always appended together so `$n` numbering cannot drift; the only text that
//! reaches SQL verbatim comes from the static [`SearchSchema`] catalogs.

mod adjustment;
mod builder;
pub mod catalog;
mod execute;
mod request;
mod spec;


pub use adjustment::SearchAdjustment;
pub use builder::{BindValue, QueryResult, build};
pub use execute::{SearchPage, execute_search};
pub use request::{FilterValue, QueryRequest, SortOrder};
pub use spec::{FilterSpec, MatchMode, SearchSchema, SearchTarget, SortSpec, ValueType};
