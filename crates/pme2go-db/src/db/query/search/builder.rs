use pme2go_core::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

use super::adjustment::SearchAdjustment;
use super::request::{FilterValue, QueryRequest, SortOrder};
use super::spec::{FilterSpec, MatchMode, SearchTarget, SortSpec, ValueType};
use crate::db::query::text_match::{contains_pattern, contains_pattern_sql};

/// A value bound to a positional `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

/// Output of [`build`]: a data query, a count query and their bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub sql: String,
    /// Shares the WHERE clause of `sql`; binds `count_params()`.
    pub count_sql: String,
    /// Values for `sql`, in placeholder order. The last two are LIMIT and OFFSET.
    pub params: Vec<BindValue>,
    pub offset: i64,
    pub limit: i64,
    pub page: i64,
    pub adjustments: Vec<SearchAdjustment>,
}

impl QueryResult {
    /// The WHERE-clause values, i.e. `params` without LIMIT and OFFSET.
    #[must_use]
    pub fn count_params(&self) -> &[BindValue] {
        let end = self.params.len().saturating_sub(2);
        &self.params[..end]
    }
}

/// WHERE conditions and their bound values, appended together.
#[derive(Debug, Default)]
struct ConditionSet {
    conditions: Vec<String>,
    params: Vec<BindValue>,
}

impl ConditionSet {
    /// Numbers one placeholder per value, renders the condition from them and
    /// records both in a single step. Returns the placeholders used.
    fn push(
        &mut self,
        values: Vec<BindValue>,
        render: impl FnOnce(&[String]) -> String,
    ) -> Vec<String> {
        let first = self.params.len() + 1;
        let placeholders: Vec<String> = (first..first + values.len())
            .map(|index| format!("${index}"))
            .collect();

        self.conditions.push(render(&placeholders));
        self.params.extend(values);
        placeholders
    }

    fn where_clause(&self) -> Option<String> {
        (!self.conditions.is_empty()).then(|| format!("WHERE {}", self.conditions.join(" AND ")))
    }
}

/// ## Summary
/// Converts an untrusted search request into parameterized SQL.
///
/// Conditions are emitted in a fixed order: identity exclusion (always `$1`),
/// the free-text group, then filters in `filter_specs` order. Filter keys
/// without a matching `FilterSpec` are ignored; values of the wrong shape are ignored.
/// `limit` is clamped into `1..=50` and `page` below 1 becomes 1. Every
/// correction is recorded in [`QueryResult::adjustments`].
///
/// The free-text value is bound once and its placeholder reused across all
/// free-text columns and by relevance ordering.
#[must_use]
pub fn build(
    request: &QueryRequest,
    target: &SearchTarget,
    filter_specs: &[FilterSpec],
    sort_specs: &[SortSpec],
) -> QueryResult {
    let mut adjustments = Vec::new();
    let mut set = ConditionSet::default();

    set.push(vec![BindValue::Text(request.exclude_id.clone())], |p| {
        format!("{}::text <> {}", target.id_column, p[0])
    });

    let free_text = request
        .free_text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty());

    let free_text_placeholder = free_text.map(|text| {
        let placeholders = set.push(vec![BindValue::Text(contains_pattern(text))], |p| {
            let group = target
                .free_text_columns
                .iter()
                .map(|column| format!("LOWER({column}) LIKE {}", p[0]))
                .collect::<Vec<_>>()
                .join(" OR ");
            format!("({group})")
        });
        placeholders.concat()
    });

    for (field, value) in &request.filters {
        match filter_specs.iter().find(|spec| spec.field == field.as_str()) {
            Some(spec) => {
                if !is_applicable(spec, value) {
                    adjustments.push(SearchAdjustment::MalformedFilterValue(field.clone()));
                }
            }
            None => adjustments.push(SearchAdjustment::UnknownFilterField(field.clone())),
        }
    }

    for spec in filter_specs {
        if let Some(value) = request.filters.get(spec.field) {
            apply_filter(&mut set, spec, value);
        }
    }

    let order_by = order_clause(
        request,
        target,
        sort_specs,
        free_text_placeholder.as_deref(),
        &mut adjustments,
    );

    let page = normalize_page(request.page, &mut adjustments);
    let limit = normalize_limit(request.limit, &mut adjustments);
    let offset = (page - 1).saturating_mul(limit);

    let where_clause = set.where_clause();
    let count_sql = join_clauses(&[
        Some(format!("SELECT COUNT(*) AS total FROM {}", target.table)),
        where_clause.clone(),
    ]);

    let ConditionSet { mut params, .. } = set;
    let limit_placeholder = params.len() + 1;
    let offset_placeholder = params.len() + 2;
    params.push(BindValue::Integer(limit));
    params.push(BindValue::Integer(offset));

    let sql = join_clauses(&[
        Some(format!("SELECT {} FROM {}", target.select_list, target.table)),
        where_clause,
        Some(order_by),
        Some(format!("LIMIT ${limit_placeholder} OFFSET ${offset_placeholder}")),
    ]);

    for adjustment in &adjustments {
        tracing::debug!(table = target.table, %adjustment, "Search input adjusted");
    }

    QueryResult {
        sql,
        count_sql,
        params,
        offset,
        limit,
        page,
        adjustments,
    }
}

fn join_clauses(clauses: &[Option<String>]) -> String {
    clauses
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `value` has the shape `spec` expects.
///
/// Blank values are applicable; they simply contribute no condition.
fn is_applicable(spec: &FilterSpec, value: &FilterValue) -> bool {
    match (spec.value_type, value) {
        (ValueType::String | ValueType::StringList, _) => {
            spec.is_multi_valued() == matches!(value, FilterValue::Many(_))
        }
        (ValueType::Enum(allowed), FilterValue::One(raw)) => {
            raw.trim().is_empty() || canonical_enum_value(allowed, raw).is_some()
        }
        (ValueType::Enum(_), FilterValue::Many(_)) => false,
    }
}

fn canonical_enum_value(allowed: &[&'static str], raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    allowed
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(raw))
}

fn apply_filter(set: &mut ConditionSet, spec: &FilterSpec, value: &FilterValue) {
    if !is_applicable(spec, value) {
        return;
    }

    let column = spec.column;
    match (spec.match_mode, value) {
        (MatchMode::Exact, FilterValue::One(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return;
            }
            let bound = match spec.value_type {
                ValueType::Enum(allowed) => match canonical_enum_value(allowed, raw) {
                    Some(canonical) => canonical.to_owned(),
                    None => return,
                },
                ValueType::String | ValueType::StringList => raw.to_owned(),
            };
            set.push(vec![BindValue::Text(bound)], |p| format!("{column} = {}", p[0]));
        }
        (MatchMode::SubstringCaseInsensitive, FilterValue::One(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return;
            }
            set.push(vec![BindValue::Text(contains_pattern(raw))], |p| {
                format!("LOWER({column}) LIKE {}", p[0])
            });
        }
        (MatchMode::ArrayContainsAny, FilterValue::Many(raw_values)) => {
            let mut values: Vec<&str> = Vec::with_capacity(raw_values.len());
            for raw in raw_values.iter().map(|raw| raw.trim()) {
                if !raw.is_empty() && !values.contains(&raw) {
                    values.push(raw);
                }
            }
            if values.is_empty() {
                return;
            }
            let bound = values
                .into_iter()
                .map(|value| BindValue::Text(value.to_owned()))
                .collect();
            set.push(bound, |p| {
                let tests = p
                    .iter()
                    .map(|placeholder| format!("{column} ? {placeholder}"))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                format!("({tests})")
            });
        }
        (MatchMode::Exact | MatchMode::SubstringCaseInsensitive, FilterValue::Many(_))
        | (MatchMode::ArrayContainsAny, FilterValue::One(_)) => {}
    }
}

fn order_clause(
    request: &QueryRequest,
    target: &SearchTarget,
    sort_specs: &[SortSpec],
    free_text_placeholder: Option<&str>,
    adjustments: &mut Vec<SearchAdjustment>,
) -> String {
    let requested = request
        .sort_by
        .as_deref()
        .map(str::trim)
        .filter(|field| !field.is_empty());

    if let Some(field) = requested {
        if let Some(spec) = sort_specs.iter().find(|spec| spec.field == field) {
            let direction = request.sort_order.unwrap_or_default().as_sql();
            return format!(
                "ORDER BY {} {direction}, {} ASC",
                spec.column, target.id_column
            );
        }
        adjustments.push(SearchAdjustment::InvalidSortField(field.to_owned()));
    }

    if let Some(placeholder) = free_text_placeholder {
        let primary = target.primary_text_column;
        return format!(
            "ORDER BY CASE WHEN {} = {placeholder} THEN 0 \
             WHEN LOWER({primary}) LIKE {placeholder} THEN 1 \
             ELSE 2 END, {} DESC, {} ASC",
            contains_pattern_sql(primary),
            target.recency_column,
            target.id_column
        );
    }

    let default_column = sort_specs
        .iter()
        .find(|spec| spec.field == target.default_sort_field)
        .map_or(target.recency_column, |spec| spec.column);
    format!(
        "ORDER BY {default_column} {}, {} ASC",
        SortOrder::Desc.as_sql(),
        target.id_column
    )
}

fn normalize_page(requested: Option<i64>, adjustments: &mut Vec<SearchAdjustment>) -> i64 {
    match requested {
        Some(page) if page < 1 => {
            adjustments.push(SearchAdjustment::InvalidPagination {
                parameter: "page",
                requested: page,
                applied: 1,
            });
            1
        }
        Some(page) => page,
        None => 1,
    }
}

fn normalize_limit(requested: Option<i64>, adjustments: &mut Vec<SearchAdjustment>) -> i64 {
    let Some(limit) = requested else {
        return DEFAULT_PAGE_LIMIT;
    };

    let applied = limit.clamp(1, MAX_PAGE_LIMIT);
    if applied != limit {
        adjustments.push(SearchAdjustment::InvalidPagination {
            parameter: "limit",
            requested: limit,
            applied,
        });
    }
    applied
}
