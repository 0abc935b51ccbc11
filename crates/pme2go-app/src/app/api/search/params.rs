use std::collections::BTreeMap;

use pme2go_core::error::{CoreError, CoreResult};
use pme2go_db::db::query::search::{FilterSpec, FilterValue, QueryRequest, SearchSchema, SortOrder};

const FREE_TEXT_PARAM: &str = "q";
const FREE_TEXT_ALIAS: &str = "search";
const SORT_BY_PARAM: &str = "sort_by";
const SORT_ORDER_PARAM: &str = "sort_order";
const PAGE_PARAM: &str = "page";
const LIMIT_PARAM: &str = "limit";

/// ## Summary
/// Builds a [`QueryRequest`] from decoded query-string pairs.
///
/// `identity_param` names the parameter carrying the id to exclude. Free text
/// is read from `q`, falling back to its alias `search`. Keys that
/// are not reserved are treated as filters. Values for multi-valued filters
/// may be comma separated or repeated; they accumulate. Unparseable `page`,
/// `limit` and `sort_order` values are dropped so defaults apply.
///
/// ## Errors
/// Returns [`CoreError::ValidationError`] if `identity_param` is missing or blank.
pub fn query_request_from_pairs<'a, I>(
    pairs: I,
    schema: &SearchSchema,
    identity_param: &str,
) -> CoreResult<QueryRequest>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut exclude_id = None;
    let mut free_text = None;
    let mut free_text_alias = None;
    let mut sort_by = None;
    let mut sort_order = None;
    let mut page = None;
    let mut limit = None;
    let mut filters = BTreeMap::new();

    for (key, value) in pairs {
        if key == identity_param {
            exclude_id = Some(value.trim().to_owned());
        } else if key == FREE_TEXT_PARAM {
            free_text = Some(value.to_owned());
        } else if key == FREE_TEXT_ALIAS {
            free_text_alias = Some(value.to_owned());
        } else if key == SORT_BY_PARAM {
            sort_by = Some(value.to_owned());
        } else if key == SORT_ORDER_PARAM {
            sort_order = SortOrder::parse(value);
        } else if key == PAGE_PARAM {
            page = value.trim().parse().ok();
        } else if key == LIMIT_PARAM {
            limit = value.trim().parse().ok();
        } else {
            add_filter(&mut filters, schema, key, value);
        }
    }

    let exclude_id = exclude_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoreError::ValidationError(format!("{identity_param} is required")))?;

    Ok(QueryRequest {
        free_text: free_text.or(free_text_alias),
        filters,
        exclude_id,
        sort_by,
        sort_order,
        page,
        limit,
    })
}

fn add_filter(
    filters: &mut BTreeMap<String, FilterValue>,
    schema: &SearchSchema,
    field: &str,
    value: &str,
) {
    if !schema.filter(field).is_some_and(FilterSpec::is_multi_valued) {
        filters.insert(field.to_owned(), FilterValue::One(value.to_owned()));
        return;
    }

    let parts = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned);

    match filters
        .entry(field.to_owned())
        .or_insert_with(|| FilterValue::Many(Vec::new()))
    {
        FilterValue::Many(values) => values.extend(parts),
        FilterValue::One(_) => {}
    }
}
