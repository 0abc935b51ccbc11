use diesel::QueryableByName;
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Text};
use diesel_async::RunQueryDsl;

use super::builder::{BindValue, QueryResult};
use crate::db::Storage;
use crate::error::{DbError, DbResult};

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

/// One page of search results with the total match count.
#[derive(Debug, Clone)]
pub struct SearchPage<R> {
    pub rows: Vec<R>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl<R> SearchPage<R> {
    #[must_use]
    pub const fn total_pages(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        (self.total + self.limit - 1) / self.limit
    }
}

fn bind_params(sql: &str, params: &[BindValue]) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    params
        .iter()
        .fold(diesel::sql_query(sql).into_boxed::<Pg>(), |query, param| {
            match param {
                BindValue::Text(value) => query.bind::<Text, _>(value.clone()),
                BindValue::Integer(value) => query.bind::<BigInt, _>(*value),
            }
        })
}

/// ## Summary
/// Runs the data and count queries of a built search concurrently.
///
/// Each query checks out its own pooled connection and releases it as soon as
/// that query finishes; neither holds a connection while waiting for another.
///
/// ## Errors
/// Returns [`crate::error::DbError::Unavailable`] or a pool error when no
/// connection can be obtained, and database errors if either query fails.
#[tracing::instrument(skip(storage, query), fields(page = query.page, limit = query.limit))]
pub async fn execute_search<R>(storage: &dyn Storage, query: &QueryResult) -> DbResult<SearchPage<R>>
where
    R: QueryableByName<Pg> + Send + 'static,
{
    let rows = async {
        let mut conn = storage.get_connection().await?;
        let rows = bind_params(&query.sql, &query.params)
            .load::<R>(&mut conn)
            .await?;
        Ok::<_, DbError>(rows)
    };
    let count = async {
        let mut conn = storage.get_connection().await?;
        let count = bind_params(&query.count_sql, query.count_params())
            .get_result::<CountRow>(&mut conn)
            .await?;
        Ok::<_, DbError>(count)
    };

    let (rows, count) = futures::try_join!(rows, count)?;

    tracing::debug!(
        returned = rows.len(),
        total = count.total,
        "Search executed"
    );

    Ok(SearchPage {
        rows,
        total: count.total,
        page: query.page,
        limit: query.limit,
    })
}
