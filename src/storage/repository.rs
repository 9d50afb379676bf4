//! Generic CRUD over one entity table.
//!
//! Every statement is assembled with `QueryBuilder` from the entity's table
//! metadata; values are always bound, never interpolated. Column names come
//! from `Entity` constants and `Filter`s built in code, never from requests.

use crate::domain::model::{ColorSort, Entity, KeyStrategy, MachineGrading, StockScoped, WeightType};
use crate::domain::summary::{Aggregate, ColorSortSummary, WeightSummary, WeightTypeUsage};
use crate::storage::error::{StoreError, StoreResult};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::marker::PhantomData;
use uuid::Uuid;

/// Equality condition on one integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub column: &'static str,
    pub value: i64,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<i64>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
    for (i, filter) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(filter.column);
        qb.push(" = ");
        qb.push_bind(filter.value);
    }
}

fn insert_columns<E: Entity>() -> Vec<&'static str> {
    let mut columns = Vec::with_capacity(E::FIELDS.len() + 3);
    if E::KEY != KeyStrategy::Serial {
        columns.push(E::PRIMARY_KEY);
    }
    columns.extend_from_slice(E::FIELDS);
    if E::TIMESTAMPED {
        columns.extend(["created_at", "updated_at"]);
    }
    columns
}

pub(crate) fn select_all_query<E: Entity>() -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!("SELECT * FROM {} ORDER BY {}", E::TABLE, E::ORDER_BY))
}

pub(crate) fn select_by_id_query<E: Entity>(id: E::Id) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE {} = ", E::TABLE, E::PRIMARY_KEY));
    qb.push_bind(id);
    qb
}

pub(crate) fn select_where_query<'a, E: Entity>(filters: &'a [Filter]) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", E::TABLE));
    push_filters(&mut qb, filters);
    qb.push(" ORDER BY ");
    qb.push(E::ORDER_BY);
    qb
}

pub(crate) fn insert_query<'a, E: Entity>(input: &'a E::Input) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        E::TABLE,
        insert_columns::<E>().join(", ")
    ));
    {
        let mut values = qb.separated(", ");
        match E::KEY {
            KeyStrategy::Serial => {}
            KeyStrategy::Uuid => {
                values.push_bind(Uuid::new_v4());
            }
            KeyStrategy::Client => E::bind_key(input, &mut values),
        }
        E::bind_fields(input, &mut values);
        if E::TIMESTAMPED {
            values.push("now()");
            values.push("now()");
        }
    }
    qb.push(") RETURNING *");
    qb
}

pub(crate) fn update_query<'a, E: Entity>(id: E::Id, input: &'a E::Input) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "UPDATE {} SET ({}) = ROW(",
        E::TABLE,
        E::FIELDS.join(", ")
    ));
    {
        let mut values = qb.separated(", ");
        E::bind_fields(input, &mut values);
    }
    qb.push(")");
    if E::TIMESTAMPED {
        qb.push(", updated_at = now()");
    }
    qb.push(format!(" WHERE {} = ", E::PRIMARY_KEY));
    qb.push_bind(id);
    qb.push(" RETURNING *");
    qb
}

pub(crate) fn delete_query<E: Entity>(id: E::Id) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("DELETE FROM {} WHERE {} = ", E::TABLE, E::PRIMARY_KEY));
    qb.push_bind(id);
    qb
}

pub(crate) fn aggregate_query<'a, E: Entity>(
    sum_column: &'static str,
    filters: &'a [Filter],
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT COALESCE(SUM({}), 0)::FLOAT8 AS total, COUNT(*) AS record_count FROM {}",
        sum_column,
        E::TABLE
    ));
    push_filters(&mut qb, filters);
    qb
}

/// CRUD access to the table behind `E`.
pub struct Repository<E> {
    pool: PgPool,
    entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            entity: PhantomData,
        }
    }

    /// All rows in the entity's default order.
    pub async fn list(&self) -> StoreResult<Vec<E>> {
        tracing::debug!(table = E::TABLE, "list");
        let mut qb = select_all_query::<E>();
        Ok(qb.build_query_as::<E>().fetch_all(&self.pool).await?)
    }

    pub async fn get(&self, id: E::Id) -> StoreResult<E> {
        tracing::debug!(table = E::TABLE, %id, "get");
        let mut qb = select_by_id_query::<E>(id.clone());
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(E::NAME, id))
    }

    /// Inserts a row and returns it as stored, with generated key and timestamps.
    pub async fn create(&self, input: &E::Input) -> StoreResult<E> {
        tracing::debug!(table = E::TABLE, "create");
        let mut qb = insert_query::<E>(input);
        Ok(qb.build_query_as::<E>().fetch_one(&self.pool).await?)
    }

    /// Overwrites every mutable field of the row keyed by `id`.
    pub async fn update(&self, id: E::Id, input: &E::Input) -> StoreResult<E> {
        tracing::debug!(table = E::TABLE, %id, "update");
        let mut qb = update_query::<E>(id.clone(), input);
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(E::NAME, id))
    }

    pub async fn delete(&self, id: E::Id) -> StoreResult<()> {
        tracing::debug!(table = E::TABLE, %id, "delete");
        let mut qb = delete_query::<E>(id.clone());
        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(E::NAME, id));
        }
        Ok(())
    }

    /// Rows matching every filter. Empty when nothing matches.
    pub async fn list_by(&self, filters: &[Filter]) -> StoreResult<Vec<E>> {
        tracing::debug!(table = E::TABLE, ?filters, "list_by");
        let mut qb = select_where_query::<E>(filters);
        Ok(qb.build_query_as::<E>().fetch_all(&self.pool).await?)
    }

    /// SUM of `sum_column` and COUNT of the rows matching every filter.
    pub async fn summarize(&self, sum_column: &'static str, filters: &[Filter]) -> StoreResult<Aggregate> {
        tracing::debug!(table = E::TABLE, sum_column, ?filters, "summarize");
        let mut qb = aggregate_query::<E>(sum_column, filters);
        Ok(qb.build_query_as::<Aggregate>().fetch_one(&self.pool).await?)
    }
}

impl<E: StockScoped> Repository<E> {
    pub async fn list_for_stock(&self, stock_id: i64) -> StoreResult<Vec<E>> {
        self.list_by(&[Filter::eq(E::STOCK_COLUMN, stock_id)]).await
    }
}

impl Repository<ColorSort> {
    /// Color sort records of one sorter pass over a stock lot.
    pub async fn list_for_pass(&self, stock_id: i64, sort_counter: i32) -> StoreResult<Vec<ColorSort>> {
        self.list_by(&[
            Filter::eq("stock_id", stock_id),
            Filter::eq("sort_counter", sort_counter),
        ])
        .await
    }

    pub async fn pass_summary(&self, stock_id: i64, sort_counter: i32) -> StoreResult<ColorSortSummary> {
        let aggregate = self
            .summarize(
                "accepted_weight",
                &[
                    Filter::eq("stock_id", stock_id),
                    Filter::eq("sort_counter", sort_counter),
                ],
            )
            .await?;
        Ok(ColorSortSummary::new(stock_id, sort_counter, aggregate))
    }
}

impl Repository<MachineGrading> {
    pub async fn weight_summary(&self, stock_id: i64) -> StoreResult<WeightSummary> {
        let aggregate = self
            .summarize("weight", &[Filter::eq("stock_id", stock_id)])
            .await?;
        Ok(WeightSummary::new(stock_id, aggregate))
    }
}

impl Repository<WeightType> {
    /// Every weight type with the number of color sort records using it, most used first.
    pub async fn usage(&self) -> StoreResult<Vec<WeightTypeUsage>> {
        tracing::debug!(table = WeightType::TABLE, "usage");
        let sql = format!(
            "SELECT wt.id, wt.type, COUNT(cs.id) AS usage_count \
             FROM {} wt LEFT JOIN {} cs ON cs.weight_type_id = wt.id \
             GROUP BY wt.id, wt.type \
             ORDER BY usage_count DESC, wt.id",
            WeightType::TABLE,
            ColorSort::TABLE
        );
        Ok(sqlx::query_as::<_, WeightTypeUsage>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }
}
