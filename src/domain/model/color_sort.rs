use super::{Binder, Entity, KeyStrategy, StockScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Accepted weight coming out of one color sorter pass.
///
/// A stock lot goes through the sorter several times; `sort_counter` numbers
/// the pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ColorSort {
    pub id: Uuid,
    pub peel_id: Option<i64>,
    pub stock_id: Option<i64>,
    pub weight_type_id: i64,
    pub accepted_weight: f64,
    pub sort_counter: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ColorSortInput {
    #[serde(default)]
    pub peel_id: Option<i64>,
    #[serde(default)]
    pub stock_id: Option<i64>,
    pub weight_type_id: i64,
    pub accepted_weight: f64,
    pub sort_counter: i32,
}

impl Entity for ColorSort {
    type Id = Uuid;
    type Input = ColorSortInput;

    const NAME: &'static str = "Color sort record";
    const RESOURCE: &'static str = "color-sorts";
    const TABLE: &'static str = "color_sort";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Uuid;
    const FIELDS: &'static [&'static str] = &[
        "peel_id",
        "stock_id",
        "weight_type_id",
        "accepted_weight",
        "sort_counter",
    ];
    const TIMESTAMPED: bool = true;
    const ORDER_BY: &'static str = "created_at DESC";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS color_sort (
        id UUID PRIMARY KEY,
        peel_id BIGINT REFERENCES peeling_machine (id),
        stock_id BIGINT REFERENCES stock (stock_id),
        weight_type_id BIGINT NOT NULL REFERENCES weight_types (id),
        accepted_weight DOUBLE PRECISION NOT NULL,
        sort_counter INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )";

    fn bind_fields<'args>(input: &'args ColorSortInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(input.peel_id);
        values.push_bind(input.stock_id);
        values.push_bind(input.weight_type_id);
        values.push_bind(input.accepted_weight);
        values.push_bind(input.sort_counter);
    }
}

impl StockScoped for ColorSort {}
