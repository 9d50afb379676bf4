use super::{Binder, Entity, KeyStrategy, StockScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Weight reading taken after a stock lot leaves the humidifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Humidifier {
    pub id: i64,
    pub stock_id: i64,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HumidifierInput {
    pub stock_id: i64,
    pub weight: f64,
}

impl Entity for Humidifier {
    type Id = i64;
    type Input = HumidifierInput;

    const NAME: &'static str = "Humidifier reading";
    const RESOURCE: &'static str = "humidifiers";
    const TABLE: &'static str = "humidifier";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Serial;
    const FIELDS: &'static [&'static str] = &["stock_id", "weight"];
    const TIMESTAMPED: bool = true;
    const ORDER_BY: &'static str = "created_at DESC";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS humidifier (
        id BIGSERIAL PRIMARY KEY,
        stock_id BIGINT NOT NULL REFERENCES stock (stock_id),
        weight DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )";

    fn bind_fields<'args>(input: &'args HumidifierInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(input.stock_id);
        values.push_bind(input.weight);
    }
}

impl StockScoped for Humidifier {}
