use super::{Binder, Entity, KeyStrategy};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A lot of raw cashew nuts received from a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Stock {
    pub stock_id: i64,
    pub seller_name: String,
    pub origin_country: String,
    /// Received weight in kilograms.
    pub weight: f64,
    /// Date the lot arrived at the factory.
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockInput {
    pub seller_name: String,
    pub origin_country: String,
    pub weight: f64,
    pub date: NaiveDate,
}

impl Entity for Stock {
    type Id = i64;
    type Input = StockInput;

    const NAME: &'static str = "Stock";
    const RESOURCE: &'static str = "stocks";
    const TABLE: &'static str = "stock";
    const PRIMARY_KEY: &'static str = "stock_id";
    const KEY: KeyStrategy = KeyStrategy::Serial;
    const FIELDS: &'static [&'static str] = &["seller_name", "origin_country", "weight", "date"];
    const TIMESTAMPED: bool = true;
    const ORDER_BY: &'static str = "created_at DESC";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS stock (
        stock_id BIGSERIAL PRIMARY KEY,
        seller_name TEXT NOT NULL,
        origin_country TEXT NOT NULL,
        weight DOUBLE PRECISION NOT NULL,
        date DATE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )";

    fn bind_fields<'args>(input: &'args StockInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.seller_name);
        values.push_bind(&input.origin_country);
        values.push_bind(input.weight);
        values.push_bind(input.date);
    }
}
