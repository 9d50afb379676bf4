//! Aggregates computed over production records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// SUM and COUNT over a filtered row set. Zero when nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Aggregate {
    pub total: f64,
    pub record_count: i64,
}

/// Accepted weight of one color sort pass over a stock lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ColorSortSummary {
    pub stock_id: i64,
    pub sort_counter: i32,
    pub total_accepted_weight: f64,
    pub record_count: i64,
}

impl ColorSortSummary {
    pub fn new(stock_id: i64, sort_counter: i32, aggregate: Aggregate) -> Self {
        Self {
            stock_id,
            sort_counter,
            total_accepted_weight: aggregate.total,
            record_count: aggregate.record_count,
        }
    }
}

/// Machine graded weight of a stock lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeightSummary {
    pub stock_id: i64,
    pub total_weight: f64,
    pub record_count: i64,
}

impl WeightSummary {
    pub fn new(stock_id: i64, aggregate: Aggregate) -> Self {
        Self {
            stock_id,
            total_weight: aggregate.total,
            record_count: aggregate.record_count,
        }
    }
}

/// How many color sort records use a weight type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WeightTypeUsage {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub usage_count: i64,
}
