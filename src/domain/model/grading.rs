//! Machine and manual grading records.
//!
//! Machine grading splits color-sorted kernels by size and piece; manual
//! grading is the worker pass that follows, booked against a grader output
//! and a worker.

use super::{Binder, Entity, KeyStrategy, StockScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MachineGrading {
    pub id: Uuid,
    pub color_sort_id: Uuid,
    pub stock_id: i64,
    pub size_variations_id: Option<i64>,
    pub pieces_id: Option<i64>,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MachineGradingInput {
    pub color_sort_id: Uuid,
    pub stock_id: i64,
    #[serde(default)]
    pub size_variations_id: Option<i64>,
    #[serde(default)]
    pub pieces_id: Option<i64>,
    pub weight: f64,
}

impl Entity for MachineGrading {
    type Id = Uuid;
    type Input = MachineGradingInput;

    const NAME: &'static str = "Machine grading record";
    const RESOURCE: &'static str = "machine-gradings";
    const TABLE: &'static str = "machine_grading";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Uuid;
    const FIELDS: &'static [&'static str] = &[
        "color_sort_id",
        "stock_id",
        "size_variations_id",
        "pieces_id",
        "weight",
    ];
    const TIMESTAMPED: bool = true;
    const ORDER_BY: &'static str = "created_at DESC";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS machine_grading (
        id UUID PRIMARY KEY,
        color_sort_id UUID NOT NULL REFERENCES color_sort (id),
        stock_id BIGINT NOT NULL REFERENCES stock (stock_id),
        size_variations_id BIGINT REFERENCES size_variations (size_id),
        pieces_id BIGINT REFERENCES pieces (piece_id),
        weight DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )";

    fn bind_fields<'args>(input: &'args MachineGradingInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(input.color_sort_id);
        values.push_bind(input.stock_id);
        values.push_bind(input.size_variations_id);
        values.push_bind(input.pieces_id);
        values.push_bind(input.weight);
    }
}

impl StockScoped for MachineGrading {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ManualGrading {
    pub id: Uuid,
    pub grader_machine_outputs_id: String,
    pub stock_id: i64,
    pub category_id: Option<i64>,
    pub size_id: i64,
    pub piece_id: Option<i64>,
    pub weight: f64,
    pub worker_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ManualGradingInput {
    pub grader_machine_outputs_id: String,
    pub stock_id: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub size_id: i64,
    #[serde(default)]
    pub piece_id: Option<i64>,
    pub weight: f64,
    pub worker_id: String,
}

impl Entity for ManualGrading {
    type Id = Uuid;
    type Input = ManualGradingInput;

    const NAME: &'static str = "Manual grading record";
    const RESOURCE: &'static str = "manual-gradings";
    const TABLE: &'static str = "manual_grading";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Uuid;
    const FIELDS: &'static [&'static str] = &[
        "grader_machine_outputs_id",
        "stock_id",
        "category_id",
        "size_id",
        "piece_id",
        "weight",
        "worker_id",
    ];
    const TIMESTAMPED: bool = true;
    const ORDER_BY: &'static str = "created_at DESC";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS manual_grading (
        id UUID PRIMARY KEY,
        grader_machine_outputs_id TEXT NOT NULL REFERENCES grader_machine_outputs (id),
        stock_id BIGINT NOT NULL REFERENCES stock (stock_id),
        category_id BIGINT REFERENCES grading_categories (category_id),
        size_id BIGINT NOT NULL REFERENCES size_variations (size_id),
        piece_id BIGINT REFERENCES pieces (piece_id),
        weight DOUBLE PRECISION NOT NULL,
        worker_id TEXT NOT NULL REFERENCES workforce (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )";

    fn bind_fields<'args>(input: &'args ManualGradingInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.grader_machine_outputs_id);
        values.push_bind(input.stock_id);
        values.push_bind(input.category_id);
        values.push_bind(input.size_id);
        values.push_bind(input.piece_id);
        values.push_bind(input.weight);
        values.push_bind(&input.worker_id);
    }
}

impl StockScoped for ManualGrading {}

/// Raw weight a worker takes from a stock lot for hand grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ManualGradingSample {
    pub id: i64,
    pub stock_id: i64,
    pub worker_id: String,
    pub size_variations_id: Option<i64>,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ManualGradingSampleInput {
    pub stock_id: i64,
    pub worker_id: String,
    #[serde(default)]
    pub size_variations_id: Option<i64>,
    pub weight: f64,
}

impl Entity for ManualGradingSample {
    type Id = i64;
    type Input = ManualGradingSampleInput;

    const NAME: &'static str = "Manual grading input";
    const RESOURCE: &'static str = "manual-grading-inputs";
    const TABLE: &'static str = "manual_grading_inputs";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Serial;
    const FIELDS: &'static [&'static str] = &["stock_id", "worker_id", "size_variations_id", "weight"];
    const TIMESTAMPED: bool = true;
    const ORDER_BY: &'static str = "created_at DESC";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS manual_grading_inputs (
        id BIGSERIAL PRIMARY KEY,
        stock_id BIGINT NOT NULL REFERENCES stock (stock_id),
        worker_id TEXT NOT NULL REFERENCES workforce (id),
        size_variations_id BIGINT REFERENCES size_variations (size_id),
        weight DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )";

    fn bind_fields<'args>(input: &'args ManualGradingSampleInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(input.stock_id);
        values.push_bind(&input.worker_id);
        values.push_bind(input.size_variations_id);
        values.push_bind(input.weight);
    }
}

impl StockScoped for ManualGradingSample {}
