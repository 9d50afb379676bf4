//! Lookup tables referenced by the production records.

use super::{Binder, Entity, KeyStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WeightType {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeightTypeInput {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Entity for WeightType {
    type Id = i64;
    type Input = WeightTypeInput;

    const NAME: &'static str = "Weight type";
    const RESOURCE: &'static str = "weight-types";
    const TABLE: &'static str = "weight_types";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Serial;
    const FIELDS: &'static [&'static str] = &["type"];
    const TIMESTAMPED: bool = false;
    const ORDER_BY: &'static str = "id";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS weight_types (
        id BIGSERIAL PRIMARY KEY,
        type TEXT NOT NULL
    )";

    fn bind_fields<'args>(input: &'args WeightTypeInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.kind);
    }
}

/// Kernel size grade, e.g. `W180` or `W320`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SizeVariation {
    pub size_id: i64,
    pub size_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SizeVariationInput {
    pub size_value: String,
}

impl Entity for SizeVariation {
    type Id = i64;
    type Input = SizeVariationInput;

    const NAME: &'static str = "Size variation";
    const RESOURCE: &'static str = "size-variations";
    const TABLE: &'static str = "size_variations";
    const PRIMARY_KEY: &'static str = "size_id";
    const KEY: KeyStrategy = KeyStrategy::Serial;
    const FIELDS: &'static [&'static str] = &["size_value"];
    const TIMESTAMPED: bool = false;
    const ORDER_BY: &'static str = "size_id";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS size_variations (
        size_id BIGSERIAL PRIMARY KEY,
        size_value TEXT NOT NULL
    )";

    fn bind_fields<'args>(input: &'args SizeVariationInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.size_value);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Piece {
    pub piece_id: i64,
    pub piece_code: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PieceInput {
    pub piece_code: i32,
    pub description: String,
}

impl Entity for Piece {
    type Id = i64;
    type Input = PieceInput;

    const NAME: &'static str = "Piece";
    const RESOURCE: &'static str = "pieces";
    const TABLE: &'static str = "pieces";
    const PRIMARY_KEY: &'static str = "piece_id";
    const KEY: KeyStrategy = KeyStrategy::Serial;
    const FIELDS: &'static [&'static str] = &["piece_code", "description"];
    const TIMESTAMPED: bool = false;
    const ORDER_BY: &'static str = "piece_id";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS pieces (
        piece_id BIGSERIAL PRIMARY KEY,
        piece_code INTEGER NOT NULL,
        description TEXT NOT NULL
    )";

    fn bind_fields<'args>(input: &'args PieceInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(input.piece_code);
        values.push_bind(&input.description);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GradingCategory {
    pub category_id: i64,
    pub category_code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GradingCategoryInput {
    pub category_code: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Entity for GradingCategory {
    type Id = i64;
    type Input = GradingCategoryInput;

    const NAME: &'static str = "Grading category";
    const RESOURCE: &'static str = "grading-categories";
    const TABLE: &'static str = "grading_categories";
    const PRIMARY_KEY: &'static str = "category_id";
    const KEY: KeyStrategy = KeyStrategy::Serial;
    const FIELDS: &'static [&'static str] = &["category_code", "description"];
    const TIMESTAMPED: bool = false;
    const ORDER_BY: &'static str = "category_code";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS grading_categories (
        category_id BIGSERIAL PRIMARY KEY,
        category_code TEXT NOT NULL UNIQUE,
        description TEXT
    )";

    fn bind_fields<'args>(input: &'args GradingCategoryInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.category_code);
        values.push_bind(&input.description);
    }
}

/// Named output chute of the grading machine. Ids are assigned by the floor
/// (`W180`, `SW`, ...), so clients send them on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GraderMachineOutput {
    pub id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl Entity for GraderMachineOutput {
    type Id = String;
    type Input = GraderMachineOutput;

    const NAME: &'static str = "Grader machine output";
    const RESOURCE: &'static str = "grader-machine-outputs";
    const TABLE: &'static str = "grader_machine_outputs";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Client;
    const FIELDS: &'static [&'static str] = &["type"];
    const TIMESTAMPED: bool = false;
    const ORDER_BY: &'static str = "id";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS grader_machine_outputs (
        id TEXT PRIMARY KEY,
        type TEXT NOT NULL
    )";

    fn bind_fields<'args>(input: &'args GraderMachineOutput, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.kind);
    }

    fn bind_key<'args>(input: &'args GraderMachineOutput, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.id);
    }

    fn body_key(input: &GraderMachineOutput) -> Option<&str> {
        Some(&input.id)
    }
}
