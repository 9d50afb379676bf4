use super::{Binder, Entity, KeyStrategy, StockScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Output of one peeling run, broken down by kernel grade (kilograms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PeelingMachine {
    pub id: i64,
    pub humidifier_id: Option<i64>,
    pub stock_id: i64,
    pub wholes: f64,
    pub k: f64,
    pub lwp: f64,
    pub swp: f64,
    pub bb: f64,
    pub bbnp: f64,
    pub husk: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PeelingMachineInput {
    #[serde(default)]
    pub humidifier_id: Option<i64>,
    pub stock_id: i64,
    pub wholes: f64,
    pub k: f64,
    pub lwp: f64,
    pub swp: f64,
    pub bb: f64,
    pub bbnp: f64,
    pub husk: f64,
}

impl Entity for PeelingMachine {
    type Id = i64;
    type Input = PeelingMachineInput;

    const NAME: &'static str = "Peeling machine record";
    const RESOURCE: &'static str = "peeling-machines";
    const TABLE: &'static str = "peeling_machine";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Serial;
    const FIELDS: &'static [&'static str] = &[
        "humidifier_id",
        "stock_id",
        "wholes",
        "k",
        "lwp",
        "swp",
        "bb",
        "bbnp",
        "husk",
    ];
    const TIMESTAMPED: bool = true;
    const ORDER_BY: &'static str = "created_at DESC";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS peeling_machine (
        id BIGSERIAL PRIMARY KEY,
        humidifier_id BIGINT REFERENCES humidifier (id),
        stock_id BIGINT NOT NULL REFERENCES stock (stock_id),
        wholes DOUBLE PRECISION NOT NULL,
        k DOUBLE PRECISION NOT NULL,
        lwp DOUBLE PRECISION NOT NULL,
        swp DOUBLE PRECISION NOT NULL,
        bb DOUBLE PRECISION NOT NULL,
        bbnp DOUBLE PRECISION NOT NULL,
        husk DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )";

    fn bind_fields<'args>(input: &'args PeelingMachineInput, values: &mut Binder<'_, 'args>) {
        values.push_bind(input.humidifier_id);
        values.push_bind(input.stock_id);
        values.push_bind(input.wholes);
        values.push_bind(input.k);
        values.push_bind(input.lwp);
        values.push_bind(input.swp);
        values.push_bind(input.bb);
        values.push_bind(input.bbnp);
        values.push_bind(input.husk);
    }
}

impl StockScoped for PeelingMachine {}
