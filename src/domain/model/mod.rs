//! Table-backed entities of the production line.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{Encode, FromRow, Postgres, Type};
use std::fmt::Display;
use utoipa::ToSchema;

pub mod color_sort;
pub mod grading;
pub mod humidifier;
pub mod peeling_machine;
pub mod reference;
pub mod registry;
pub mod stock;
pub mod workforce;

pub use color_sort::{ColorSort, ColorSortInput};
pub use grading::{
    MachineGrading, MachineGradingInput, ManualGrading, ManualGradingInput, ManualGradingSample,
    ManualGradingSampleInput,
};
pub use humidifier::{Humidifier, HumidifierInput};
pub use peeling_machine::{PeelingMachine, PeelingMachineInput};
pub use reference::{
    GraderMachineOutput, GradingCategory, GradingCategoryInput, Piece, PieceInput, SizeVariation,
    SizeVariationInput, WeightType, WeightTypeInput,
};
pub use registry::{entity_tables, TableDef};
pub use stock::{Stock, StockInput};
pub use workforce::Worker;

/// How the primary key of a new row is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// `BIGSERIAL` column filled in by PostgreSQL.
    Serial,
    /// `UUID` column; the service generates a v4 id before inserting.
    Uuid,
    /// `TEXT` column supplied by the client in the request body.
    Client,
}

/// Value sink used by entities to bind their mutable fields, in `FIELDS` order.
pub type Binder<'qb, 'args> = Separated<'qb, 'args, Postgres, &'static str>;

/// Contract every table-backed resource implements.
///
/// The generic repository and HTTP handlers only talk to entities through this
/// trait: the row type is what the table returns, `Input` is what a client sends
/// on create and update.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Serialize + for<'s> ToSchema<'s> + Send + Sync + Unpin + 'static
{
    type Id: for<'q> Encode<'q, Postgres>
        + Type<Postgres>
        + DeserializeOwned
        + Display
        + Clone
        + Send
        + Sync
        + 'static;
    type Input: DeserializeOwned + for<'s> ToSchema<'s> + Send + Sync + 'static;

    /// Human readable name used in messages ("Stock not found").
    const NAME: &'static str;
    /// Collection segment under which the resource is served (`stocks`).
    const RESOURCE: &'static str;
    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str;
    const KEY: KeyStrategy;
    /// Columns overwritten on create and update, in bind order.
    const FIELDS: &'static [&'static str];
    /// Whether the table carries `created_at` / `updated_at`.
    const TIMESTAMPED: bool;
    /// ORDER BY expression for listings.
    const ORDER_BY: &'static str;
    const CREATE_TABLE: &'static str;

    fn bind_fields<'args>(input: &'args Self::Input, values: &mut Binder<'_, 'args>);

    /// Binds the client supplied key. Only called for [`KeyStrategy::Client`].
    fn bind_key<'args>(_input: &'args Self::Input, _values: &mut Binder<'_, 'args>) {}

    /// Key carried inside the request body, if the body has one.
    fn body_key(_input: &Self::Input) -> Option<&str> {
        None
    }
}

/// Entities whose rows belong to a stock lot through a `stock_id` column.
pub trait StockScoped: Entity {
    const STOCK_COLUMN: &'static str = "stock_id";
}
