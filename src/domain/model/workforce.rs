use super::{Binder, Entity, KeyStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A member of the grading floor. `id` is the employee code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Worker {
    pub id: String,
    pub name: String,
    /// Twelve digit national identity number, kept as text.
    pub aadhaar: String,
    pub address: String,
}

impl Entity for Worker {
    type Id = String;
    type Input = Worker;

    const NAME: &'static str = "Worker";
    const RESOURCE: &'static str = "workforce";
    const TABLE: &'static str = "workforce";
    const PRIMARY_KEY: &'static str = "id";
    const KEY: KeyStrategy = KeyStrategy::Client;
    const FIELDS: &'static [&'static str] = &["name", "aadhaar", "address"];
    const TIMESTAMPED: bool = false;
    const ORDER_BY: &'static str = "id";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS workforce (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        aadhaar TEXT NOT NULL,
        address TEXT NOT NULL
    )";

    fn bind_fields<'args>(input: &'args Worker, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.name);
        values.push_bind(&input.aadhaar);
        values.push_bind(&input.address);
    }

    fn bind_key<'args>(input: &'args Worker, values: &mut Binder<'_, 'args>) {
        values.push_bind(&input.id);
    }

    fn body_key(input: &Worker) -> Option<&str> {
        Some(&input.id)
    }
}
