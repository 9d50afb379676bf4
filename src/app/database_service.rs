//! The database service.
//!
//! Owns the PostgreSQL connection pool and is responsible for:
//! 1.  Creating the production tables on startup (in foreign-key order).
//! 2.  Handing out typed repositories that share the pool.

use crate::domain::model::{entity_tables, Entity, TableDef};
use crate::infra::config::Config;
use crate::storage::Repository;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub struct DatabaseService {
    pool: PgPool,
}

impl DatabaseService {
    /// Connects to the configured database and makes sure every table exists.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        tracing::info!(database = %config.database.redacted(), "connecting to database");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.database.connect_options()?)
            .await?;

        let service = Self::from_pool(pool);
        service.ensure_schema().await?;
        Ok(service)
    }

    /// Wraps an existing pool without touching the schema.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn repository<E: Entity>(&self) -> Repository<E> {
        Repository::new(self.pool.clone())
    }

    /// Runs `CREATE TABLE IF NOT EXISTS` for every entity table.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        for TableDef { table, create_table_sql } in entity_tables() {
            sqlx::query(create_table_sql).execute(&self.pool).await?;
            tracing::debug!(table, "table ready");
        }
        tracing::info!("schema ready");
        Ok(())
    }

    /// Entity tables that do not exist yet in the `public` schema.
    pub async fn missing_tables(&self) -> anyhow::Result<Vec<&'static str>> {
        let present: Vec<String> = sqlx::query_scalar(
            "SELECT table_name::text
             FROM information_schema.tables
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE'",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entity_tables()
            .into_iter()
            .map(|def| def.table)
            .filter(|table| !present.iter().any(|p| p == table))
            .collect())
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
