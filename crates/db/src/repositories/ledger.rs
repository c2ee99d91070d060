use async_trait::async_trait;
use dockflow_core::ledger::{LedgerMap, LedgerStore};
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Ledger row key; one JSON document holds the whole mapping.
const LEDGER_KEY: &str = "location_statuses";

/// Postgres-backed [`LedgerStore`]: the ledger persists as a single
/// JSONB document, upserted on every save.
#[derive(Clone)]
pub struct PgLedgerStore {
    pool: Pool<Postgres>,
}

impl PgLedgerStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn load(&self) -> Result<Option<LedgerMap>> {
        tracing::debug!("Loading location ledger document");

        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT statuses FROM location_ledger WHERE id = $1")
                .bind(LEDGER_KEY)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((value,)) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, statuses: &LedgerMap) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO location_ledger (id, statuses, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO UPDATE SET statuses = $2, updated_at = NOW()
            "#,
        )
        .bind(LEDGER_KEY)
        .bind(serde_json::to_value(statuses)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
