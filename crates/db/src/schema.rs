use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create schedule_entries table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_entries (
            id VARCHAR(64) PRIMARY KEY,
            date VARCHAR(10) NOT NULL,
            appointment_time VARCHAR(32) NOT NULL,
            dock VARCHAR(16) NOT NULL DEFAULT '',
            location VARCHAR(16) NOT NULL DEFAULT 'stage',
            client VARCHAR(255) NOT NULL,
            reference VARCHAR(255) NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            check_in_time VARCHAR(8) NOT NULL DEFAULT '',
            kind VARCHAR(16) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'free',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create location_ledger table: one JSON document per ledger key
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS location_ledger (
            id VARCHAR(64) PRIMARY KEY,
            statuses JSONB NOT NULL,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_schedule_entries_date ON schedule_entries(date);",
        "CREATE INDEX IF NOT EXISTS idx_schedule_entries_dock ON schedule_entries(dock);",
        "CREATE INDEX IF NOT EXISTS idx_schedule_entries_location ON schedule_entries(location);",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
