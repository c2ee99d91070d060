use chrono::Utc;
use dockflow_core::models::entry::{ScheduleEntry, UpdateEntryRequest};
use eyre::Result;
use sqlx::{Pool, Postgres};

use crate::models::DbScheduleEntry;

const ENTRY_COLUMNS: &str = "id, date, appointment_time, dock, location, client, \
     reference, note, check_in_time, kind, status, created_at";

/// Entries for one date ordered by appointment time, or everything
/// newest-first when no date is given.
pub async fn list_entries(
    pool: &Pool<Postgres>,
    date: Option<&str>,
) -> Result<Vec<DbScheduleEntry>> {
    tracing::debug!("Listing schedule entries, date filter: {:?}", date);

    let entries = match date {
        Some(date) => {
            sqlx::query_as::<_, DbScheduleEntry>(
                r#"
                SELECT id, date, appointment_time, dock, location, client,
                       reference, note, check_in_time, kind, status, created_at
                FROM schedule_entries
                WHERE date = $1
                ORDER BY appointment_time ASC
                "#,
            )
            .bind(date)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DbScheduleEntry>(
                r#"
                SELECT id, date, appointment_time, dock, location, client,
                       reference, note, check_in_time, kind, status, created_at
                FROM schedule_entries
                ORDER BY created_at DESC
                "#,
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(entries)
}

pub async fn get_entry_by_id(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<Option<DbScheduleEntry>> {
    let entry = sqlx::query_as::<_, DbScheduleEntry>(
        r#"
        SELECT id, date, appointment_time, dock, location, client,
               reference, note, check_in_time, kind, status, created_at
        FROM schedule_entries
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Bulk create for a date. Existing entries for that date are removed
/// first, so the new set replaces the old one entirely; both steps run
/// in one transaction.
pub async fn create_entries(pool: &Pool<Postgres>, entries: &[ScheduleEntry]) -> Result<u64> {
    let Some(first) = entries.first() else {
        return Ok(0);
    };
    let date = first.date.as_str();
    let now = Utc::now();

    tracing::debug!("Replacing {} schedule entries for date {}", entries.len(), date);

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM schedule_entries WHERE date = $1")
        .bind(date)
        .execute(&mut *tx)
        .await?;

    let mut count = 0;
    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO schedule_entries
                (id, date, appointment_time, dock, location, client,
                 reference, note, check_in_time, kind, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.date)
        .bind(&entry.appointment_time)
        .bind(&entry.dock)
        .bind(entry.location.as_str())
        .bind(&entry.client)
        .bind(&entry.reference)
        .bind(&entry.note)
        .bind(&entry.check_in_time)
        .bind(entry.kind.as_str())
        .bind(entry.status.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await?;
        count += 1;
    }

    tx.commit().await?;

    Ok(count)
}

/// Partial field update. Returns `None` when the entry does not exist.
pub async fn update_entry(
    pool: &Pool<Postgres>,
    id: &str,
    fields: &UpdateEntryRequest,
) -> Result<Option<DbScheduleEntry>> {
    let Some(current) = get_entry_by_id(pool, id).await? else {
        return Ok(None);
    };

    let date = fields.date.as_deref().unwrap_or(&current.date);
    let appointment_time = fields
        .appointment_time
        .as_deref()
        .unwrap_or(&current.appointment_time);
    let client = fields.client.as_deref().unwrap_or(&current.client);
    let reference = fields.reference.as_deref().unwrap_or(&current.reference);
    let note = fields.note.as_deref().unwrap_or(&current.note);
    let kind = fields
        .kind
        .map(|k| k.as_str().to_string())
        .unwrap_or_else(|| current.kind.clone());
    let status = fields
        .status
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|| current.status.clone());

    let updated = sqlx::query_as::<_, DbScheduleEntry>(&format!(
        r#"
        UPDATE schedule_entries
        SET date = $2, appointment_time = $3, client = $4, reference = $5,
            note = $6, kind = $7, status = $8
        WHERE id = $1
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(date)
    .bind(appointment_time)
    .bind(client)
    .bind(reference)
    .bind(note)
    .bind(kind)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(Some(updated))
}

/// Writes the assignment-relevant fields the reconciler decided on.
/// `None` leaves a field untouched.
pub async fn set_assignment_fields(
    pool: &Pool<Postgres>,
    id: &str,
    dock: Option<&str>,
    location: Option<&str>,
    check_in_time: Option<&str>,
) -> Result<Option<DbScheduleEntry>> {
    let Some(current) = get_entry_by_id(pool, id).await? else {
        return Ok(None);
    };

    let dock = dock.unwrap_or(&current.dock);
    let location = location.unwrap_or(&current.location);
    let check_in_time = check_in_time.unwrap_or(&current.check_in_time);

    tracing::debug!(
        "Updating assignment fields for entry {id}: dock={dock:?}, location={location:?}, check_in={check_in_time:?}"
    );

    let updated = sqlx::query_as::<_, DbScheduleEntry>(&format!(
        r#"
        UPDATE schedule_entries
        SET dock = $2, location = $3, check_in_time = $4
        WHERE id = $1
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(dock)
    .bind(location)
    .bind(check_in_time)
    .fetch_one(pool)
    .await?;

    Ok(Some(updated))
}

/// Returns false when nothing was deleted.
pub async fn delete_entry(pool: &Pool<Postgres>, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM schedule_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_entries_by_date(pool: &Pool<Postgres>, date: &str) -> Result<u64> {
    tracing::debug!("Deleting all schedule entries for date {date}");

    let result = sqlx::query("DELETE FROM schedule_entries WHERE date = $1")
        .bind(date)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
