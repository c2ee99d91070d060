use dockflow_api::middleware::error_handling::AppError;
use dockflow_core::errors::DockError;
use dockflow_core::models::entry::{
    NewScheduleEntry, ScheduleEntry, ServiceKind, UpdateEntryRequest,
};
use dockflow_core::models::location::Location;
use mockall::predicate;
use pretty_assertions::assert_eq;

use crate::test_utils::{db_entry, TestContext};

// Test wrappers that mirror the handler logic against the mock
// repository instead of a live pool

async fn test_list_entries_wrapper(
    ctx: &TestContext,
    date: Option<&'static str>,
) -> Result<Vec<ScheduleEntry>, AppError> {
    let rows = ctx
        .schedule_repo
        .list_entries(date)
        .await
        .map_err(DockError::Database)?;
    Ok(rows.into_iter().map(|row| row.into_entry()).collect())
}

async fn test_create_entries_wrapper(
    ctx: &TestContext,
    schedules: Vec<NewScheduleEntry>,
) -> Result<usize, AppError> {
    if schedules.is_empty() {
        return Ok(0);
    }

    let date = schedules[0].date.clone();
    if schedules.iter().any(|entry| entry.date != date) {
        return Err(AppError(DockError::Validation(
            "All entries in a bulk create must share one date".to_string(),
        )));
    }

    let entries: Vec<ScheduleEntry> = schedules.into_iter().map(|new| new.into_entry()).collect();
    let count = ctx
        .schedule_repo
        .create_entries(entries)
        .await
        .map_err(DockError::Database)?;
    Ok(count as usize)
}

async fn test_update_entry_wrapper(
    ctx: &TestContext,
    id: &'static str,
    fields: UpdateEntryRequest,
) -> Result<ScheduleEntry, AppError> {
    let updated = ctx
        .schedule_repo
        .update_entry(id, fields)
        .await
        .map_err(DockError::Database)?
        .ok_or_else(|| DockError::NotFound(format!("Schedule entry with ID {id} not found")))?;
    Ok(updated.into_entry())
}

async fn test_delete_entry_wrapper(ctx: &TestContext, id: &'static str) -> Result<(), AppError> {
    let deleted = ctx
        .schedule_repo
        .delete_entry(id)
        .await
        .map_err(DockError::Database)?;
    if !deleted {
        return Err(AppError(DockError::NotFound(format!(
            "Schedule entry with ID {id} not found"
        ))));
    }
    Ok(())
}

fn new_entry(date: &str, client: &str) -> NewScheduleEntry {
    NewScheduleEntry {
        date: date.to_string(),
        appointment_time: "10:30 AM".to_string(),
        client: client.to_string(),
        reference: "CNTR001".to_string(),
        note: String::new(),
        kind: ServiceKind::Cell,
        location: Location::Stage,
    }
}

#[tokio::test]
async fn test_list_entries_converts_rows() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_list_entries()
        .with(predicate::eq(Some("2025-10-15")))
        .returning(|_| Ok(vec![db_entry("e-1", "2025-10-15")]));

    let entries = test_list_entries_wrapper(&ctx, Some("2025-10-15"))
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "e-1");
    assert_eq!(entries[0].location, Location::Stage);
    assert_eq!(entries[0].kind, ServiceKind::Cell);
    assert!(!entries[0].is_checked_in());
}

#[tokio::test]
async fn test_create_entries_reports_input_count() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_create_entries()
        .withf(|entries| entries.len() == 2 && entries.iter().all(|e| e.date == "2025-10-15"))
        .returning(|entries| Ok(entries.len() as u64));

    let count = test_create_entries_wrapper(
        &ctx,
        vec![new_entry("2025-10-15", "HBL001"), new_entry("2025-10-15", "HBL002")],
    )
    .await
    .unwrap();

    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_create_entries_empty_is_noop() {
    let ctx = TestContext::new();
    let count = test_create_entries_wrapper(&ctx, vec![]).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_create_entries_rejects_mixed_dates() {
    let ctx = TestContext::new();
    let err = test_create_entries_wrapper(
        &ctx,
        vec![new_entry("2025-10-15", "HBL001"), new_entry("2025-10-16", "HBL002")],
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, DockError::Validation(_)));
}

#[tokio::test]
async fn test_update_entry_not_found() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_update_entry()
        .returning(|_, _| Ok(None));

    let err = test_update_entry_wrapper(&ctx, "ghost", UpdateEntryRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err.0, DockError::NotFound(_)));
}

#[tokio::test]
async fn test_update_entry_applies_fields() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_update_entry()
        .with(predicate::eq("e-1"), predicate::always())
        .returning(|_, fields| {
            let mut row = db_entry("e-1", "2025-10-15");
            if let Some(note) = fields.note {
                row.note = note;
            }
            Ok(Some(row))
        });

    let updated = test_update_entry_wrapper(
        &ctx,
        "e-1",
        UpdateEntryRequest {
            note: Some("damaged pallet".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.note, "damaged pallet");
}

#[tokio::test]
async fn test_delete_entry_not_found() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo.expect_delete_entry().returning(|_| Ok(false));

    let err = test_delete_entry_wrapper(&ctx, "ghost").await.unwrap_err();
    assert!(matches!(err.0, DockError::NotFound(_)));
}
