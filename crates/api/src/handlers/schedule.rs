use axum::{
    extract::{Path, Query, State},
    Json,
};
use dockflow_core::{
    errors::DockError,
    ingest,
    models::cell::{ImportPreview, ImportPreviewRequest, ImportRequest, ImportResponse},
    models::entry::{
        CreateEntriesRequest, CreateEntriesResponse, DeleteResponse, ScheduleEntry,
        UpdateEntryRequest,
    },
    reconciler::Reconciler,
    timeparse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Lists schedule entries, filtered to one date when requested.
///
/// A full reload is also the reconciliation trigger: every slot still
/// referenced by an entry is forced disabled in the ledger, healing
/// any drift a failed ledger write left behind.
#[axum::debug_handler]
pub async fn list_entries(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<ScheduleEntry>>, AppError> {
    let rows = dockflow_db::repositories::schedule::list_entries(
        &state.db_pool,
        query.date.as_deref(),
    )
    .await
    .map_err(DockError::Database)?;

    let entries: Vec<ScheduleEntry> = rows.into_iter().map(|row| row.into_entry()).collect();

    // Self-healing sweep over the collection just loaded
    let mut ledger = state.ledger.lock().await;
    let docks = state.docks.lock().await;
    Reconciler::new(&mut ledger, &docks)
        .sync_ledger(&entries)
        .await;

    Ok(Json(entries))
}

/// Bulk create. All entries land on the first entry's date and replace
/// whatever that date held before.
#[axum::debug_handler]
pub async fn create_entries(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateEntriesRequest>,
) -> Result<Json<CreateEntriesResponse>, AppError> {
    if payload.schedules.is_empty() {
        return Ok(Json(CreateEntriesResponse {
            success: true,
            count: 0,
        }));
    }

    let date = payload.schedules[0].date.clone();
    if payload.schedules.iter().any(|entry| entry.date != date) {
        return Err(AppError(DockError::Validation(
            "All entries in a bulk create must share one date".to_string(),
        )));
    }
    timeparse::parse_date_str(&date).map_err(|_| {
        DockError::Validation(format!("Invalid schedule date: {date}"))
    })?;

    let entries: Vec<ScheduleEntry> = payload
        .schedules
        .into_iter()
        .map(|new| new.into_entry())
        .collect();

    let mut ledger = state.ledger.lock().await;
    let count = dockflow_db::repositories::schedule::create_entries(&state.db_pool, &entries)
        .await
        .map_err(DockError::Database)?;

    // Imported entries may carry locations; sweep them into the ledger
    let docks = state.docks.lock().await;
    Reconciler::new(&mut ledger, &docks)
        .sync_ledger(&entries)
        .await;

    Ok(Json(CreateEntriesResponse {
        success: true,
        count: count as usize,
    }))
}

/// Imports a parsed sheet: match the target date in the chosen (or
/// detected) date column, convert the rows, and replace that date's
/// schedule.
#[axum::debug_handler]
pub async fn import_entries(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let (date_column, new_entries) =
        ingest::extract_entries(&payload.cells, payload.date_column, &payload.target_date)?;

    let entries: Vec<ScheduleEntry> = new_entries
        .into_iter()
        .map(|new| new.into_entry())
        .collect();

    let count = if entries.is_empty() {
        0
    } else {
        let _ledger = state.ledger.lock().await;
        dockflow_db::repositories::schedule::create_entries(&state.db_pool, &entries)
            .await
            .map_err(DockError::Database)?
    };

    Ok(Json(ImportResponse {
        success: true,
        count: count as usize,
        date_column,
    }))
}

/// Inspects a sheet without writing anything: which column holds the
/// dates, and which dates it offers.
#[axum::debug_handler]
pub async fn preview_import(
    Json(payload): Json<ImportPreviewRequest>,
) -> Result<Json<ImportPreview>, AppError> {
    let date_column = payload
        .date_column
        .or_else(|| ingest::detect_date_column(&payload.cells))
        .ok_or_else(|| {
            DockError::Validation("No date column found in the uploaded sheet".to_string())
        })?;

    let dates = ingest::column_dates(&payload.cells, date_column)
        .into_iter()
        .map(timeparse::format_date_us)
        .collect();

    Ok(Json(ImportPreview { date_column, dates }))
}

#[axum::debug_handler]
pub async fn update_entry(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEntryRequest>,
) -> Result<Json<ScheduleEntry>, AppError> {
    let updated = dockflow_db::repositories::schedule::update_entry(&state.db_pool, &id, &payload)
        .await
        .map_err(DockError::Database)?
        .ok_or_else(|| DockError::NotFound(format!("Schedule entry with ID {id} not found")))?;

    Ok(Json(updated.into_entry()))
}

#[axum::debug_handler]
pub async fn delete_entry(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = dockflow_db::repositories::schedule::delete_entry(&state.db_pool, &id)
        .await
        .map_err(DockError::Database)?;

    if !deleted {
        return Err(AppError(DockError::NotFound(format!(
            "Schedule entry with ID {id} not found"
        ))));
    }

    Ok(Json(DeleteResponse { success: true }))
}

/// Bulk delete for one calendar date.
#[axum::debug_handler]
pub async fn delete_entries_by_date(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<CreateEntriesResponse>, AppError> {
    let date = query.date.ok_or_else(|| {
        DockError::Validation("A date query parameter is required for bulk delete".to_string())
    })?;

    let count = dockflow_db::repositories::schedule::delete_entries_by_date(&state.db_pool, &date)
        .await
        .map_err(DockError::Database)?;

    Ok(Json(CreateEntriesResponse {
        success: true,
        count: count as usize,
    }))
}
