use axum::{
    extract::{Path, State},
    Json,
};
use dockflow_core::{
    errors::DockError,
    models::entry::{AssignDockRequest, ChangeLocationRequest, CheckInRequest, ScheduleEntry},
    models::location::Location,
    reconciler::Reconciler,
    timeparse,
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

async fn load_entries(state: &ApiState) -> Result<Vec<ScheduleEntry>, AppError> {
    let rows = dockflow_db::repositories::schedule::list_entries(&state.db_pool, None)
        .await
        .map_err(DockError::Database)?;
    Ok(rows.into_iter().map(|row| row.into_entry()).collect())
}

fn not_found(id: &str) -> DockError {
    DockError::NotFound(format!("Schedule entry with ID {id} not found"))
}

/// Records a driver's arrival. The server clock is used unless the
/// payload carries an explicit `HH:MM` override (the check-in desk
/// occasionally backfills a missed arrival).
#[axum::debug_handler]
pub async fn check_in(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<CheckInRequest>,
) -> Result<Json<ScheduleEntry>, AppError> {
    let time = match payload.time {
        Some(time) => {
            let time = time.trim().to_string();
            if !timeparse::is_clock_time(&time) {
                return Err(AppError(DockError::Validation(format!(
                    "Invalid check-in time: {time}"
                ))));
            }
            time
        }
        None => chrono::Local::now().format("%H:%M").to_string(),
    };

    let _guard = state.ledger.lock().await;
    let updated = dockflow_db::repositories::schedule::set_assignment_fields(
        &state.db_pool,
        &id,
        None,
        None,
        Some(time.as_str()),
    )
    .await
    .map_err(DockError::Database)?
    .ok_or_else(|| not_found(&id))?;

    tracing::info!("Entry {id} checked in at {time}");
    Ok(Json(updated.into_entry()))
}

/// Cancels a check-in, restoring the entry to the not-arrived state:
/// check-in time cleared, dock released, location reset to stage. The
/// slot the entry held goes back to available unless another entry
/// still references it.
#[axum::debug_handler]
pub async fn cancel_check_in(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ScheduleEntry>, AppError> {
    let mut ledger = state.ledger.lock().await;

    let current = dockflow_db::repositories::schedule::get_entry_by_id(&state.db_pool, &id)
        .await
        .map_err(DockError::Database)?
        .ok_or_else(|| not_found(&id))?
        .into_entry();
    let released = current.location.clone();

    let updated = dockflow_db::repositories::schedule::set_assignment_fields(
        &state.db_pool,
        &id,
        Some(""),
        Some(Location::Stage.as_str()),
        Some(""),
    )
    .await
    .map_err(DockError::Database)?
    .ok_or_else(|| not_found(&id))?;

    // Ledger side effects run against the post-mutation collection
    let entries_after = load_entries(&state).await?;
    let docks = state.docks.lock().await;
    Reconciler::new(&mut ledger, &docks)
        .cancel_check_in(&entries_after, &released)
        .await;

    tracing::info!("Cancelled check-in for entry {id}");
    Ok(Json(updated.into_entry()))
}

/// Assigns a dock to a checked-in entry. Refused with 409 when the
/// dock is already claimed or disabled.
#[axum::debug_handler]
pub async fn assign_dock(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<AssignDockRequest>,
) -> Result<Json<ScheduleEntry>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let docks = state.docks.lock().await;

    let entries = load_entries(&state).await?;
    let assignment = Reconciler::new(&mut ledger, &docks).assign_dock(&entries, &id, payload.dock)?;

    if !assignment.changed {
        // The entry already holds this dock; nothing to write
        let entry = entries
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| not_found(&id))?;
        return Ok(Json(entry));
    }

    let updated = dockflow_db::repositories::schedule::set_assignment_fields(
        &state.db_pool,
        &id,
        Some(assignment.dock.as_str()),
        None,
        None,
    )
    .await
    .map_err(DockError::Database)?
    .ok_or_else(|| not_found(&id))?;

    tracing::info!("Assigned {} to entry {id}", assignment.dock);
    Ok(Json(updated.into_entry()))
}

/// Moves an entry to a storage slot (or back to stage). Legal only
/// while the entry holds a dock; the ledger tracks the slot handover.
#[axum::debug_handler]
pub async fn change_location(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<ChangeLocationRequest>,
) -> Result<Json<ScheduleEntry>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let docks = state.docks.lock().await;

    let entries = load_entries(&state).await?;
    let old = Reconciler::new(&mut ledger, &docks).authorize_location_change(&entries, &id)?;
    let new = payload.location;

    let updated = dockflow_db::repositories::schedule::set_assignment_fields(
        &state.db_pool,
        &id,
        None,
        Some(new.as_str()),
        None,
    )
    .await
    .map_err(DockError::Database)?
    .ok_or_else(|| not_found(&id))?;

    // The release decision must see the collection after the move
    let entries_after = load_entries(&state).await?;
    Reconciler::new(&mut ledger, &docks)
        .change_location(&entries_after, &old, &new)
        .await;

    tracing::info!("Entry {id} moved from {old} to {new}");
    Ok(Json(updated.into_entry()))
}
