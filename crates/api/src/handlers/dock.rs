use axum::{
    extract::{Path, State},
    Json,
};
use dockflow_core::{
    docks::{self, DockStatus},
    errors::DockError,
    models::entry::ScheduleEntry,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Serialize)]
pub struct DockOverview {
    pub number: u32,
    pub label: String,
    pub status: DockStatus,
    pub occupied: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetDockStatusRequest {
    pub status: DockStatus,
}

/// Registry statuses plus an occupancy snapshot derived from the live
/// entry collection. Stale by definition the moment it is returned.
#[axum::debug_handler]
pub async fn list_docks(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<DockOverview>>, AppError> {
    let rows = dockflow_db::repositories::schedule::list_entries(&state.db_pool, None)
        .await
        .map_err(DockError::Database)?;
    let entries: Vec<ScheduleEntry> = rows.into_iter().map(|row| row.into_entry()).collect();
    let occupied = docks::occupied_docks(&entries);

    let registry = state.docks.lock().await;
    let overview = registry
        .statuses()
        .iter()
        .map(|(&number, &status)| DockOverview {
            number,
            label: docks::dock_label(number),
            status,
            occupied: occupied.contains(&number),
        })
        .collect();

    Ok(Json(overview))
}

/// Edit-mode toggle for a bay.
#[axum::debug_handler]
pub async fn set_dock_status(
    State(state): State<Arc<ApiState>>,
    Path(number): Path<u32>,
    Json(payload): Json<SetDockStatusRequest>,
) -> Result<Json<DockOverview>, AppError> {
    {
        let mut registry = state.docks.lock().await;
        registry.set_status(number, payload.status)?;
    }

    let rows = dockflow_db::repositories::schedule::list_entries(&state.db_pool, None)
        .await
        .map_err(DockError::Database)?;
    let entries: Vec<ScheduleEntry> = rows.into_iter().map(|row| row.into_entry()).collect();

    Ok(Json(DockOverview {
        number,
        label: docks::dock_label(number),
        status: payload.status,
        occupied: docks::occupied_docks(&entries).contains(&number),
    }))
}
