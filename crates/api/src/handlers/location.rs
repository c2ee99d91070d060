use axum::{
    extract::{Path, State},
    Json,
};
use dockflow_core::ledger::LedgerMap;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Full slot-to-status mapping.
#[axum::debug_handler]
pub async fn get_locations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<LedgerMap>, AppError> {
    let ledger = state.ledger.lock().await;
    Ok(Json(ledger.statuses().clone()))
}

/// Available slot ids, lexicographically sorted.
#[axum::debug_handler]
pub async fn available_locations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<String>>, AppError> {
    let ledger = state.ledger.lock().await;
    Ok(Json(ledger.available_slots()))
}

/// Manual edit-mode toggle for one slot. Returns the full updated
/// mapping, like every other ledger mutation.
#[axum::debug_handler]
pub async fn toggle_location(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<LedgerMap>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let statuses = ledger.toggle(&id).await;
    Ok(Json(statuses.clone()))
}

/// Reinitializes the whole ledger from the configured seed.
#[axum::debug_handler]
pub async fn reset_locations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<LedgerMap>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let statuses = ledger.reset(&state.ledger_seed).await;
    Ok(Json(statuses.clone()))
}
