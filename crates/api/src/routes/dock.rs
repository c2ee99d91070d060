use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/docks", get(handlers::dock::list_docks))
        .route(
            "/api/docks/:number/status",
            put(handlers::dock::set_dock_status),
        )
}
