use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/locations", get(handlers::location::get_locations))
        .route(
            "/api/locations/available",
            get(handlers::location::available_locations),
        )
        .route("/api/locations/reset", post(handlers::location::reset_locations))
        .route(
            "/api/locations/:id/toggle",
            post(handlers::location::toggle_location),
        )
}
