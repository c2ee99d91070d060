use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedules",
            get(handlers::schedule::list_entries)
                .post(handlers::schedule::create_entries)
                .delete(handlers::schedule::delete_entries_by_date),
        )
        .route("/api/schedules/import", post(handlers::schedule::import_entries))
        .route(
            "/api/schedules/import/preview",
            post(handlers::schedule::preview_import),
        )
        .route("/api/schedules/:id", put(handlers::schedule::update_entry))
        .route("/api/schedules/:id", delete(handlers::schedule::delete_entry))
        .route(
            "/api/schedules/:id/check-in",
            post(handlers::assignment::check_in).delete(handlers::assignment::cancel_check_in),
        )
        .route("/api/schedules/:id/dock", post(handlers::assignment::assign_dock))
        .route(
            "/api/schedules/:id/location",
            post(handlers::assignment::change_location),
        )
}
