//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the
//! dockflow API. It maps domain-specific errors to appropriate HTTP
//! status codes and JSON error responses, ensuring a consistent error
//! handling experience across the entire API.
//!
//! The implementation is based on Axum's error handling mechanisms and
//! integrates with dockflow's domain error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dockflow_core::errors::DockError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific [`DockError`] instances and
/// implements `IntoResponse` to convert them into HTTP responses with
/// appropriate status codes and JSON payloads. Refused assignments map
/// to 409 so a client can tell "taken" apart from "bad request".
#[derive(Debug)]
pub struct AppError(pub DockError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            DockError::NotFound(_) => StatusCode::NOT_FOUND,
            DockError::Validation(_) => StatusCode::BAD_REQUEST,
            DockError::ParseFailure(_) => StatusCode::BAD_REQUEST,
            DockError::NotCheckedIn(_) => StatusCode::CONFLICT,
            DockError::DockUnavailable(_) => StatusCode::CONFLICT,
            DockError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DockError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from DockError to AppError
///
/// This implementation allows using `?` operator with functions that
/// return `Result<T, DockError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<DockError> for AppError {
    fn from(err: DockError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Repository functions report failures as `eyre::Report`; wrapping
/// them in [`DockError::Database`] keeps handler bodies on the `?`
/// operator.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(DockError::Database(err))
    }
}

/// Maps a DockError to an HTTP response
pub fn map_error(err: DockError) -> Response {
    AppError(err).into_response()
}
