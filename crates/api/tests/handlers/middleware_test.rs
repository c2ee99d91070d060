use axum::http::StatusCode;
use axum::response::IntoResponse;
use dockflow_api::middleware::error_handling::{map_error, AppError};
use dockflow_core::errors::DockError;
use pretty_assertions::assert_eq;

#[test]
fn test_status_code_mapping() {
    let cases = vec![
        (
            DockError::NotFound("entry".to_string()),
            StatusCode::NOT_FOUND,
        ),
        (
            DockError::Validation("bad".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            DockError::ParseFailure("cell".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            DockError::NotCheckedIn("entry".to_string()),
            StatusCode::CONFLICT,
        ),
        (
            DockError::DockUnavailable("dock 4".to_string()),
            StatusCode::CONFLICT,
        ),
        (
            DockError::Database(eyre::eyre!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = AppError(error).into_response();
        assert_eq!(response.status(), expected);
    }
}

#[test]
fn test_error_body_is_json() {
    tokio_test::block_on(async {
        let response = map_error(DockError::DockUnavailable("Dock 4 is already assigned".into()));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"],
            "Dock unavailable: Dock 4 is already assigned"
        );
    });
}

#[test]
fn test_from_conversions() {
    let app_error: AppError = DockError::NotFound("x".to_string()).into();
    assert!(matches!(app_error.0, DockError::NotFound(_)));

    let app_error: AppError = eyre::eyre!("db down").into();
    assert!(matches!(app_error.0, DockError::Database(_)));
}
