//! # Dockflow API
//!
//! The API crate provides the web server implementation for the dockflow
//! inbound scheduling service. It defines RESTful endpoints for managing
//! schedule entries, dock assignments, and warehouse locations.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database
//! interactions. The location ledger lives in memory behind a mutex and
//! persists through the database-backed [`PgLedgerStore`]; the same
//! mutex serializes every assignment-affecting mutation, which is what
//! stands in for the single-operator discipline the workflow assumes.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for logging and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use dockflow_core::docks::DockRegistry;
use dockflow_core::ledger::{LocationLedger, SeedPolicy};
use dockflow_db::repositories::ledger::PgLedgerStore;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Locking `ledger` is the concurrency discipline for the whole
/// assignment surface: any handler that mutates docks, locations, or
/// check-ins holds it across the database write and the ledger side
/// effects, so at most one such mutation is in flight.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Location ledger, authoritative in memory for the session
    pub ledger: Mutex<LocationLedger<PgLedgerStore>>,
    /// Session-scoped dock statuses, togglable in edit mode
    pub docks: Mutex<DockRegistry>,
    /// Seed used when the ledger is reset
    pub ledger_seed: SeedPolicy,
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, loads the location ledger,
/// configures routes, and starts the HTTP server.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load the location ledger, falling back to a fresh seed
    let store = PgLedgerStore::new(db_pool.clone());
    let ledger = LocationLedger::load_or_seed(store, &config.ledger_seed).await;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        ledger: Mutex::new(ledger),
        docks: Mutex::new(DockRegistry::new()),
        ledger_seed: config.ledger_seed.clone(),
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Schedule entry management endpoints
        .merge(routes::schedule::routes())
        // Location ledger endpoints
        .merge(routes::location::routes())
        // Dock registry endpoints
        .merge(routes::dock::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
