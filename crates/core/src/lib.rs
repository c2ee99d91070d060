//! # Dockflow Core
//!
//! Domain logic for the dockflow inbound scheduling service: schedule
//! entries, the warehouse location ledger, dock occupancy, and the
//! assignment reconciler that keeps the three in agreement.
//!
//! This crate is deliberately free of any web or database machinery.
//! Persistence is reached only through the [`ledger::LedgerStore`]
//! seam, so every rule in here is testable against an in-memory fake.

/// Dock registry, labels, and the derived occupancy index
pub mod docks;
/// Domain error types shared across all crates
pub mod errors;
/// Spreadsheet-matrix ingestion into schedule entries
pub mod ingest;
/// Location status ledger and its persistence seam
pub mod ledger;
/// Domain models and wire types
pub mod models;
/// Assignment reconciliation between entries, docks, and locations
pub mod reconciler;
/// Spreadsheet date/time cell parsing
pub mod timeparse;
