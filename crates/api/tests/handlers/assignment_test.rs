use dockflow_api::middleware::error_handling::AppError;
use dockflow_core::docks::DockRegistry;
use dockflow_core::errors::DockError;
use dockflow_core::ledger::{LocationLedger, MemoryLedgerStore, SeedPolicy};
use dockflow_core::models::entry::ScheduleEntry;
use dockflow_core::models::location::{Location, LocationStatus};
use dockflow_core::reconciler::Reconciler;
use mockall::predicate;
use pretty_assertions::assert_eq;

use crate::test_utils::{checked_in_db_entry, db_entry, TestContext};

// Mirrors the assign-dock handler: reconciler decision first, then the
// repository write only when something changed
async fn test_assign_dock_wrapper(
    ctx: &TestContext,
    ledger: &mut LocationLedger<MemoryLedgerStore>,
    docks: &DockRegistry,
    entries: &[ScheduleEntry],
    id: &'static str,
    dock: u32,
) -> Result<String, AppError> {
    let assignment = Reconciler::new(ledger, docks).assign_dock(entries, id, dock)?;
    if !assignment.changed {
        return Ok(assignment.dock);
    }

    let label: &'static str = Box::leak(assignment.dock.clone().into_boxed_str());
    ctx.schedule_repo
        .set_assignment_fields(id, Some(label), None, None)
        .await
        .map_err(DockError::Database)?;
    Ok(assignment.dock)
}

fn open_ledger() -> LocationLedger<MemoryLedgerStore> {
    LocationLedger::seeded(MemoryLedgerStore::new(), &SeedPolicy::AllAvailable)
}

#[tokio::test]
async fn test_assign_dock_writes_canonical_label() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_set_assignment_fields()
        .with(
            predicate::eq("e-1"),
            predicate::eq(Some("DOCK-04")),
            predicate::eq(None),
            predicate::eq(None),
        )
        .returning(|id, _, _, _| {
            let mut row = checked_in_db_entry(id, "2025-10-15");
            row.dock = "DOCK-04".to_string();
            Ok(Some(row))
        });

    let mut ledger = open_ledger();
    let docks = DockRegistry::new();
    let entries = vec![checked_in_db_entry("e-1", "2025-10-15").into_entry()];

    let label = test_assign_dock_wrapper(&ctx, &mut ledger, &docks, &entries, "e-1", 4)
        .await
        .unwrap();
    assert_eq!(label, "DOCK-04");
}

#[tokio::test]
async fn test_assign_dock_occupied_never_touches_repo() {
    // No expectation set: any repository call would panic the mock
    let ctx = TestContext::new();
    let mut ledger = open_ledger();
    let docks = DockRegistry::new();

    let mut holder = checked_in_db_entry("e-1", "2025-10-15").into_entry();
    holder.dock = "DOCK-04".to_string();
    let requester = checked_in_db_entry("e-2", "2025-10-15").into_entry();
    let entries = vec![holder, requester];

    let err = test_assign_dock_wrapper(&ctx, &mut ledger, &docks, &entries, "e-2", 4)
        .await
        .unwrap_err();
    assert!(matches!(err.0, DockError::DockUnavailable(_)));
}

#[tokio::test]
async fn test_assign_dock_requires_check_in() {
    let ctx = TestContext::new();
    let mut ledger = open_ledger();
    let docks = DockRegistry::new();
    let entries = vec![db_entry("e-1", "2025-10-15").into_entry()];

    let err = test_assign_dock_wrapper(&ctx, &mut ledger, &docks, &entries, "e-1", 4)
        .await
        .unwrap_err();
    assert!(matches!(err.0, DockError::NotCheckedIn(_)));
}

#[tokio::test]
async fn test_assign_dock_idempotent_skips_write() {
    // Entry already holds DOCK-04; no repository write happens
    let ctx = TestContext::new();
    let mut ledger = open_ledger();
    let docks = DockRegistry::new();

    let mut entry = checked_in_db_entry("e-1", "2025-10-15").into_entry();
    entry.dock = "DOCK-04".to_string();
    let entries = vec![entry];

    let label = test_assign_dock_wrapper(&ctx, &mut ledger, &docks, &entries, "e-1", 4)
        .await
        .unwrap();
    assert_eq!(label, "DOCK-04");
}

#[tokio::test]
async fn test_location_flow_updates_ledger() {
    let mut ledger = open_ledger();
    let docks = DockRegistry::new();

    // Docked entry moves stage -> B-5
    let mut entry = checked_in_db_entry("e-1", "2025-10-15").into_entry();
    entry.dock = "DOCK-04".to_string();

    let old = Reconciler::new(&mut ledger, &docks)
        .authorize_location_change(std::slice::from_ref(&entry), "e-1")
        .unwrap();
    assert_eq!(old, Location::Stage);

    entry.location = Location::Slot("B-5".to_string());
    let entries_after = vec![entry.clone()];
    Reconciler::new(&mut ledger, &docks)
        .change_location(&entries_after, &old, &entry.location.clone())
        .await;

    assert_eq!(ledger.status("B-5"), Some(LocationStatus::Disabled));

    // Cancelling the check-in afterwards frees the slot again
    let mut cancelled = entry.clone();
    cancelled.check_in_time.clear();
    cancelled.dock.clear();
    cancelled.location = Location::Stage;
    Reconciler::new(&mut ledger, &docks)
        .cancel_check_in(&[cancelled], &entry.location.clone())
        .await;

    assert_eq!(ledger.status("B-5"), Some(LocationStatus::Available));
}
