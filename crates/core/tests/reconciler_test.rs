use dockflow_core::docks::{DockRegistry, DockStatus};
use dockflow_core::errors::DockError;
use dockflow_core::ledger::{LocationLedger, MemoryLedgerStore, SeedPolicy};
use dockflow_core::models::entry::{EntryStatus, ScheduleEntry, ServiceKind};
use dockflow_core::models::location::{Location, LocationStatus};
use dockflow_core::reconciler::{entry_phase, used_slots, EntryPhase, Reconciler};
use pretty_assertions::assert_eq;

fn entry(id: &str) -> ScheduleEntry {
    ScheduleEntry {
        id: id.to_string(),
        date: "2025-10-15".to_string(),
        appointment_time: "10:30 AM".to_string(),
        dock: String::new(),
        location: Location::Stage,
        client: "HBL-1".to_string(),
        reference: "CNTR-1".to_string(),
        note: String::new(),
        check_in_time: String::new(),
        kind: ServiceKind::Pack,
        status: EntryStatus::Free,
    }
}

fn checked_in(id: &str) -> ScheduleEntry {
    let mut e = entry(id);
    e.check_in_time = "08:15".to_string();
    e
}

fn docked(id: &str, dock: &str) -> ScheduleEntry {
    let mut e = checked_in(id);
    e.dock = dock.to_string();
    e
}

fn open_ledger() -> LocationLedger<MemoryLedgerStore> {
    LocationLedger::seeded(MemoryLedgerStore::new(), &SeedPolicy::AllAvailable)
}

#[test]
fn test_entry_phase_progression() {
    assert_eq!(entry_phase(&entry("a")), EntryPhase::NoCheckIn);
    assert_eq!(entry_phase(&checked_in("a")), EntryPhase::CheckedInNoDock);
    assert_eq!(entry_phase(&docked("a", "DOCK-04")), EntryPhase::DockAssigned);

    let mut located = docked("a", "DOCK-04");
    located.location = Location::Slot("B-5".to_string());
    assert_eq!(entry_phase(&located), EntryPhase::DockAssignedLocationSet);
}

#[test]
fn test_used_slots_excludes_stage() {
    let mut a = docked("a", "DOCK-04");
    a.location = Location::Slot("B-5".to_string());
    let b = docked("b", "DOCK-06");

    let used = used_slots(&[a, b]);
    assert_eq!(used.into_iter().collect::<Vec<_>>(), vec!["B-5".to_string()]);
}

#[test]
fn test_assign_dock_success_and_idempotence() {
    let mut ledger = open_ledger();
    let registry = DockRegistry::new();
    let reconciler = Reconciler::new(&mut ledger, &registry);

    let entries = vec![checked_in("a")];
    let assignment = reconciler.assign_dock(&entries, "a", 4).unwrap();
    assert_eq!(assignment.dock, "DOCK-04");
    assert!(assignment.changed);

    // Re-assigning the dock the entry already holds is a no-op
    let entries = vec![docked("a", "DOCK-04")];
    let repeat = reconciler.assign_dock(&entries, "a", 4).unwrap();
    assert_eq!(repeat.dock, "DOCK-04");
    assert!(!repeat.changed);
}

#[test]
fn test_assign_dock_refused_without_check_in() {
    let mut ledger = open_ledger();
    let registry = DockRegistry::new();
    let reconciler = Reconciler::new(&mut ledger, &registry);

    // Refused regardless of dock availability
    let entries = vec![entry("a")];
    let err = reconciler.assign_dock(&entries, "a", 4).unwrap_err();
    assert!(matches!(err, DockError::NotCheckedIn(_)));
}

#[test]
fn test_assign_dock_refused_when_occupied() {
    let mut ledger = open_ledger();
    let registry = DockRegistry::new();
    let reconciler = Reconciler::new(&mut ledger, &registry);

    let entries = vec![docked("a", "DOCK-04"), checked_in("b")];
    let err = reconciler.assign_dock(&entries, "b", 4).unwrap_err();
    assert!(matches!(err, DockError::DockUnavailable(_)));

    // A bare numeric label claims the dock just the same
    let entries = vec![docked("a", "4"), checked_in("b")];
    let err = reconciler.assign_dock(&entries, "b", 4).unwrap_err();
    assert!(matches!(err, DockError::DockUnavailable(_)));
}

#[test]
fn test_assign_dock_refused_when_disabled() {
    let mut ledger = open_ledger();
    let mut registry = DockRegistry::new();
    registry.set_status(6, DockStatus::Disabled).unwrap();
    let reconciler = Reconciler::new(&mut ledger, &registry);

    let entries = vec![checked_in("a")];
    let err = reconciler.assign_dock(&entries, "a", 6).unwrap_err();
    assert!(matches!(err, DockError::DockUnavailable(_)));
}

#[test]
fn test_assign_dock_rejected_when_entry_holds_another_dock() {
    let mut ledger = open_ledger();
    let registry = DockRegistry::new();
    let reconciler = Reconciler::new(&mut ledger, &registry);

    // Switching docks is not a transition the flow offers
    let entries = vec![docked("a", "DOCK-06")];
    let err = reconciler.assign_dock(&entries, "a", 4).unwrap_err();
    assert!(matches!(err, DockError::Validation(_)));
}

#[test]
fn test_assign_dock_unknown_number_rejected() {
    let mut ledger = open_ledger();
    let registry = DockRegistry::new();
    let reconciler = Reconciler::new(&mut ledger, &registry);

    let entries = vec![checked_in("a")];
    let err = reconciler.assign_dock(&entries, "a", 5).unwrap_err();
    assert!(matches!(err, DockError::Validation(_)));
}

#[test]
fn test_assign_dock_missing_entry() {
    let mut ledger = open_ledger();
    let registry = DockRegistry::new();
    let reconciler = Reconciler::new(&mut ledger, &registry);

    let err = reconciler.assign_dock(&[], "ghost", 4).unwrap_err();
    assert!(matches!(err, DockError::NotFound(_)));
}

#[test]
fn test_location_change_requires_dock() {
    let mut ledger = open_ledger();
    let registry = DockRegistry::new();
    let reconciler = Reconciler::new(&mut ledger, &registry);

    let entries = vec![entry("a")];
    assert!(matches!(
        reconciler.authorize_location_change(&entries, "a"),
        Err(DockError::Validation(_))
    ));

    let entries = vec![checked_in("a")];
    assert!(matches!(
        reconciler.authorize_location_change(&entries, "a"),
        Err(DockError::Validation(_))
    ));

    let entries = vec![docked("a", "DOCK-04")];
    let old = reconciler.authorize_location_change(&entries, "a").unwrap();
    assert_eq!(old, Location::Stage);
}

#[test]
fn test_change_location_claims_and_releases() {
    tokio_test::block_on(async {
        let mut ledger = open_ledger();
        let registry = DockRegistry::new();
        let mut reconciler = Reconciler::new(&mut ledger, &registry);

        // a moves from stage to B-5
        let mut a = docked("a", "DOCK-04");
        a.location = Location::Slot("B-5".to_string());
        let entries_after = vec![a.clone()];
        reconciler
            .change_location(&entries_after, &Location::Stage, &a.location.clone())
            .await;
        assert_eq!(ledger.status("B-5"), Some(LocationStatus::Disabled));

        // a moves on to C-7; B-5 is unreferenced and frees up
        let mut reconciler = Reconciler::new(&mut ledger, &registry);
        let mut moved = a.clone();
        moved.location = Location::Slot("C-7".to_string());
        let entries_after = vec![moved.clone()];
        reconciler
            .change_location(
                &entries_after,
                &Location::Slot("B-5".to_string()),
                &moved.location.clone(),
            )
            .await;
        assert_eq!(ledger.status("C-7"), Some(LocationStatus::Disabled));
        assert_eq!(ledger.status("B-5"), Some(LocationStatus::Available));
    });
}

#[test]
fn test_change_location_keeps_shared_slot_disabled() {
    tokio_test::block_on(async {
        let mut ledger = open_ledger();
        let registry = DockRegistry::new();

        // Two entries end up pointing at B-5
        let mut a = docked("a", "DOCK-04");
        a.location = Location::Slot("B-5".to_string());
        let mut b = docked("b", "DOCK-06");
        b.location = Location::Slot("B-5".to_string());

        let mut reconciler = Reconciler::new(&mut ledger, &registry);
        reconciler
            .change_location(&[a.clone(), b.clone()], &Location::Stage, &a.location.clone())
            .await;
        assert_eq!(ledger.status("B-5"), Some(LocationStatus::Disabled));

        // a moves away; b still references B-5, so the slot stays taken
        let mut moved = a.clone();
        moved.location = Location::Slot("C-7".to_string());
        let entries_after = vec![moved.clone(), b];

        let mut reconciler = Reconciler::new(&mut ledger, &registry);
        reconciler
            .change_location(
                &entries_after,
                &Location::Slot("B-5".to_string()),
                &moved.location.clone(),
            )
            .await;
        assert_eq!(ledger.status("C-7"), Some(LocationStatus::Disabled));
        assert_eq!(ledger.status("B-5"), Some(LocationStatus::Disabled));
    });
}

#[test]
fn test_stage_never_touches_ledger() {
    tokio_test::block_on(async {
        let store = MemoryLedgerStore::new();
        let mut ledger =
            LocationLedger::seeded(store.clone(), &SeedPolicy::AllAvailable);
        let registry = DockRegistry::new();
        let mut reconciler = Reconciler::new(&mut ledger, &registry);

        let entries_after = vec![docked("a", "DOCK-04")];
        reconciler
            .change_location(&entries_after, &Location::Stage, &Location::Stage)
            .await;

        assert_eq!(ledger.available_slots().len(), ledger.statuses().len());
        // No mutation means no save either
        assert_eq!(store.saved(), None);
    });
}

#[test]
fn test_cancel_check_in_releases_slot() {
    tokio_test::block_on(async {
        let mut ledger = open_ledger();
        let registry = DockRegistry::new();

        let mut a = docked("a", "DOCK-04");
        a.location = Location::Slot("B-5".to_string());
        let mut reconciler = Reconciler::new(&mut ledger, &registry);
        reconciler
            .change_location(&[a.clone()], &Location::Stage, &a.location.clone())
            .await;
        assert_eq!(ledger.status("B-5"), Some(LocationStatus::Disabled));

        // Cancelling restores NoCheckIn fully; the entry collection no
        // longer references B-5
        let mut cancelled = a.clone();
        cancelled.check_in_time.clear();
        cancelled.dock.clear();
        cancelled.location = Location::Stage;
        let entries_after = vec![cancelled];

        let mut reconciler = Reconciler::new(&mut ledger, &registry);
        reconciler
            .cancel_check_in(&entries_after, &Location::Slot("B-5".to_string()))
            .await;
        assert_eq!(ledger.status("B-5"), Some(LocationStatus::Available));
    });
}

#[test]
fn test_sync_ledger_never_reenables() {
    tokio_test::block_on(async {
        let mut ledger = open_ledger();
        let registry = DockRegistry::new();

        let mut reconciler = Reconciler::new(&mut ledger, &registry);
        let mut a = docked("a", "DOCK-04");
        a.location = Location::Slot("B-5".to_string());
        reconciler.sync_ledger(&[a]).await;
        assert_eq!(ledger.status("B-5"), Some(LocationStatus::Disabled));

        // The entry went away without a location change; the sweep does
        // not hand the slot back
        let mut reconciler = Reconciler::new(&mut ledger, &registry);
        reconciler.sync_ledger(&[]).await;
        assert_eq!(ledger.status("B-5"), Some(LocationStatus::Disabled));
    });
}
