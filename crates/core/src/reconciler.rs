//! Assignment reconciliation.
//!
//! The reconciler enforces the at-most-one-assignment invariants
//! between schedule entries, docks, and storage slots, and applies
//! the ledger side effects of location changes. It owns neither the
//! entry collection nor the ledger: entries are mutated by the caller
//! through the store, and the ledger is injected.
//!
//! Entry lifecycle, assignment-relevant subset:
//!
//! ```text
//! NoCheckIn -> CheckedInNoDock -> DockAssigned <-> DockAssignedLocationSet
//! ```
//!
//! Dock assignment requires a check-in; location changes require an
//! assigned dock. Cancelling a check-in restores `NoCheckIn` fully:
//! the dock is released and the location reset to stage.

use std::collections::BTreeSet;

use crate::docks::{self, DockRegistry};
use crate::errors::{DockError, DockResult};
use crate::ledger::{LedgerStore, LocationLedger};
use crate::models::entry::ScheduleEntry;
use crate::models::location::{Location, LocationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    NoCheckIn,
    CheckedInNoDock,
    DockAssigned,
    DockAssignedLocationSet,
}

pub fn entry_phase(entry: &ScheduleEntry) -> EntryPhase {
    if !entry.is_checked_in() {
        EntryPhase::NoCheckIn
    } else if !entry.has_dock() {
        EntryPhase::CheckedInNoDock
    } else if entry.location.is_stage() {
        EntryPhase::DockAssigned
    } else {
        EntryPhase::DockAssignedLocationSet
    }
}

/// Storage slots referenced by any entry, the catch-all excluded.
pub fn used_slots(entries: &[ScheduleEntry]) -> BTreeSet<String> {
    entries
        .iter()
        .filter_map(|entry| entry.location.slot())
        .map(str::to_string)
        .collect()
}

fn find_entry<'a>(entries: &'a [ScheduleEntry], entry_id: &str) -> DockResult<&'a ScheduleEntry> {
    entries
        .iter()
        .find(|entry| entry.id == entry_id)
        .ok_or_else(|| DockError::NotFound(format!("Schedule entry with ID {entry_id}")))
}

/// Outcome of a successful dock assignment. `changed` is false when
/// the entry already held the dock, in which case nothing observable
/// happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockAssignment {
    pub dock: String,
    pub changed: bool,
}

pub struct Reconciler<'a, S: LedgerStore> {
    ledger: &'a mut LocationLedger<S>,
    docks: &'a DockRegistry,
}

impl<'a, S: LedgerStore> Reconciler<'a, S> {
    pub fn new(ledger: &'a mut LocationLedger<S>, docks: &'a DockRegistry) -> Self {
        Self { ledger, docks }
    }

    /// Decides a dock assignment for a checked-in entry.
    ///
    /// Preconditions, in order: the entry exists and has checked in,
    /// the dock is a known bay, the dock is not already claimed by any
    /// entry, and the dock is not disabled in the registry. Dock
    /// assignment never claims a storage slot; an entry without a
    /// location keeps the stage catch-all.
    pub fn assign_dock(
        &self,
        entries: &[ScheduleEntry],
        entry_id: &str,
        dock: u32,
    ) -> DockResult<DockAssignment> {
        let entry = find_entry(entries, entry_id)?;

        if !entry.is_checked_in() {
            return Err(DockError::NotCheckedIn(entry_id.to_string()));
        }

        let label = docks::dock_label(dock);
        if entry.dock == label {
            // Re-assigning a held dock is a no-op
            return Ok(DockAssignment {
                dock: label,
                changed: false,
            });
        }
        if entry.has_dock() {
            return Err(DockError::Validation(format!(
                "Entry {entry_id} already holds {}",
                entry.dock
            )));
        }

        if !self.docks.contains(dock) {
            return Err(DockError::Validation(format!("Unknown dock number {dock}")));
        }
        if docks::occupied_docks(entries).contains(&dock) {
            return Err(DockError::DockUnavailable(format!(
                "Dock {dock} is already assigned"
            )));
        }
        if self.docks.is_disabled(dock) {
            return Err(DockError::DockUnavailable(format!("Dock {dock} is disabled")));
        }

        tracing::debug!("Assigning dock {dock} to entry {entry_id}");
        Ok(DockAssignment {
            dock: label,
            changed: true,
        })
    }

    /// Checks that an entry may change location and returns the
    /// location it currently holds. Location changes are only legal
    /// while a dock is held.
    pub fn authorize_location_change(
        &self,
        entries: &[ScheduleEntry],
        entry_id: &str,
    ) -> DockResult<Location> {
        let entry = find_entry(entries, entry_id)?;
        match entry_phase(entry) {
            EntryPhase::DockAssigned | EntryPhase::DockAssignedLocationSet => {
                Ok(entry.location.clone())
            }
            EntryPhase::NoCheckIn | EntryPhase::CheckedInNoDock => Err(DockError::Validation(
                format!("Entry {entry_id} has no assigned dock; location changes require one"),
            )),
        }
    }

    /// Applies the ledger side effects of a location change the caller
    /// has already written into the entry collection. `entries_after`
    /// must be the post-mutation collection, so a slot still in use by
    /// a different entry is never freed prematurely.
    pub async fn change_location(
        &mut self,
        entries_after: &[ScheduleEntry],
        old: &Location,
        new: &Location,
    ) {
        self.claim_slot(new).await;
        self.release_slot(entries_after, old, new).await;
    }

    /// Ledger side effects of cancelling a check-in: the slot the
    /// entry held is released if nothing else references it. The
    /// caller clears check-in time, dock, and location on the entry.
    pub async fn cancel_check_in(
        &mut self,
        entries_after: &[ScheduleEntry],
        released: &Location,
    ) {
        self.release_slot(entries_after, released, &Location::Stage).await;
    }

    /// Self-healing sweep run on each full reload of the schedule
    /// collection: every slot referenced by an entry is forced to
    /// disabled. Slots are never re-enabled opportunistically here.
    pub async fn sync_ledger(&mut self, entries: &[ScheduleEntry]) {
        let used = used_slots(entries);
        self.ledger
            .force_disable(used.iter().map(String::as_str))
            .await;
    }

    async fn claim_slot(&mut self, new: &Location) {
        if let Location::Slot(slot) = new {
            if self.ledger.status(slot) == Some(LocationStatus::Available) {
                self.ledger.toggle(slot).await;
                tracing::debug!("Disabled location: {slot}");
            }
        }
    }

    async fn release_slot(
        &mut self,
        entries_after: &[ScheduleEntry],
        old: &Location,
        new: &Location,
    ) {
        let Location::Slot(old_slot) = old else {
            return;
        };
        if old == new || used_slots(entries_after).contains(old_slot) {
            return;
        }
        if self.ledger.status(old_slot) == Some(LocationStatus::Disabled) {
            self.ledger.toggle(old_slot).await;
            tracing::debug!("Re-enabled location: {old_slot}");
        }
    }
}
