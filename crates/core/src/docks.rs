//! Dock registry and the derived occupancy index.
//!
//! Docks are physical unloading bays identified by even numbers in
//! two ranges. Occupancy is never stored; it is recomputed from the
//! live entry collection, so callers treat the result as a snapshot
//! valid only at call time.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::{DockError, DockResult};
use crate::models::entry::ScheduleEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockStatus {
    Available,
    Disabled,
}

/// Valid bay numbers: evens 4..=32 and 60..=70.
pub fn dock_numbers() -> Vec<u32> {
    (4..=32).step_by(2).chain((60..=70).step_by(2)).collect()
}

/// Canonical label form, zero-padded to two digits.
pub fn dock_label(number: u32) -> String {
    format!("DOCK-{number:02}")
}

/// Extracts a dock number from a label: either `DOCK-<digits>` or a
/// bare digit string. Anything else is simply not a dock reference.
pub fn parse_dock_label(label: &str) -> Option<u32> {
    let trimmed = label.trim();
    let digits = trimmed.strip_prefix("DOCK-").unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Dock numbers currently claimed by entries. Unparsable labels are
/// excluded, not an error.
pub fn occupied_docks(entries: &[ScheduleEntry]) -> BTreeSet<u32> {
    entries
        .iter()
        .filter(|entry| entry.has_dock())
        .filter_map(|entry| parse_dock_label(&entry.dock))
        .collect()
}

/// Session-scoped status record for the bays, togglable in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockRegistry {
    statuses: BTreeMap<u32, DockStatus>,
}

impl DockRegistry {
    pub fn new() -> Self {
        Self {
            statuses: dock_numbers()
                .into_iter()
                .map(|number| (number, DockStatus::Available))
                .collect(),
        }
    }

    pub fn contains(&self, number: u32) -> bool {
        self.statuses.contains_key(&number)
    }

    pub fn is_disabled(&self, number: u32) -> bool {
        self.statuses.get(&number) == Some(&DockStatus::Disabled)
    }

    pub fn statuses(&self) -> &BTreeMap<u32, DockStatus> {
        &self.statuses
    }

    pub fn set_status(&mut self, number: u32, status: DockStatus) -> DockResult<()> {
        match self.statuses.get_mut(&number) {
            Some(slot) => {
                *slot = status;
                Ok(())
            }
            None => Err(DockError::NotFound(format!("Dock {number}"))),
        }
    }
}

impl Default for DockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
