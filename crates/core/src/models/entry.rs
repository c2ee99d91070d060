use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::Location;

/// Two-category classification carried from the import sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    Cell,
    Pack,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Cell => "Cell",
            ServiceKind::Pack => "Pack",
        }
    }

    /// Tolerant mapping: any value naming "Cell" counts as `Cell`,
    /// everything else is `Pack`.
    pub fn parse(raw: &str) -> Self {
        if raw.contains("Cell") {
            ServiceKind::Cell
        } else {
            ServiceKind::Pack
        }
    }
}

/// Operational status tag, used only as a colored indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Free,
    Unloading,
    Hold,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Free => "free",
            EntryStatus::Unloading => "unloading",
            EntryStatus::Hold => "hold",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "unloading" => EntryStatus::Unloading,
            "hold" => EntryStatus::Hold,
            _ => EntryStatus::Free,
        }
    }
}

/// One inbound appointment.
///
/// `dock` holds the canonical `DOCK-NN` label or is empty when
/// unassigned. `check_in_time` is `HH:MM` or empty when the driver has
/// not arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Display string, e.g. `"10:30 AM"`
    pub appointment_time: String,
    #[serde(default)]
    pub dock: String,
    #[serde(default)]
    pub location: Location,
    pub client: String,
    pub reference: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub check_in_time: String,
    pub kind: ServiceKind,
    #[serde(default)]
    pub status: EntryStatus,
}

impl ScheduleEntry {
    pub fn is_checked_in(&self) -> bool {
        !self.check_in_time.trim().is_empty()
    }

    pub fn has_dock(&self) -> bool {
        !self.dock.trim().is_empty()
    }
}

/// Payload item for bulk creation; ids are minted server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScheduleEntry {
    pub date: String,
    pub appointment_time: String,
    pub client: String,
    pub reference: String,
    #[serde(default)]
    pub note: String,
    pub kind: ServiceKind,
    #[serde(default)]
    pub location: Location,
}

impl NewScheduleEntry {
    pub fn into_entry(self) -> ScheduleEntry {
        ScheduleEntry {
            id: Uuid::new_v4().to_string(),
            date: self.date,
            appointment_time: self.appointment_time,
            dock: String::new(),
            location: self.location,
            client: self.client,
            reference: self.reference,
            note: self.note,
            check_in_time: String::new(),
            kind: self.kind,
            status: EntryStatus::Free,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntriesRequest {
    pub schedules: Vec<NewScheduleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntriesResponse {
    pub success: bool,
    pub count: usize,
}

/// Partial field update. Dock, location, and check-in changes go
/// through the dedicated assignment endpoints so the reconciler sees
/// every transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    pub date: Option<String>,
    pub appointment_time: Option<String>,
    pub client: Option<String>,
    pub reference: Option<String>,
    pub note: Option<String>,
    pub kind: Option<ServiceKind>,
    pub status: Option<EntryStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    /// Explicit `HH:MM` override; the server clock is used when absent.
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignDockRequest {
    pub dock: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLocationRequest {
    pub location: Location,
}
