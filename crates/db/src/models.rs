use chrono::{DateTime, Utc};
use dockflow_core::models::entry::{EntryStatus, ScheduleEntry, ServiceKind};
use dockflow_core::models::location::Location;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row form of a schedule entry. Kind, status, and location are kept
/// as plain text in the table and mapped through the tolerant core
/// parsers on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleEntry {
    pub id: String,
    pub date: String,
    pub appointment_time: String,
    pub dock: String,
    pub location: String,
    pub client: String,
    pub reference: String,
    pub note: String,
    pub check_in_time: String,
    pub kind: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl DbScheduleEntry {
    pub fn into_entry(self) -> ScheduleEntry {
        ScheduleEntry {
            id: self.id,
            date: self.date,
            appointment_time: self.appointment_time,
            dock: self.dock,
            location: Location::parse(&self.location),
            client: self.client,
            reference: self.reference,
            note: self.note,
            check_in_time: self.check_in_time,
            kind: ServiceKind::parse(&self.kind),
            status: EntryStatus::parse(&self.status),
        }
    }
}
