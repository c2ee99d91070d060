use dockflow_core::models::entry::{ScheduleEntry, UpdateEntryRequest};
use mockall::mock;

use crate::models::DbScheduleEntry;

// Mock repositories for testing
mock! {
    pub ScheduleEntryRepo {
        pub async fn list_entries(
            &self,
            date: Option<&'static str>,
        ) -> eyre::Result<Vec<DbScheduleEntry>>;

        pub async fn get_entry_by_id(
            &self,
            id: &'static str,
        ) -> eyre::Result<Option<DbScheduleEntry>>;

        pub async fn create_entries(
            &self,
            entries: Vec<ScheduleEntry>,
        ) -> eyre::Result<u64>;

        pub async fn update_entry(
            &self,
            id: &'static str,
            fields: UpdateEntryRequest,
        ) -> eyre::Result<Option<DbScheduleEntry>>;

        pub async fn set_assignment_fields(
            &self,
            id: &'static str,
            dock: Option<&'static str>,
            location: Option<&'static str>,
            check_in_time: Option<&'static str>,
        ) -> eyre::Result<Option<DbScheduleEntry>>;

        pub async fn delete_entry(
            &self,
            id: &'static str,
        ) -> eyre::Result<bool>;

        pub async fn delete_entries_by_date(
            &self,
            date: &'static str,
        ) -> eyre::Result<u64>;
    }
}
