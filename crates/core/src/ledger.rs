//! Location status ledger.
//!
//! Tracks, per storage slot, whether it is available or disabled. The
//! in-memory map is authoritative for the session; persistence sits
//! behind [`LedgerStore`] so the ledger can be backed by any durable
//! store and tested with an in-memory fake. Failed loads fall back to
//! a fresh seed, failed saves are logged and never unwind state.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::models::location::LocationStatus;

/// Persisted layout: one JSON object of `slot id -> status`.
pub type LedgerMap = BTreeMap<String, LocationStatus>;

/// Persistence seam for the ledger.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// `Ok(None)` means nothing has been persisted yet.
    async fn load(&self) -> eyre::Result<Option<LedgerMap>>;
    async fn save(&self, statuses: &LedgerMap) -> eyre::Result<()>;
}

/// Slot groups: letters A through L, most numbered 1..=28, the J/K/L
/// aisles only 1..=11.
const SLOT_GROUPS: [(char, u32); 12] = [
    ('A', 28),
    ('B', 28),
    ('C', 28),
    ('D', 28),
    ('E', 28),
    ('F', 28),
    ('G', 28),
    ('H', 28),
    ('I', 28),
    ('J', 11),
    ('K', 11),
    ('L', 11),
];

/// Every slot id in the fixed enumeration.
pub fn enumerate_slots() -> Vec<String> {
    let mut slots = Vec::new();
    for (letter, max) in SLOT_GROUPS {
        for number in 1..=max {
            slots.push(format!("{letter}-{number}"));
        }
    }
    slots
}

/// Deterministic initial statuses. Deployments differ: some open a
/// single staging-adjacent slot, some open the whole floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedPolicy {
    SingleAvailable(String),
    AllAvailable,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::SingleAvailable("A-23".to_string())
    }
}

fn seed_map(policy: &SeedPolicy) -> LedgerMap {
    enumerate_slots()
        .into_iter()
        .map(|slot| {
            let status = match policy {
                SeedPolicy::AllAvailable => LocationStatus::Available,
                SeedPolicy::SingleAvailable(open) if *open == slot => LocationStatus::Available,
                SeedPolicy::SingleAvailable(_) => LocationStatus::Disabled,
            };
            (slot, status)
        })
        .collect()
}

pub struct LocationLedger<S: LedgerStore> {
    statuses: LedgerMap,
    store: S,
}

impl<S: LedgerStore> LocationLedger<S> {
    /// A freshly seeded ledger, ignoring anything persisted.
    pub fn seeded(store: S, policy: &SeedPolicy) -> Self {
        Self {
            statuses: seed_map(policy),
            store,
        }
    }

    /// Loads persisted statuses, falling back silently to a fresh seed
    /// when nothing is stored or the read fails.
    pub async fn load_or_seed(store: S, policy: &SeedPolicy) -> Self {
        match store.load().await {
            Ok(Some(statuses)) if !statuses.is_empty() => Self { statuses, store },
            Ok(_) => Self::seeded(store, policy),
            Err(err) => {
                tracing::warn!("Failed to load location statuses, reseeding: {err}");
                Self::seeded(store, policy)
            }
        }
    }

    pub fn statuses(&self) -> &LedgerMap {
        &self.statuses
    }

    pub fn status(&self, slot: &str) -> Option<LocationStatus> {
        self.statuses.get(slot).copied()
    }

    /// All available slots, lexicographically sorted.
    pub fn available_slots(&self) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|(_, status)| **status == LocationStatus::Available)
            .map(|(slot, _)| slot.clone())
            .collect()
    }

    /// Flips a slot between available and disabled and persists the
    /// full mapping. An unknown slot is created disabled, then flipped
    /// to available.
    pub async fn toggle(&mut self, slot: &str) -> &LedgerMap {
        let next = match self.statuses.get(slot) {
            Some(LocationStatus::Available) => LocationStatus::Disabled,
            _ => LocationStatus::Available,
        };
        self.statuses.insert(slot.to_string(), next);
        self.persist().await;
        &self.statuses
    }

    /// Reinitializes every slot from the seed policy and persists.
    pub async fn reset(&mut self, policy: &SeedPolicy) -> &LedgerMap {
        self.statuses = seed_map(policy);
        self.persist().await;
        &self.statuses
    }

    /// Reconciliation sweep: every slot in `used` is forced disabled.
    /// Nothing is ever re-enabled here.
    pub async fn force_disable<'a, I>(&mut self, used: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut changed = false;
        for slot in used {
            if self.statuses.get(slot) != Some(&LocationStatus::Disabled) {
                self.statuses.insert(slot.to_string(), LocationStatus::Disabled);
                tracing::debug!("Auto-disabled location: {slot}");
                changed = true;
            }
        }
        if changed {
            self.persist().await;
        }
    }

    async fn persist(&self) {
        if let Err(err) = self.store.save(&self.statuses).await {
            tracing::error!("Failed to save location statuses: {err}");
        }
    }
}

/// Session-only store for deployments without a database, and the
/// fake used throughout the tests. Clones share the same backing
/// slot, so a test can keep a handle and inspect what was saved.
#[derive(Default, Clone)]
pub struct MemoryLedgerStore {
    saved: Arc<Mutex<Option<LedgerMap>>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully saved mapping, if any.
    pub fn saved(&self) -> Option<LedgerMap> {
        self.saved.lock().expect("ledger store poisoned").clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn load(&self) -> eyre::Result<Option<LedgerMap>> {
        Ok(self.saved.lock().expect("ledger store poisoned").clone())
    }

    async fn save(&self, statuses: &LedgerMap) -> eyre::Result<()> {
        *self.saved.lock().expect("ledger store poisoned") = Some(statuses.clone());
        Ok(())
    }
}
