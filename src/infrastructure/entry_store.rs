//! Journal entry store backed by journal_entries.json

use super::config::SeedPolicy;
use super::json_store::{JsonStore, LoadStatus, StoreEvent};
use crate::domain::JournalEntry;
use crate::error::{Result, TraceError};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::mpsc::Receiver;
use uuid::Uuid;

pub const ENTRIES_FILE: &str = "journal_entries.json";

pub struct EntryStore {
    records: JsonStore<JournalEntry>,
}

impl EntryStore {
    /// Store for the entries file under `root`; call `load` to read it
    pub fn open(root: &Path) -> Self {
        EntryStore {
            records: JsonStore::new(root.join(ENTRIES_FILE)),
        }
    }

    pub fn path(&self) -> &Path {
        self.records.path()
    }

    pub fn load(&self) -> Result<LoadStatus> {
        self.records.load()
    }

    pub fn save(&self) -> Result<()> {
        self.records.save()
    }

    pub fn add(&self, entry: JournalEntry) -> Result<()> {
        self.records.add(entry)
    }

    /// Delete the entry with `id`, returning it
    pub fn delete(&self, id: Uuid) -> Result<JournalEntry> {
        self.records
            .delete(id)?
            .into_iter()
            .next()
            .ok_or(TraceError::EntryNotFound(id))
    }

    /// Write the sample entries if `policy` calls for it after a load that
    /// ended in `loaded`. Returns whether seeding happened.
    pub fn seed_if_needed(
        &self,
        policy: SeedPolicy,
        loaded: &Result<LoadStatus>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let should_seed = match policy {
            SeedPolicy::Never => false,
            SeedPolicy::FirstRun => matches!(loaded, Ok(LoadStatus::Missing)),
            SeedPolicy::WhenEmpty => self.records.is_empty(),
        };
        if !should_seed {
            return Ok(false);
        }

        self.records.replace_all(JournalEntry::samples(now))?;
        tracing::info!(path = %self.path().display(), "seeded journal with sample entries");
        Ok(true)
    }

    pub fn snapshot(&self) -> Vec<JournalEntry> {
        self.records.snapshot()
    }

    pub fn get(&self, id: Uuid) -> Option<JournalEntry> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rewrites(&self) -> u64 {
        self.records.rewrites()
    }

    pub fn subscribe(&self) -> Receiver<StoreEvent<JournalEntry>> {
        self.records.subscribe()
    }
}
