//! In-memory record collection mirrored to a pretty-printed JSON array

use crate::domain::Record;
use crate::error::{Result, TraceError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// What `load` found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// No file yet; the collection is empty
    Missing,
    /// The file was decoded into this many records
    Loaded(usize),
}

/// Change notification sent to subscribers after the file has been rewritten
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent<T> {
    Added(T),
    Removed(T),
    /// The whole collection was replaced; carries the new length
    Reloaded(usize),
}

struct State<T> {
    records: Vec<T>,
    rewrites: u64,
}

/// A single-writer store. Every mutation holds the lock across the in-memory
/// change and the file rewrite, so concurrent writers are serialized.
pub struct JsonStore<T: Record> {
    path: PathBuf,
    state: Mutex<State<T>>,
    subscribers: Mutex<Vec<Sender<StoreEvent<T>>>>,
}

impl<T: Record> JsonStore<T> {
    /// An empty store backed by `path`; nothing is read until `load`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore {
            path: path.into(),
            state: Mutex::new(State {
                records: Vec::new(),
                rewrites: 0,
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory collection with the file's contents.
    ///
    /// On a decode error the collection becomes empty and the file is left as is.
    pub fn load(&self) -> Result<LoadStatus> {
        let mut state = self.lock();
        let loaded = read_records::<T>(&self.path);

        let (status, records) = match loaded {
            Ok(Some(records)) => (Ok(LoadStatus::Loaded(records.len())), records),
            Ok(None) => (Ok(LoadStatus::Missing), Vec::new()),
            Err(e) => (Err(e), Vec::new()),
        };
        let len = records.len();
        state.records = records;
        drop(state);

        self.notify(StoreEvent::Reloaded(len));
        status
    }

    /// Rewrite the file from the in-memory collection
    pub fn save(&self) -> Result<()> {
        let mut state = self.lock();
        self.write(&mut state)
    }

    /// Append a record and persist. The record is dropped again if the write fails.
    pub fn add(&self, record: T) -> Result<()> {
        let mut state = self.lock();
        state.records.push(record.clone());

        if let Err(e) = self.write(&mut state) {
            state.records.pop();
            return Err(e);
        }
        drop(state);

        self.notify(StoreEvent::Added(record));
        Ok(())
    }

    /// Remove every record with `id` and persist. Returns the removed records;
    /// when nothing matches, the file is not rewritten.
    pub fn delete(&self, id: Uuid) -> Result<Vec<T>> {
        let mut state = self.lock();
        let before = state.records.clone();
        let (removed, kept): (Vec<T>, Vec<T>) =
            before.iter().cloned().partition(|record| record.id() == id);

        if removed.is_empty() {
            return Ok(removed);
        }

        state.records = kept;
        if let Err(e) = self.write(&mut state) {
            state.records = before;
            return Err(e);
        }
        drop(state);

        for record in &removed {
            self.notify(StoreEvent::Removed(record.clone()));
        }
        Ok(removed)
    }

    /// Replace the whole collection and persist
    pub fn replace_all(&self, records: Vec<T>) -> Result<()> {
        let mut state = self.lock();
        let previous = std::mem::replace(&mut state.records, records);

        if let Err(e) = self.write(&mut state) {
            state.records = previous;
            return Err(e);
        }
        let len = state.records.len();
        drop(state);

        self.notify(StoreEvent::Reloaded(len));
        Ok(())
    }

    /// Copy of the current collection in storage order
    pub fn snapshot(&self) -> Vec<T> {
        self.lock().records.clone()
    }

    pub fn get(&self, id: Uuid) -> Option<T> {
        self.lock().records.iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful file rewrites since the store was created
    pub fn rewrites(&self) -> u64 {
        self.lock().rewrites
    }

    /// Receive a `StoreEvent` after every change
    pub fn subscribe(&self) -> Receiver<StoreEvent<T>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx);
        rx
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, state: &mut State<T>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&state.records)?;
        write_atomic(&self.path, &bytes).map_err(|source| TraceError::Write {
            path: self.path.clone(),
            source,
        })?;

        state.rewrites += 1;
        tracing::debug!(
            path = %self.path.display(),
            records = state.records.len(),
            "rewrote store"
        );
        Ok(())
    }

    fn notify(&self, event: StoreEvent<T>) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// Read a JSON array of records, `None` when the file does not exist
fn read_records<T: Record>(path: &Path) -> Result<Option<Vec<T>>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(TraceError::Io(e)),
    };

    serde_json::from_slice(&data)
        .map(Some)
        .map_err(|source| TraceError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Write to a temp file next to `path`, then rename it into place
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JournalEntry;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn entry(text: &str, hour: u32) -> JournalEntry {
        JournalEntry::new(text, Utc.with_ymd_and_hms(2026, 1, 26, hour, 0, 0).unwrap())
    }

    fn store_in(temp: &TempDir) -> JsonStore<JournalEntry> {
        JsonStore::new(temp.path().join("journal_entries.json"))
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        assert_eq!(store.load().unwrap(), LoadStatus::Missing);
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let mut precise = entry("precise", 9);
        precise.date = Utc.timestamp_opt(1_769_418_000, 123_456_789).unwrap();
        let records = vec![entry("first", 8), precise, entry("", 10)];
        store.replace_all(records.clone()).unwrap();

        let reopened = store_in(&temp);
        assert_eq!(reopened.load().unwrap(), LoadStatus::Loaded(3));
        assert_eq!(reopened.snapshot(), records);
    }

    #[test]
    fn test_save_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.add(entry("a", 8)).unwrap();

        store.save().unwrap();
        let first = fs::read(store.path()).unwrap();
        store.save().unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_file_is_pretty_printed_array() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.add(entry("a", 8)).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.contains("\"date\": \"2026-01-26T08:00:00Z\""));
    }

    #[test]
    fn test_decode_error_empties_memory_and_keeps_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.add(entry("a", 8)).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        let result = store.load();

        assert!(matches!(result, Err(TraceError::Decode { .. })));
        assert!(store.is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_delete_removes_exactly_one_with_one_rewrite() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let target = entry("target", 9);
        store
            .replace_all(vec![entry("a", 8), target.clone(), entry("b", 10)])
            .unwrap();
        let rewrites = store.rewrites();

        let removed = store.delete(target.id).unwrap();

        assert_eq!(removed, vec![target.clone()]);
        assert_eq!(store.len(), 2);
        assert!(store.get(target.id).is_none());
        assert_eq!(store.rewrites(), rewrites + 1);

        let reopened = store_in(&temp);
        reopened.load().unwrap();
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn test_delete_unknown_id_does_not_rewrite() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.add(entry("a", 8)).unwrap();
        let rewrites = store.rewrites();

        assert!(store.delete(Uuid::new_v4()).unwrap().is_empty());
        assert_eq!(store.rewrites(), rewrites);
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let dup = entry("dup", 9);
        store.replace_all(vec![dup.clone(), dup.clone()]).unwrap();

        assert_eq!(store.delete(dup.id).unwrap().len(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_write_rolls_back_memory() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.add(entry("kept", 8)).unwrap();
        // A directory in place of the file makes the rename fail.
        fs::remove_file(store.path()).unwrap();
        fs::create_dir(store.path()).unwrap();

        let result = store.add(entry("lost", 9));

        assert!(matches!(result, Err(TraceError::Write { .. })));
        assert_eq!(store.len(), 1);
        assert_eq!(store.rewrites(), 1);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.add(entry("a", 8)).unwrap();
        store.add(entry("b", 9)).unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["journal_entries.json"]);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let events = store.subscribe();
        let a = entry("a", 8);

        store.add(a.clone()).unwrap();
        store.delete(a.id).unwrap();

        assert_eq!(events.try_recv().unwrap(), StoreEvent::Added(a.clone()));
        assert_eq!(events.try_recv().unwrap(), StoreEvent::Removed(a));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        drop(store.subscribe());

        store.add(entry("a", 8)).unwrap();
        assert!(store.subscribers.lock().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_adds_are_all_persisted() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(store_in(&temp));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.add(entry(&format!("thread {}", i), i)).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let reopened = store_in(&temp);
        assert_eq!(reopened.load().unwrap(), LoadStatus::Loaded(8));
        assert_eq!(store.rewrites(), 8);
    }

    #[test]
    fn test_loads_interleaved_with_adds_lose_nothing() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(store_in(&temp));

        let writers: Vec<_> = (0..12)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.add(entry(&format!("thread {}", i), i)).unwrap())
            })
            .collect();
        let readers: Vec<_> = (0..12)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.load().unwrap();
                })
            })
            .collect();
        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 12);
        let reopened = store_in(&temp);
        assert_eq!(reopened.load().unwrap(), LoadStatus::Loaded(12));
    }
}
