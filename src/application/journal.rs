//! Journal service: both stores behind one handle

use crate::domain::{date_query, CalendarZone, JournalEntry, MediaItem};
use crate::error::Result;
use crate::infrastructure::{Config, DocumentRoot, EntryStore, LoadStatus, MediaStore};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Everything recorded on one calendar day, newest first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayView {
    pub date: Option<NaiveDate>,
    pub entries: Vec<JournalEntry>,
    pub media: Vec<MediaItem>,
}

impl DayView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.media.is_empty()
    }
}

/// Result of comparing media records with the photos directory
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhotoCheck {
    /// Files no record points at
    pub orphans: Vec<String>,
    /// Records whose file is gone
    pub missing: Vec<MediaItem>,
}

impl PhotoCheck {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.missing.is_empty()
    }
}

pub struct Journal {
    root: DocumentRoot,
    config: Config,
    entries: EntryStore,
    media: MediaStore,
}

impl Journal {
    /// Open the journal under `root`: read config, load both stores and seed
    /// sample entries per the configured policy.
    ///
    /// A missing or unreadable data file leaves that store empty; the failure
    /// is logged and opening continues.
    pub fn open(root: DocumentRoot) -> Result<Self> {
        let config = Config::load_or_default(root.path())?;
        let entries = EntryStore::open(root.path());
        let media = MediaStore::open(root.path());

        let entries_loaded = entries.load();
        log_load("entries", entries.path(), &entries_loaded);
        log_load("media", media.path(), &media.load());

        if let Err(e) = entries.seed_if_needed(config.seed, &entries_loaded, Utc::now()) {
            tracing::warn!(error = %e, "could not write sample entries");
        }

        Ok(Journal {
            root,
            config,
            entries,
            media,
        })
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn zone(&self) -> CalendarZone {
        self.config.timezone
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    /// Save a new entry dated now
    pub fn add_entry(&self, text: &str) -> Result<JournalEntry> {
        self.add_entry_at(text, Utc::now())
    }

    pub fn add_entry_at(&self, text: &str, date: DateTime<Utc>) -> Result<JournalEntry> {
        let entry = JournalEntry::compose(text, date)?;
        self.entries.add(entry.clone())?;
        Ok(entry)
    }

    pub fn delete_entry(&self, id: Uuid) -> Result<JournalEntry> {
        self.entries.delete(id)
    }

    /// Entries newest first, optionally truncated
    pub fn entries_newest_first(&self, limit: Option<usize>) -> Vec<JournalEntry> {
        let mut entries = self.entries.snapshot();
        date_query::newest_first(&mut entries);
        if let Some(n) = limit {
            entries.truncate(n);
        }
        entries
    }

    pub fn media_newest_first(&self) -> Vec<MediaItem> {
        let mut media = self.media.snapshot();
        date_query::newest_first(&mut media);
        media
    }

    /// Entries and photos dated on `day` in the configured timezone
    pub fn day(&self, day: NaiveDate) -> DayView {
        let zone = self.zone();
        let entries = self.entries.snapshot();
        let media = self.media.snapshot();

        let mut view = DayView {
            date: Some(day),
            entries: date_query::on_day(&entries, day, zone)
                .into_iter()
                .cloned()
                .collect(),
            media: date_query::on_day(&media, day, zone)
                .into_iter()
                .cloned()
                .collect(),
        };
        date_query::newest_first(&mut view.entries);
        date_query::newest_first(&mut view.media);
        view
    }

    /// Days of the month that have an entry or a photo
    pub fn calendar(&self, year: i32, month: u32) -> BTreeSet<u32> {
        let zone = self.zone();
        let mut days =
            date_query::days_with_records(&self.entries.snapshot(), year, month, zone);
        days.extend(date_query::days_with_records(
            &self.media.snapshot(),
            year,
            month,
            zone,
        ));
        days
    }

    /// Copy an image file into the journal, dated now
    pub fn import_photo(&self, source: &Path) -> Result<MediaItem> {
        self.media.import_file(source, Utc::now())
    }

    pub fn delete_photo(&self, id: Uuid) -> Result<MediaItem> {
        self.media.delete(id)
    }

    pub fn photos_directory(&self) -> Result<PathBuf> {
        self.media.photos_directory()
    }

    pub fn check_photos(&self) -> Result<PhotoCheck> {
        Ok(PhotoCheck {
            orphans: self.media.orphans()?,
            missing: self.media.missing_files()?,
        })
    }
}

fn log_load(kind: &str, path: &Path, loaded: &Result<LoadStatus>) {
    match loaded {
        Ok(LoadStatus::Loaded(count)) => {
            tracing::debug!(kind, path = %path.display(), count, "loaded store")
        }
        Ok(LoadStatus::Missing) => {
            tracing::debug!(kind, path = %path.display(), "no data file yet")
        }
        Err(e) => tracing::warn!(kind, error = %e, "could not load data; starting empty"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{HINT_TEXT, WELCOME_TEXT};
    use crate::domain::Record;
    use crate::infrastructure::entry_store::ENTRIES_FILE;
    use crate::infrastructure::SeedPolicy;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn open_utc(temp: &TempDir, seed: SeedPolicy) -> Journal {
        Config::new(CalendarZone::Utc, seed)
            .save_to_dir(temp.path())
            .unwrap();
        Journal::open(DocumentRoot::new(temp.path())).unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_open_fresh_journal_seeds_samples() {
        let temp = TempDir::new().unwrap();
        let journal = Journal::open(DocumentRoot::new(temp.path())).unwrap();

        let texts: Vec<String> = journal
            .entries_newest_first(None)
            .into_iter()
            .map(|e| e.text)
            .collect();
        assert_eq!(texts, vec![WELCOME_TEXT, HINT_TEXT]);
        assert!(temp.path().join(ENTRIES_FILE).exists());
    }

    #[test]
    fn test_open_with_corrupt_entries_starts_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(ENTRIES_FILE), "[{").unwrap();

        let journal = Journal::open(DocumentRoot::new(temp.path())).unwrap();

        assert!(journal.entries().is_empty());
        assert_eq!(
            fs::read_to_string(temp.path().join(ENTRIES_FILE)).unwrap(),
            "[{"
        );
    }

    #[test]
    fn test_add_entry_rejects_blank_text() {
        let temp = TempDir::new().unwrap();
        let journal = open_utc(&temp, SeedPolicy::Never);

        assert!(journal.add_entry("   ").is_err());
        assert!(journal.entries().is_empty());
        assert_eq!(journal.entries().rewrites(), 0);
    }

    #[test]
    fn test_entries_newest_first_with_limit() {
        let temp = TempDir::new().unwrap();
        let journal = open_utc(&temp, SeedPolicy::Never);
        journal.add_entry_at("old", at(1, 9)).unwrap();
        journal.add_entry_at("new", at(20, 9)).unwrap();
        journal.add_entry_at("mid", at(10, 9)).unwrap();

        let texts: Vec<String> = journal
            .entries_newest_first(Some(2))
            .into_iter()
            .map(|e| e.text)
            .collect();
        assert_eq!(texts, vec!["new", "mid"]);
    }

    #[test]
    fn test_day_view() {
        let temp = TempDir::new().unwrap();
        let journal = open_utc(&temp, SeedPolicy::Never);
        journal.add_entry_at("morning", at(26, 8)).unwrap();
        journal.add_entry_at("evening", at(26, 21)).unwrap();
        journal.add_entry_at("other day", at(25, 21)).unwrap();
        let photo = journal.media().ingest(b"img", at(26, 12)).unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
        let view = journal.day(day);

        let texts: Vec<&str> = view.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["evening", "morning"]);
        assert_eq!(view.media, vec![photo]);
        assert!(view.entries.iter().all(|e| journal.zone().day_of(e.date()) == day));
    }

    #[test]
    fn test_empty_day() {
        let temp = TempDir::new().unwrap();
        let journal = open_utc(&temp, SeedPolicy::Never);
        let view = journal.day(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!(view.is_empty());
    }

    #[test]
    fn test_calendar_merges_entries_and_media() {
        let temp = TempDir::new().unwrap();
        let journal = open_utc(&temp, SeedPolicy::Never);
        journal.add_entry_at("a", at(3, 9)).unwrap();
        journal.media().ingest(b"img", at(17, 9)).unwrap();
        journal.add_entry_at("b", at(17, 10)).unwrap();

        let days: Vec<u32> = journal.calendar(2026, 1).into_iter().collect();
        assert_eq!(days, vec![3, 17]);
        assert!(journal.calendar(2026, 2).is_empty());
    }

    #[test]
    fn test_photo_lifecycle() {
        let temp = TempDir::new().unwrap();
        let journal = open_utc(&temp, SeedPolicy::Never);
        let source = temp.path().join("picked.jpg");
        fs::write(&source, b"picked").unwrap();

        let item = journal.import_photo(&source).unwrap();
        assert!(journal.check_photos().unwrap().is_clean());

        journal.delete_photo(item.id).unwrap();
        assert!(journal.media_newest_first().is_empty());
        assert!(journal.check_photos().unwrap().is_clean());
        assert!(journal.photos_directory().unwrap().read_dir().unwrap().next().is_none());
    }

    #[test]
    fn test_reopen_sees_changes() {
        let temp = TempDir::new().unwrap();
        let journal = open_utc(&temp, SeedPolicy::Never);
        let kept = journal.add_entry("kept").unwrap();
        let gone = journal.add_entry("gone").unwrap();
        journal.delete_entry(gone.id).unwrap();
        drop(journal);

        let journal = Journal::open(DocumentRoot::new(temp.path())).unwrap();
        assert_eq!(journal.entries().snapshot(), vec![kept]);
    }
}
