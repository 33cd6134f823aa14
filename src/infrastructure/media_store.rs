//! Media store: media_items.json plus the photo files it references

use super::json_store::{JsonStore, LoadStatus, StoreEvent};
use super::photos::{check_file_name, FsPhotoFiles, PhotoFiles};
use crate::domain::MediaItem;
use crate::error::{Result, TraceError};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::Mutex;
use uuid::Uuid;

pub const MEDIA_FILE: &str = "media_items.json";

/// Keeps each media record and its photo file in step: they are created
/// together and removed together, with the file change rolled back when the
/// record cannot be persisted.
pub struct MediaStore {
    records: JsonStore<MediaItem>,
    photos: Box<dyn PhotoFiles>,
    // Serializes the record+file operations against each other
    coupled: Mutex<()>,
}

impl MediaStore {
    /// Store for the media file and Photos directory under `root`
    pub fn open(root: &Path) -> Self {
        Self::with_photos(root, Box::new(FsPhotoFiles::in_root(root)))
    }

    pub fn with_photos(root: &Path, photos: Box<dyn PhotoFiles>) -> Self {
        MediaStore {
            records: JsonStore::new(root.join(MEDIA_FILE)),
            photos,
            coupled: Mutex::new(()),
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

    /// Add a record for a photo file that is already in place
    pub fn add(&self, item: MediaItem) -> Result<()> {
        self.records.add(item)
    }

    /// Resolve the photos directory, creating it if absent
    pub fn photos_directory(&self) -> Result<PathBuf> {
        self.photos.directory()
    }

    /// Full path of a record's photo file
    pub fn photo_path(&self, item: &MediaItem) -> Result<PathBuf> {
        check_file_name(&item.file_name)?;
        Ok(self.photos_directory()?.join(&item.file_name))
    }

    /// Store image bytes under a fresh file name and record them.
    /// The bytes are written as given; they are not checked to be an image.
    pub fn ingest(&self, bytes: &[u8], date: DateTime<Utc>) -> Result<MediaItem> {
        let _guard = self.lock_coupled();
        let item = MediaItem::new(MediaItem::generate_file_name(), date);

        self.photos.write(&item.file_name, bytes)?;
        if let Err(e) = self.records.add(item.clone()) {
            if let Err(cleanup) = self.photos.remove(&item.file_name) {
                tracing::warn!(
                    file = %item.file_name,
                    error = %cleanup,
                    "could not remove photo after failed record save"
                );
            }
            return Err(e);
        }

        tracing::info!(id = %item.id, file = %item.file_name, bytes = bytes.len(), "ingested photo");
        Ok(item)
    }

    /// Copy an image file from disk into the journal
    pub fn import_file(&self, source: &Path, date: DateTime<Utc>) -> Result<MediaItem> {
        let bytes = fs::read(source).map_err(|e| TraceError::Photo {
            path: source.to_path_buf(),
            source: e,
        })?;
        self.ingest(&bytes, date)
    }

    /// Delete a record together with its photo file.
    ///
    /// If the file cannot be removed nothing changes. If the record removal
    /// cannot be persisted, the file is written back.
    pub fn delete(&self, id: Uuid) -> Result<MediaItem> {
        let _guard = self.lock_coupled();
        let item = self.records.get(id).ok_or(TraceError::MediaNotFound(id))?;

        let backup = self.photos.read(&item.file_name)?;
        self.photos.remove(&item.file_name)?;

        if let Err(e) = self.records.delete(id) {
            if let Some(bytes) = backup {
                if let Err(restore) = self.photos.write(&item.file_name, &bytes) {
                    tracing::warn!(
                        file = %item.file_name,
                        error = %restore,
                        "could not restore photo after failed record save"
                    );
                }
            }
            return Err(e);
        }

        tracing::info!(id = %item.id, file = %item.file_name, "deleted photo");
        Ok(item)
    }

    /// Files in the photos directory that no record references
    pub fn orphans(&self) -> Result<Vec<String>> {
        let referenced: HashSet<String> = self
            .records
            .snapshot()
            .into_iter()
            .map(|item| item.file_name)
            .collect();

        Ok(self
            .photos
            .list()?
            .into_iter()
            .filter(|name| !referenced.contains(name))
            .collect())
    }

    /// Records whose photo file is missing
    pub fn missing_files(&self) -> Result<Vec<MediaItem>> {
        let present: HashSet<String> = self.photos.list()?.into_iter().collect();
        Ok(self
            .records
            .snapshot()
            .into_iter()
            .filter(|item| !present.contains(&item.file_name))
            .collect())
    }

    pub fn snapshot(&self) -> Vec<MediaItem> {
        self.records.snapshot()
    }

    pub fn get(&self, id: Uuid) -> Option<MediaItem> {
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

    pub fn subscribe(&self) -> Receiver<StoreEvent<MediaItem>> {
        self.records.subscribe()
    }

    fn lock_coupled(&self) -> std::sync::MutexGuard<'_, ()> {
        self.coupled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
