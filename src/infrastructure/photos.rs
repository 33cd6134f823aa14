//! Photo file storage

use crate::error::{Result, TraceError};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Name of the photos directory under the document root
pub const PHOTOS_DIR: &str = "Photos";

/// Reject file names that would resolve outside the photos directory
pub fn check_file_name(file_name: &str) -> Result<()> {
    let mut components = Path::new(file_name).components();
    let bare = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !file_name.contains(['/', '\\']);

    if bare {
        Ok(())
    } else {
        Err(TraceError::Photo {
            path: PathBuf::from(file_name),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a bare file name"),
        })
    }
}

/// Storage for the image files media records point at
pub trait PhotoFiles: Send + Sync {
    /// Directory holding the files, created if absent
    fn directory(&self) -> Result<PathBuf>;

    /// Write a new file, replacing any file with the same name
    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<()>;

    /// Read a file's bytes, `None` if it does not exist
    fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>>;

    /// Remove a file; removing a file that does not exist succeeds
    fn remove(&self, file_name: &str) -> Result<()>;

    /// Names of the regular files in the directory, sorted
    fn list(&self) -> Result<Vec<String>>;
}

/// Photo files in a directory on disk
#[derive(Debug, Clone)]
pub struct FsPhotoFiles {
    dir: PathBuf,
}

impl FsPhotoFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsPhotoFiles { dir: dir.into() }
    }

    /// Photos directory under a document root
    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join(PHOTOS_DIR))
    }

    fn file_path(&self, file_name: &str) -> Result<PathBuf> {
        check_file_name(file_name)?;
        Ok(self.dir.join(file_name))
    }

    fn photo_error(&self, file_name: &str, source: io::Error) -> TraceError {
        TraceError::Photo {
            path: self.dir.join(file_name),
            source,
        }
    }
}

impl PhotoFiles for FsPhotoFiles {
    fn directory(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        Ok(self.dir.clone())
    }

    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.file_path(file_name)?;
        self.directory()?;
        fs::write(path, bytes).map_err(|e| self.photo_error(file_name, e))
    }

    fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.file_path(file_name)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.photo_error(file_name, e)),
        }
    }

    fn remove(&self, file_name: &str) -> Result<()> {
        match fs::remove_file(self.file_path(file_name)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.photo_error(file_name, e)),
        }
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                TraceError::Io(e.into_io_error().unwrap_or_else(|| {
                    io::Error::new(io::ErrorKind::Other, "photo directory walk failed")
                }))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            names.push(name.to_string());
        }

        names.sort();
        Ok(names)
    }
}
