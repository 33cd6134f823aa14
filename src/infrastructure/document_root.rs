//! Resolution of the directory holding the journal files

use crate::error::{Result, TraceError};
use crate::infrastructure::config::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing directly at the journal directory
pub const ROOT_ENV: &str = "TRACE_ROOT";

/// Environment variable naming a cloud-synced documents directory
pub const CLOUD_ROOT_ENV: &str = "TRACE_CLOUD_ROOT";

/// Name of the app folder inside a documents directory
const APP_DIR: &str = "Trace";

/// Directory under which entries, media records and photos are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRoot {
    path: PathBuf,
}

impl DocumentRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DocumentRoot { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the document root from the environment and the current
    /// directory, and create it if needed
    pub fn discover() -> Result<Self> {
        let initialized = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::find_initialized(&cwd));
        let root = Self::resolve(
            std::env::var_os(ROOT_ENV).map(PathBuf::from),
            initialized,
            std::env::var_os(CLOUD_ROOT_ENV).map(PathBuf::from),
            std::env::var_os("HOME").map(PathBuf::from),
        )?;
        root.ensure_exists()?;
        Ok(root)
    }

    /// Walk up from `start` to the nearest directory holding a `.trace` directory
    pub fn find_initialized(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Pick the root from an explicit override, an initialized journal around
    /// the current directory, a cloud root that exists, or the local documents
    /// directory, in that order
    pub fn resolve(
        explicit: Option<PathBuf>,
        initialized: Option<PathBuf>,
        cloud: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(DocumentRoot::new(path));
        }

        if let Some(path) = initialized {
            tracing::debug!(path = %path.display(), "using initialized journal");
            return Ok(DocumentRoot::new(path));
        }

        if let Some(cloud) = cloud.filter(|p| p.is_dir()) {
            tracing::debug!(path = %cloud.display(), "using cloud document root");
            return Ok(DocumentRoot::new(cloud.join(APP_DIR)));
        }

        match home.filter(|p| !p.as_os_str().is_empty()) {
            Some(home) => Ok(DocumentRoot::new(home.join("Documents").join(APP_DIR))),
            None => Err(TraceError::DocumentRoot(format!(
                "neither {} nor HOME is set",
                ROOT_ENV
            ))),
        }
    }

    /// Create the root directory if it does not exist yet
    pub fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.path).map_err(|e| {
            TraceError::DocumentRoot(format!("cannot create {}: {}", self.path.display(), e))
        })
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_root_wins() {
        let temp = TempDir::new().unwrap();
        let root = DocumentRoot::resolve(
            Some(PathBuf::from("/srv/journal")),
            Some(PathBuf::from("/srv/other")),
            Some(temp.path().to_path_buf()),
            Some(PathBuf::from("/home/someone")),
        )
        .unwrap();

        assert_eq!(root.path(), Path::new("/srv/journal"));
    }

    #[test]
    fn test_cloud_root_used_when_present() {
        let temp = TempDir::new().unwrap();
        let root = DocumentRoot::resolve(
            None,
            None,
            Some(temp.path().to_path_buf()),
            Some(PathBuf::from("/home/someone")),
        )
        .unwrap();

        assert_eq!(root.path(), temp.path().join("Trace"));
    }

    #[test]
    fn test_missing_cloud_root_falls_back_to_documents() {
        let temp = TempDir::new().unwrap();
        let root = DocumentRoot::resolve(
            None,
            None,
            Some(temp.path().join("not-mounted")),
            Some(PathBuf::from("/home/someone")),
        )
        .unwrap();

        assert_eq!(root.path(), Path::new("/home/someone/Documents/Trace"));
    }

    #[test]
    fn test_initialized_journal_beats_cloud_and_home() {
        let temp = TempDir::new().unwrap();
        let journal = temp.path().join("journal");
        let root = DocumentRoot::resolve(
            None,
            Some(journal.clone()),
            Some(temp.path().to_path_buf()),
            Some(PathBuf::from("/home/someone")),
        )
        .unwrap();

        assert_eq!(root.path(), journal);
    }

    #[test]
    fn test_find_initialized_walks_up() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
        let nested = temp.path().join("2026/january");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            DocumentRoot::find_initialized(&nested),
            Some(temp.path().to_path_buf())
        );
        assert_eq!(
            DocumentRoot::find_initialized(temp.path()),
            Some(temp.path().to_path_buf())
        );
    }

    #[test]
    fn test_find_initialized_ignores_plain_file_marker() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("journal");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_DIR), "").unwrap();

        assert_ne!(DocumentRoot::find_initialized(&dir), Some(dir.clone()));
    }

    #[test]
    fn test_nothing_to_resolve() {
        let result = DocumentRoot::resolve(None, None, None, None);
        assert!(matches!(result, Err(TraceError::DocumentRoot(_))));
    }

    #[test]
    fn test_ensure_exists_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let root = DocumentRoot::new(temp.path().join("a/b"));

        root.ensure_exists().unwrap();
        root.ensure_exists().unwrap();
        assert!(root.path().is_dir());
    }
}
