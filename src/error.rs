//! Error types for trace

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for the trace journal
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Could not resolve document root: {0}")]
    DocumentRoot(String),

    #[error("Invalid date reference: {0}")]
    InvalidDateReference(String),

    #[error("Entry text is empty")]
    EmptyEntry,

    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Media item not found: {0}")]
    MediaNotFound(Uuid),

    #[error("Could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Photo file error for {}: {source}", .path.display())]
    Photo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TraceError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TraceError::DocumentRoot(_) => 2,
            TraceError::InvalidDateReference(_) => 3,
            TraceError::EntryNotFound(_) | TraceError::MediaNotFound(_) => 4,
            TraceError::EmptyEntry => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TraceError::DocumentRoot(msg) => {
                format!(
                    "Could not resolve document root: {}\n\n\
                    Suggestions:\n\
                    • Set TRACE_ROOT to the directory holding your journal\n\
                    • Run 'trace init' and work inside that directory\n\
                    • Make sure HOME is set so ~/Documents/Trace can be used",
                    msg
                )
            }
            TraceError::InvalidDateReference(input) => {
                format!(
                    "Invalid date reference: '{}'\n\n\
                    Valid date references:\n\
                    • today, yesterday, tomorrow\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, next friday, etc.\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2026-01-26)\n\n\
                    Examples:\n\
                    trace day today\n\
                    trace day last monday\n\
                    trace day 2026-01-26",
                    input
                )
            }
            TraceError::EmptyEntry => "Entry text is empty\n\n\
                Example: trace add \"Walked along the river\""
                .to_string(),
            TraceError::EntryNotFound(id) | TraceError::MediaNotFound(id) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Use 'trace list' or 'trace photo list' to see ids\n\
                    • Copy the full id, e.g. {}",
                    self, id
                )
            }
            TraceError::Decode { path, .. } => {
                format!(
                    "{}\n\n\
                    The file was left untouched. Fix or move {} aside;\n\
                    the next save will overwrite it.",
                    self,
                    path.display()
                )
            }
            TraceError::Config(msg) => {
                if msg.contains("timezone") {
                    format!(
                        "{}\n\n\
                        Valid timezones: local, utc, or an offset like +05:30\n\
                        Example: trace config timezone utc",
                        msg
                    )
                } else if msg.contains("seed") {
                    format!(
                        "{}\n\n\
                        Valid seed policies: first-run, when-empty, never\n\
                        Example: trace config seed never",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TraceError
pub type Result<T> = std::result::Result<T, TraceError>;
