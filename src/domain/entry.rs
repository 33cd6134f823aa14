//! Journal entries

use super::Record;
use crate::error::{Result, TraceError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text of the first sample entry written into a fresh journal
pub const WELCOME_TEXT: &str = "Welcome to Trace! This is your first journal entry.";

/// Text of the second sample entry, dated one hour earlier
pub const HINT_TEXT: &str = "You can add new entries by tapping the plus button.";

/// A timestamped free-text note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(text: impl Into<String>, date: DateTime<Utc>) -> Self {
        JournalEntry {
            id: Uuid::new_v4(),
            text: text.into(),
            date,
        }
    }

    /// Build an entry for saving, rejecting blank text
    pub fn compose(text: impl Into<String>, date: DateTime<Utc>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TraceError::EmptyEntry);
        }
        Ok(Self::new(text, date))
    }

    /// The two entries a brand new journal starts with
    pub fn samples(now: DateTime<Utc>) -> Vec<JournalEntry> {
        vec![
            JournalEntry::new(WELCOME_TEXT, now),
            JournalEntry::new(HINT_TEXT, now - Duration::hours(1)),
        ]
    }
}

impl Record for JournalEntry {
    fn id(&self) -> Uuid {
        self.id
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
