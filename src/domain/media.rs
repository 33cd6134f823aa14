//! Media records pointing at photo files

use super::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extension given to every ingested photo
pub const PHOTO_EXTENSION: &str = "jpg";

/// A timestamped reference to a file in the photos directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: Uuid,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub date: DateTime<Utc>,
}

impl MediaItem {
    pub fn new(file_name: impl Into<String>, date: DateTime<Utc>) -> Self {
        MediaItem {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            date,
        }
    }

    /// Fresh random file name for an incoming photo, e.g. `3F2504E0-....jpg`
    pub fn generate_file_name() -> String {
        format!(
            "{}.{}",
            Uuid::new_v4().hyphenated().to_string().to_uppercase(),
            PHOTO_EXTENSION
        )
    }
}

impl Record for MediaItem {
    fn id(&self) -> Uuid {
        self.id
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
