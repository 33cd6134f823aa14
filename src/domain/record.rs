//! Common shape of everything the journal stores

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// A dated record with a stable identity, persisted as one element of a JSON array
pub trait Record: Clone + Serialize + DeserializeOwned + Send + 'static {
    fn id(&self) -> Uuid;

    fn date(&self) -> DateTime<Utc>;
}
