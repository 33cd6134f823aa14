//! Domain layer - Journal records and date logic

pub mod calendar;
pub mod date_query;
pub mod date_ref;
pub mod entry;
pub mod media;
pub mod record;

pub use calendar::CalendarZone;
pub use date_ref::DateReference;
pub use entry::JournalEntry;
pub use media::MediaItem;
pub use record::Record;
