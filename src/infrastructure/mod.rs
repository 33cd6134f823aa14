//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod document_root;
pub mod entry_store;
pub mod json_store;
pub mod media_store;
pub mod photos;

pub use config::{Config, SeedPolicy};
pub use document_root::DocumentRoot;
pub use entry_store::EntryStore;
pub use json_store::{JsonStore, LoadStatus, StoreEvent};
pub use media_store::MediaStore;
pub use photos::{FsPhotoFiles, PhotoFiles};
