//! trace - Personal journal with dated entries and photos
//!
//! Entries and photo records are kept in memory and mirrored to JSON files
//! under a document root; photos live as separate files next to them.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TraceError;
