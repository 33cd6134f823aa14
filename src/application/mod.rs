//! Application layer - Use cases and orchestration

pub mod init;
pub mod journal;
pub mod manage_config;

pub use journal::{DayView, Journal, PhotoCheck};
pub use manage_config::ConfigService;
