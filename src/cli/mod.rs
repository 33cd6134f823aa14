//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, PhotoCommands};
pub use output::{
    format_calendar, format_day, format_entry_list, format_media_list, format_photo_check,
};
