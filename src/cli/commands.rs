//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "trace")]
#[command(about = "Personal journal with dated entries and photos", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a journal with its own configuration
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Calendar timezone (local, utc, or an offset like +05:30)
        #[arg(short, long, default_value = "local")]
        timezone: String,

        /// When to write the sample entries (first-run, when-empty, never)
        #[arg(short, long, default_value = "first-run")]
        seed: String,
    },

    /// Write a new entry dated now
    Add {
        /// Entry text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List entries, newest first
    List {
        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Delete an entry by id
    Delete { id: Uuid },

    /// Show the entries and photos of one day
    Day {
        /// today, yesterday, tomorrow, a weekday, last/next <weekday>, or YYYY-MM-DD
        when: Vec<String>,
    },

    /// Show which days of a month have entries or photos
    Calendar {
        /// Month as YYYY-MM (default: current month)
        month: Option<String>,
    },

    /// Manage photos
    Photo {
        #[command(subcommand)]
        command: PhotoCommands,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PhotoCommands {
    /// Copy an image file into the journal, dated now
    Add { file: PathBuf },

    /// List photos, newest first
    List,

    /// Delete a photo and its file
    Delete { id: Uuid },

    /// Print the photos directory
    Dir,

    /// Report stray files and records without files
    Check,
}
