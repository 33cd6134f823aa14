use anyhow::anyhow;
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use trace_journal::application::{init::init, ConfigService, Journal};
use trace_journal::cli::{
    format_calendar, format_day, format_entry_list, format_media_list, format_photo_check, Cli,
    Commands, PhotoCommands,
};
use trace_journal::domain::{CalendarZone, DateReference};
use trace_journal::error::TraceError;
use trace_journal::infrastructure::{DocumentRoot, SeedPolicy};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: {}", e);
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("could not install logger: {}", e))
}

fn run(cli: Cli) -> Result<(), TraceError> {
    match cli.command {
        Commands::Init {
            path,
            timezone,
            seed,
        } => {
            let timezone = timezone
                .parse::<CalendarZone>()
                .map_err(TraceError::Config)?;
            let seed = seed.parse::<SeedPolicy>().map_err(TraceError::Config)?;

            init(&path, timezone, seed)?;
            println!("Initialized trace journal at {}", path.display());
            println!("Timezone: {}", timezone);
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(DocumentRoot::discover()?);

            if list {
                let config = service.list()?;
                println!("timezone = {}", config.timezone);
                println!("seed = {}", config.seed);
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: trace config [--list | <key> [<value>]]");
                println!("Valid keys: timezone, seed, created");
            }
            Ok(())
        }
        Commands::Add { text } => {
            let entry = open_journal()?.add_entry(&text.join(" "))?;
            println!("Added entry {}", entry.id);
            Ok(())
        }
        Commands::List { limit } => {
            let journal = open_journal()?;
            let entries = journal.entries_newest_first(limit);
            print!("{}", with_newline(format_entry_list(&entries, journal.zone())));
            Ok(())
        }
        Commands::Delete { id } => {
            open_journal()?.delete_entry(id)?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        Commands::Day { when } => {
            let reference = if when.is_empty() {
                DateReference::Today
            } else {
                DateReference::parse(&when.join(" "))?
            };
            let journal = open_journal()?;
            let zone = journal.zone();
            let day = reference.resolve(zone.today());
            let photos_dir = journal.photos_directory()?;
            print!("{}", format_day(&journal.day(day), zone, &photos_dir));
            Ok(())
        }
        Commands::Calendar { month } => {
            let journal = open_journal()?;
            let (year, month) = match month {
                Some(text) => parse_month(&text)?,
                None => {
                    let today = journal.zone().today();
                    (today.year(), today.month())
                }
            };
            print!("{}", format_calendar(year, month, &journal.calendar(year, month)));
            Ok(())
        }
        Commands::Photo { command } => run_photo(&open_journal()?, command),
    }
}

fn open_journal() -> Result<Journal, TraceError> {
    Journal::open(DocumentRoot::discover()?)
}

fn run_photo(journal: &Journal, command: PhotoCommands) -> Result<(), TraceError> {
    let zone = journal.zone();

    match command {
        PhotoCommands::Add { file } => {
            let item = journal.import_photo(&file)?;
            println!("Added photo {} ({})", item.id, item.file_name);
        }
        PhotoCommands::List => {
            let photos_dir = journal.photos_directory()?;
            print!(
                "{}",
                with_newline(format_media_list(&journal.media_newest_first(), zone, &photos_dir))
            );
        }
        PhotoCommands::Delete { id } => {
            journal.delete_photo(id)?;
            println!("Deleted photo {}", id);
        }
        PhotoCommands::Dir => {
            println!("{}", journal.photos_directory()?.display());
        }
        PhotoCommands::Check => {
            print!("{}", with_newline(format_photo_check(&journal.check_photos()?)));
        }
    }
    Ok(())
}

/// Parse `YYYY-MM`
fn parse_month(text: &str) -> Result<(i32, u32), TraceError> {
    NaiveDate::parse_from_str(&format!("{}-01", text.trim()), "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|_| TraceError::Config(format!("Invalid month: '{}' (expected YYYY-MM)", text)))
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
