//! Output formatting utilities

use crate::application::{DayView, PhotoCheck};
use crate::domain::{CalendarZone, JournalEntry, MediaItem};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::path::Path;

const TIMESTAMP: &str = "%Y-%m-%d %H:%M";

/// Format entries for display, one per line
pub fn format_entry_list(entries: &[JournalEntry], zone: CalendarZone) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format_entry(entry, zone, TIMESTAMP));
    }
    output
}

fn format_entry(entry: &JournalEntry, zone: CalendarZone, fmt: &str) -> String {
    let mut lines = entry.text.lines();
    let first = lines.next().unwrap_or_default();
    let mut output = format!("{}  {}  {}\n", zone.format(entry.date, fmt), entry.id, first);

    let indent = " ".repeat(zone.format(entry.date, fmt).len() + 2 + 36 + 2);
    for line in lines {
        output.push_str(&format!("{}{}\n", indent, line));
    }
    output
}

/// Format media records with their file paths
pub fn format_media_list(media: &[MediaItem], zone: CalendarZone, photos_dir: &Path) -> String {
    if media.is_empty() {
        return "No photos found".to_string();
    }

    let mut output = String::new();
    for item in media {
        output.push_str(&format!(
            "{}  {}  {}\n",
            zone.format(item.date, TIMESTAMP),
            item.id,
            photos_dir.join(&item.file_name).display()
        ));
    }
    output
}

/// Format a day's photos and entries
pub fn format_day(view: &DayView, zone: CalendarZone, photos_dir: &Path) -> String {
    let heading = view
        .date
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_default();

    if view.is_empty() {
        return format!("{}\nNo entries or photos for this day\n", heading);
    }

    let mut output = format!("{}\n", heading);
    if !view.media.is_empty() {
        output.push_str("\nPhotos\n");
        for item in &view.media {
            output.push_str(&format!(
                "{}  {}  {}\n",
                zone.format(item.date, "%H:%M"),
                item.id,
                photos_dir.join(&item.file_name).display()
            ));
        }
    }
    if !view.entries.is_empty() {
        output.push_str("\nEntries\n");
        for entry in &view.entries {
            output.push_str(&format_entry(entry, zone, "%H:%M"));
        }
    }
    output
}

/// Month grid, Monday first, with days that have content marked `*`
pub fn format_calendar(year: i32, month: u32, marked: &BTreeSet<u32>) -> String {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return String::new();
    };
    let days_in_month = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28);

    let mut output = format!("{}\n", first.format("%B %Y"));
    output.push_str(" Mo  Tu  We  Th  Fr  Sa  Su\n");

    let lead = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<String> = vec!["    ".to_string(); lead];
    for day in 1..=days_in_month {
        let mark = if marked.contains(&day) { '*' } else { ' ' };
        cells.push(format!("{:>3}{}", day, mark));
    }

    for week in cells.chunks(7) {
        output.push_str(week.concat().trim_end());
        output.push('\n');
    }
    output
}

/// Summarize a photo consistency check
pub fn format_photo_check(check: &PhotoCheck) -> String {
    if check.is_clean() {
        return "All photos accounted for".to_string();
    }

    let mut output = String::new();
    for name in &check.orphans {
        output.push_str(&format!("stray file: {}\n", name));
    }
    for item in &check.missing {
        output.push_str(&format!("missing file: {} ({})\n", item.file_name, item.id));
    }
    output
}
