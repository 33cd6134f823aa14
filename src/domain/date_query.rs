//! Filtering records by calendar day

use super::{CalendarZone, Record};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Records dated on `day` in `zone`, in collection order
pub fn on_day<'a, T: Record>(records: &'a [T], day: NaiveDate, zone: CalendarZone) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| zone.day_of(record.date()) == day)
        .collect()
}

/// Newest first; records with equal timestamps keep their relative order
pub fn newest_first<T: Record>(records: &mut [T]) {
    records.sort_by(|a, b| b.date().cmp(&a.date()));
}

/// Days of the given month on which at least one record is dated
pub fn days_with_records<T: Record>(
    records: &[T],
    year: i32,
    month: u32,
    zone: CalendarZone,
) -> BTreeSet<u32> {
    records
        .iter()
        .map(|record| zone.day_of(record.date()))
        .filter(|date| date.year() == year && date.month() == month)
        .map(|date| date.day())
        .collect()
}
