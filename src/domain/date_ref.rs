//! Date reference parsing for picking a calendar day

use crate::error::{Result, TraceError};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A day the user asks about, relative to "today" or absolute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateReference {
    Today,
    Yesterday,
    Tomorrow,
    /// Today if it is that weekday, otherwise the most recent one
    Weekday(Weekday),
    /// Strictly before today
    LastWeekday(Weekday),
    /// Strictly after today
    NextWeekday(Weekday),
    Date(NaiveDate),
}

impl DateReference {
    /// Parse a date reference such as `today`, `last monday` or `2026-01-26`
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        if let Some(day) = normalized.strip_prefix("last ") {
            return parse_weekday(day.trim())
                .map(DateReference::LastWeekday)
                .ok_or_else(|| TraceError::InvalidDateReference(input.to_string()));
        }
        if let Some(day) = normalized.strip_prefix("next ") {
            return parse_weekday(day.trim())
                .map(DateReference::NextWeekday)
                .ok_or_else(|| TraceError::InvalidDateReference(input.to_string()));
        }

        match normalized.as_str() {
            "today" | "now" => Ok(DateReference::Today),
            "yesterday" => Ok(DateReference::Yesterday),
            "tomorrow" => Ok(DateReference::Tomorrow),
            other => {
                if let Some(weekday) = parse_weekday(other) {
                    return Ok(DateReference::Weekday(weekday));
                }
                NaiveDate::parse_from_str(other, "%Y-%m-%d")
                    .map(DateReference::Date)
                    .map_err(|_| TraceError::InvalidDateReference(input.to_string()))
            }
        }
    }

    /// Resolve against the given "today"
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateReference::Today => today,
            DateReference::Yesterday => today - Duration::days(1),
            DateReference::Tomorrow => today + Duration::days(1),
            DateReference::Weekday(target) => today - Duration::days(days_back(today, *target)),
            DateReference::LastWeekday(target) => {
                let back = match days_back(today, *target) {
                    0 => 7,
                    n => n,
                };
                today - Duration::days(back)
            }
            DateReference::NextWeekday(target) => {
                let forward = (target.num_days_from_monday() + 7
                    - today.weekday().num_days_from_monday())
                    % 7;
                let forward = if forward == 0 { 7 } else { forward };
                today + Duration::days(forward as i64)
            }
            DateReference::Date(date) => *date,
        }
    }
}

/// Days since the most recent `target` weekday, 0 when today is one
fn days_back(today: NaiveDate, target: Weekday) -> i64 {
    ((today.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7) as i64
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}
