//! Calendar timezone used to decide which day a timestamp falls on

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timezone in which calendar days are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarZone {
    /// The system's local timezone
    #[default]
    Local,
    Utc,
    /// A fixed offset from UTC, e.g. `+05:30`
    Fixed(FixedOffset),
}

impl CalendarZone {
    /// Calendar day of `instant` in this zone
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            CalendarZone::Local => instant.with_timezone(&Local).date_naive(),
            CalendarZone::Utc => instant.date_naive(),
            CalendarZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    /// Today's date in this zone
    pub fn today(&self) -> NaiveDate {
        self.day_of(Utc::now())
    }

    /// Whether both instants fall on the same calendar day in this zone
    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.day_of(a) == self.day_of(b)
    }

    /// Render an instant as local wall-clock time for display
    pub fn format(&self, instant: DateTime<Utc>, fmt: &str) -> String {
        match self {
            CalendarZone::Local => instant.with_timezone(&Local).format(fmt).to_string(),
            CalendarZone::Utc => instant.format(fmt).to_string(),
            CalendarZone::Fixed(offset) => instant.with_timezone(offset).format(fmt).to_string(),
        }
    }
}

impl FromStr for CalendarZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "local" => return Ok(CalendarZone::Local),
            "utc" | "z" => return Ok(CalendarZone::Utc),
            _ => {}
        }

        parse_offset(trimmed)
            .map(CalendarZone::Fixed)
            .ok_or_else(|| format!("Invalid timezone: '{}'", s))
    }
}

/// Parse `+HH:MM`, `-HH:MM` or `+HHMM`
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarZone::Local => write!(f, "local"),
            CalendarZone::Utc => write!(f, "utc"),
            CalendarZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl TryFrom<String> for CalendarZone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarZone> for String {
    fn from(zone: CalendarZone) -> Self {
        zone.to_string()
    }
}
