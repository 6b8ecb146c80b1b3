use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{BridgeError, Result};

pub const DATE_FORMAT: &str = "%m/%d/%Y";
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Inputs at least this long are parsed as full timestamps.
pub const FULL_TIMESTAMP_LEN: usize = 19;

/// Time-of-day pulled out of a source date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    At(NaiveTime),
    Missing,
}

impl TimeOfDay {
    pub const NO_TIME: &'static str = "No time data";
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(t) => write!(f, "{}", t.format(TIME_FORMAT)),
            Self::Missing => f.write_str(Self::NO_TIME),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    Full,
    DateOnly,
}

impl DatePattern {
    /// Picks the pattern purely from length. A long string that fails the
    /// full pattern is an error, never retried as date-only.
    pub fn for_input(trimmed: &str) -> Self {
        if trimmed.chars().count() >= FULL_TIMESTAMP_LEN {
            Self::Full
        } else {
            Self::DateOnly
        }
    }

    pub fn format(&self) -> &'static str {
        match self {
            Self::Full => DATETIME_FORMAT,
            Self::DateOnly => DATE_FORMAT,
        }
    }
}

/// Normalize a source date cell to `MM/DD/YYYY` plus its time-of-day, if any.
pub fn extract_date_time(raw: &str) -> Result<(String, TimeOfDay)> {
    let trimmed = raw.trim();
    let invalid = || BridgeError::DateFormat(raw.to_string());

    if !has_four_digit_year(trimmed) {
        return Err(invalid());
    }

    let pattern = DatePattern::for_input(trimmed);
    match pattern {
        DatePattern::Full => {
            let dt = NaiveDateTime::parse_from_str(trimmed, pattern.format())
                .map_err(|_| invalid())?;
            // chrono reads second 60 as a leap second; the export never has one.
            if dt.time().nanosecond() >= 1_000_000_000 {
                return Err(invalid());
            }
            Ok((
                dt.format(DATE_FORMAT).to_string(),
                TimeOfDay::At(dt.time()),
            ))
        }
        DatePattern::DateOnly => {
            let d = NaiveDate::parse_from_str(trimmed, pattern.format()).map_err(|_| invalid())?;
            Ok((d.format(DATE_FORMAT).to_string(), TimeOfDay::Missing))
        }
    }
}

// chrono's %Y happily takes one to four digits; the export format always
// carries a four digit year.
fn has_four_digit_year(trimmed: &str) -> bool {
    let date_part = trimmed.split_whitespace().next().unwrap_or("");
    match date_part.rsplit_once('/') {
        Some((_, year)) => year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
