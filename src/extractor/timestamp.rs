// file: src/extractor/timestamp.rs
// description: date inference from free text with fallback to a default timestamp
// reference: https://docs.rs/chrono

use crate::extractor::patterns::date_candidates;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("unrecognised date layout: {0}")]
    Layout(String),

    #[error("year must have four digits: {0}")]
    ShortYear(String),

    #[error("no such calendar date: {0}")]
    InvalidDate(String),

    #[error("invalid time of day: {0}")]
    InvalidTime(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampOrigin {
    Extracted,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampCandidate {
    pub value: NaiveDateTime,
    pub origin: TimestampOrigin,
}

impl TimestampCandidate {
    pub fn format(&self) -> String {
        format_timestamp(self.value)
    }
}

/// Picks the earliest valid date mentioned in a text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampResolver;

impl TimestampResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, text: &str, default_date: NaiveDateTime) -> String {
        self.resolve_candidate(text, default_date).format()
    }

    pub fn resolve_candidate(&self, text: &str, default_date: NaiveDateTime) -> TimestampCandidate {
        match self.extract(text) {
            Some(value) => TimestampCandidate {
                value,
                origin: TimestampOrigin::Extracted,
            },
            None => TimestampCandidate {
                value: default_date,
                origin: TimestampOrigin::Fallback,
            },
        }
    }

    /// Earliest date in `text`. Ties keep the first occurrence.
    /// A single malformed candidate voids the whole attempt.
    pub fn extract(&self, text: &str) -> Option<NaiveDateTime> {
        let parsed = date_candidates(text)
            .map(parse_candidate)
            .collect::<Result<Vec<_>, _>>();

        match parsed {
            Ok(dates) => dates.into_iter().min(),
            Err(e) => {
                debug!("Discarding extracted dates: {}", e);
                None
            }
        }
    }

    /// Coerce a date column value into a timestamp; `None` when unusable.
    pub fn parse_published(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.naive_local());
        }

        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
                return Some(dt);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }

        self.extract(value)
    }
}

/// Dash-separated values are read as `Y-M-D`, slash-separated as `D/M/Y`.
pub fn parse_candidate(raw: &str) -> Result<NaiveDateTime, DateParseError> {
    let (date_part, time_part) = match raw.split_once([' ', 'T']) {
        Some((date, time)) => (date, Some(time)),
        None => (raw, None),
    };

    let date = if date_part.contains('-') {
        let [year, month, day] = split_three(date_part, '-', raw)?;
        build_date(year, month, day, raw)?
    } else {
        let [day, month, year] = split_three(date_part, '/', raw)?;
        build_date(year, month, day, raw)?
    };

    let time = match time_part {
        Some(time) => parse_time(time, raw)?,
        None => NaiveTime::MIN,
    };

    Ok(date.and_time(time))
}

fn split_three<'a>(value: &'a str, sep: char, raw: &str) -> Result<[&'a str; 3], DateParseError> {
    let parts: Vec<&str> = value.split(sep).collect();
    match parts.as_slice() {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(DateParseError::Layout(raw.to_string())),
    }
}

fn build_date(year: &str, month: &str, day: &str, raw: &str) -> Result<NaiveDate, DateParseError> {
    if year.len() != 4 {
        return Err(DateParseError::ShortYear(raw.to_string()));
    }

    let year: i32 = number(year, raw)?;
    let month: u32 = number(month, raw)?;
    let day: u32 = number(day, raw)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateParseError::InvalidDate(raw.to_string()))
}

fn parse_time(value: &str, raw: &str) -> Result<NaiveTime, DateParseError> {
    let mut fields = value.split(':');
    let hour: u32 = number(fields.next().unwrap_or_default(), raw)?;
    let minute: u32 = number(fields.next().unwrap_or_default(), raw)?;
    let second: u32 = match fields.next() {
        Some(s) => number(s, raw)?,
        None => 0,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| DateParseError::InvalidTime(raw.to_string()))
}

fn number<T: std::str::FromStr>(value: &str, raw: &str) -> Result<T, DateParseError> {
    value
        .parse()
        .map_err(|_| DateParseError::Layout(raw.to_string()))
}
