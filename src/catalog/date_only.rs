//! Calendar dates without a time of day.
//!
//! The zero value is the "missing date". It serializes as JSON `null`; every
//! other date serializes as a quoted `YYYY-MM-DD` string.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialized layout of a date
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// A date with no time-of-day component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateOnly(Option<NaiveDate>);

impl DateOnly {
    /// The missing date
    pub const ZERO: DateOnly = DateOnly(None);

    pub fn new(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    /// Build from a calendar date, `None` when the date does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }

    /// Truncate a timestamp to its date
    pub fn from_datetime<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self {
        Self(Some(moment.date_naive()))
    }

    /// Today in the local time zone
    pub fn today() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Parse the `YYYY-MM-DD` form
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(s.trim(), DATE_LAYOUT).map(Self::new)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.0
    }

    /// Format with a chrono pattern; empty for the missing date
    pub fn format(&self, pattern: &str) -> String {
        self.0
            .map(|d| d.format(pattern).to_string())
            .unwrap_or_default()
    }
}

impl From<NaiveDate> for DateOnly {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl fmt::Display for DateOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format(DATE_LAYOUT)),
            None => Ok(()),
        }
    }
}

impl Serialize for DateOnly {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(date) => serializer.collect_str(&date.format(DATE_LAYOUT)),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DateOnly {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") | Some("null") => Ok(DateOnly::ZERO),
            Some(s) => DateOnly::parse(s).map_err(|e| {
                serde::de::Error::custom(format!("invalid date '{}': {}", s, e))
            }),
        }
    }
}
