use std::fmt;

use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Time,
};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        Self((now.unix_timestamp_nanos() / 1_000_000) as i64)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<Timestamp> for i64 {
    fn from(from: Timestamp) -> Self {
        from.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar date formatted as `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s.trim(), DATE_FORMAT)
}

pub fn format_date(date: Date) -> String {
    // The format description only contains numeric components.
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// Local time of day formatted as `HH:MM`.
pub fn parse_time(s: &str) -> Result<Time, time::error::Parse> {
    Time::parse(s.trim(), TIME_FORMAT)
}

pub fn format_time(time: Time) -> String {
    time.format(TIME_FORMAT).unwrap_or_default()
}
