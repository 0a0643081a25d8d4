//! Civil birth time to Julian day.
//!
//! Local date and clock time are combined with a UTC offset, shifted to UTC
//! and expressed as a continuous Julian day number (UT), the time scale the
//! ephemeris back-ends are queried with.

use crate::error::ChartError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Julian day of 2000-01-01 12:00 UT.
pub const J2000: f64 = 2_451_545.0;

/// Julian day of the Unix epoch, 1970-01-01 00:00 UT.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Continuous day count (UT).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(pub f64);

impl JulianDay {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Proleptic Gregorian conversion; the same day count Swiss Ephemeris'
    /// `julday` produces with the Gregorian flag.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        let seconds = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
        JulianDay(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Calendar date as entered, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl CivilDate {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }
}

/// Wall-clock time as entered, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilTime {
    pub hour: u32,
    pub minute: u32,
}

impl CivilTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }
}

/// Offset of local civil time from UTC, east positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset(FixedOffset);

impl UtcOffset {
    pub fn utc() -> Self {
        UtcOffset(Utc.fix())
    }

    /// Offset in minutes east of Greenwich; fails at a magnitude of 24h or more.
    pub fn from_minutes(minutes: i32) -> Result<Self, ChartError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(UtcOffset)
            .ok_or_else(|| {
                ChartError::InvalidTimeInput(format!("UTC offset out of range: {} minutes", minutes))
            })
    }

    pub fn minutes(self) -> i32 {
        self.0.local_minus_utc() / 60
    }

    pub fn as_fixed(self) -> FixedOffset {
        self.0
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.minutes();
        let sign = if minutes < 0 { '-' } else { '+' };
        let minutes = minutes.abs();
        write!(f, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
    }
}

/// Accepts `Z`, `UTC`, `±HH:MM`, `±HHMM` and `±HH` (hours may be one digit).
impl FromStr for UtcOffset {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
            return Ok(UtcOffset::utc());
        }

        let invalid = || ChartError::InvalidTimeInput(format!("Unresolvable UTC offset: {:?}", s));

        let (sign, rest) = match text.chars().next() {
            Some('+') => (1, &text[1..]),
            Some('-') => (-1, &text[1..]),
            _ => return Err(invalid()),
        };

        if rest.is_empty() || !rest.is_ascii() {
            return Err(invalid());
        }
        let (hh, mm) = match rest.as_bytes() {
            [_] | [_, _] => (rest, "0"),
            [_, _, b':', _, _] => (&rest[..2], &rest[3..]),
            [_, _, _, _] => (&rest[..2], &rest[2..]),
            _ => return Err(invalid()),
        };
        if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = hh.parse().map_err(|_| invalid())?;
        let minutes: i32 = mm.parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }

        UtcOffset::from_minutes(sign * (hours * 60 + minutes))
    }
}

impl Serialize for UtcOffset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UtcOffset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A birth moment on the UT time scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardizedTime {
    pub utc: DateTime<Utc>,
    pub julian_day: JulianDay,
}

impl StandardizedTime {
    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        Self {
            utc,
            julian_day: JulianDay::from_utc(utc),
        }
    }
}

/// Convert a local civil date and time to UTC and its Julian day.
pub fn normalize_time(
    date: CivilDate,
    time: CivilTime,
    offset: UtcOffset,
) -> Result<StandardizedTime, ChartError> {
    let naive_date = NaiveDate::from_ymd_opt(date.year, date.month, date.day).ok_or_else(|| {
        ChartError::InvalidTimeInput(format!(
            "No such calendar date: {:02}.{:02}.{:04}",
            date.day, date.month, date.year
        ))
    })?;
    let naive_time = NaiveTime::from_hms_opt(time.hour, time.minute, 0).ok_or_else(|| {
        ChartError::InvalidTimeInput(format!(
            "No such clock time: {:02}:{:02}",
            time.hour, time.minute
        ))
    })?;

    let local = NaiveDateTime::new(naive_date, naive_time);
    let aware = offset
        .as_fixed()
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| {
            ChartError::InvalidTimeInput(format!("Ambiguous local time {} at {}", local, offset))
        })?;

    Ok(StandardizedTime::from_utc(aware.with_timezone(&Utc)))
}
