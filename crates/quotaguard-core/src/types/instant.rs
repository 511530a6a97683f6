//! Timezone-tolerant instants.
//!
//! Remote documents carry expirations in several shapes, some with an
//! offset and some without. [`FlexibleInstant`] keeps that distinction and
//! compares across it: when exactly one side is naive, the naive side is
//! read as wall-clock time in the other side's offset. Comparisons never
//! fail.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// An instant that may or may not carry zone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexibleInstant {
    /// An instant with a fixed UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// A wall-clock date-time without zone information.
    Naive(NaiveDateTime),
}

impl FlexibleInstant {
    /// The current instant, in UTC.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Wrap a UTC instant.
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self::Zoned(instant.fixed_offset())
    }

    /// Build an instant from a store-native `{seconds, nanos}` timestamp.
    pub fn from_timestamp(seconds: i64, nanos: u32) -> Result<Self, AppError> {
        DateTime::<Utc>::from_timestamp(seconds, nanos)
            .map(Self::from_utc)
            .ok_or_else(|| AppError::parse(format!("Timestamp out of range: {seconds}s {nanos}ns")))
    }

    /// Parse an ISO-8601 date-time (with or without offset, trailing `Z`
    /// accepted) or a bare `YYYY-MM-DD` date.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::parse("Empty timestamp"));
        }

        let normalized = match trimmed.strip_suffix(['Z', 'z']) {
            Some(prefix) => format!("{prefix}+00:00"),
            None => trimmed.to_string(),
        };

        if let Ok(zoned) = DateTime::parse_from_rfc3339(&normalized) {
            return Ok(Self::Zoned(zoned));
        }
        for format in ZONED_FORMATS {
            if let Ok(zoned) = DateTime::parse_from_str(&normalized, format) {
                return Ok(Self::Zoned(zoned));
            }
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::Naive(naive));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::Naive(midnight));
            }
        }

        Err(AppError::parse(format!("Unrecognized timestamp: '{raw}'")))
    }

    /// Whether this instant carries zone information.
    pub fn is_zoned(&self) -> bool {
        matches!(self, Self::Zoned(_))
    }

    /// Convert to UTC. A naive instant is read as UTC wall-clock time.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Zoned(dt) => dt.with_timezone(&Utc),
            Self::Naive(naive) => Utc.from_utc_datetime(naive),
        }
    }

    /// Shift the instant by a number of days, preserving its zone shape.
    ///
    /// Fails instead of panicking when the result leaves chrono's range.
    pub fn plus_days(&self, days: i64) -> Result<Self, AppError> {
        let shifted = TimeDelta::try_days(days).and_then(|delta| match self {
            Self::Zoned(dt) => dt.checked_add_signed(delta).map(Self::Zoned),
            Self::Naive(naive) => naive.checked_add_signed(delta).map(Self::Naive),
        });
        shifted.ok_or_else(|| AppError::parse(format!("{self} shifted by {days} days is out of range")))
    }

    /// Compare two instants, coercing a naive side into the other side's zone.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Zoned(a), Self::Zoned(b)) => a.cmp(b),
            (Self::Naive(a), Self::Naive(b)) => a.cmp(b),
            (Self::Zoned(a), Self::Naive(b)) => a.cmp(&coerce(*b, *a.offset())),
            (Self::Naive(a), Self::Zoned(b)) => coerce(*a, *b.offset()).cmp(b),
        }
    }

    /// Whether this instant lies strictly before `other`.
    pub fn is_before(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// The signed duration `self - other`, using the same zone coercion as
    /// [`FlexibleInstant::compare`].
    pub fn duration_since(&self, other: &Self) -> TimeDelta {
        match (self, other) {
            (Self::Zoned(a), Self::Zoned(b)) => *a - *b,
            (Self::Naive(a), Self::Naive(b)) => *a - *b,
            (Self::Zoned(a), Self::Naive(b)) => *a - coerce(*b, *a.offset()),
            (Self::Naive(a), Self::Zoned(b)) => coerce(*a, *b.offset()) - *b,
        }
    }
}

/// Read a naive wall-clock time as local time at `offset`.
fn coerce(naive: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

impl fmt::Display for FlexibleInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoned(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Naive(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl FromStr for FlexibleInstant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for FlexibleInstant {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_utc(instant)
    }
}

impl Serialize for FlexibleInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FlexibleInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
