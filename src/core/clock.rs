use crate::domain::ports::TimeSource;
use crate::utils::error::{MoonError, Result};
use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike,
    Utc,
};
use std::fmt;
use std::str::FromStr;

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// How naive calendar dates become absolute timestamps.
///
/// `Local` follows the system zone. `Fixed` pins every conversion to one UTC
/// offset, which makes results identical on every machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZonePolicy {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl TimeZonePolicy {
    pub fn utc() -> Self {
        // 0 秒偏移必定合法
        TimeZonePolicy::Fixed(Utc.fix())
    }

    /// The instant as a wall-clock reading in this zone, whole seconds only.
    pub fn naive_now(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        let naive = match self {
            TimeZonePolicy::Local => instant.with_timezone(&Local).naive_local(),
            TimeZonePolicy::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        };
        naive.with_nanosecond(0).unwrap_or(naive)
    }

    /// Seconds since the Unix epoch for a wall-clock reading in this zone.
    pub fn timestamp(&self, naive: NaiveDateTime) -> Result<i64> {
        match self {
            TimeZonePolicy::Fixed(offset) => wall_clock_timestamp(offset, naive),
            TimeZonePolicy::Local => wall_clock_timestamp(&Local, naive),
        }
    }
}

/// Earliest instant a mapping can stand for. The candidates of an ambiguous
/// mapping are not guaranteed to arrive in order.
fn earliest_timestamp<Tz: TimeZone>(mapped: LocalResult<DateTime<Tz>>) -> Option<i64> {
    match mapped {
        LocalResult::Single(dt) => Some(dt.timestamp()),
        LocalResult::Ambiguous(first, second) => Some(first.timestamp().min(second.timestamp())),
        LocalResult::None => None,
    }
}

/// Wall-clock reading to Unix seconds. A repeated hour (DST fold) resolves to
/// the earlier instant; a skipped hour (DST gap) is read one hour later.
pub(crate) fn wall_clock_timestamp<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Result<i64> {
    if let Some(timestamp) = earliest_timestamp(zone.from_local_datetime(&naive)) {
        return Ok(timestamp);
    }

    // DST 跳躍造成的不存在時刻，往後推一小時
    let shifted = naive + TimeDelta::hours(1);
    tracing::debug!("{} does not exist in this zone, using {}", naive, shifted);
    earliest_timestamp(zone.from_local_datetime(&shifted)).ok_or_else(|| {
        MoonError::TimeZoneError {
            message: format!("{} does not exist in the selected time zone", naive),
        }
    })
}

impl FromStr for TimeZonePolicy {
    type Err = MoonError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        match value.to_ascii_lowercase().as_str() {
            "local" => return Ok(TimeZonePolicy::Local),
            "utc" | "z" => return Ok(TimeZonePolicy::utc()),
            _ => {}
        }

        let invalid = |reason: &str| MoonError::TimeZoneError {
            message: format!("'{}' is not a valid time zone ({})", s, reason),
        };

        let sign = match value.chars().next() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return Err(invalid("expected local, utc or +HH:MM")),
        };

        let digits: String = value[1..].chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("offset must look like +HH:MM"));
        }

        let hours: i32 = digits[..2].parse().map_err(|_| invalid("bad hours"))?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid("bad minutes"))?;
        if minutes >= 60 {
            return Err(invalid("minutes must be below 60"));
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(TimeZonePolicy::Fixed)
            .ok_or_else(|| invalid("offset out of range"))
    }
}

impl fmt::Display for TimeZonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZonePolicy::Local => f.write_str("local"),
            TimeZonePolicy::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}
