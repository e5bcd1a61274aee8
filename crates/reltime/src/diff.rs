#![forbid(unsafe_code)]

//! Elapsed-time decomposition between two instants.
//!
//! Sub-day units are rounded successively from the millisecond difference
//! (`second = round(ms / 1000)`, `minute = round(second / 60)`, ...).
//! Months and years are calendar-aware: whole calendar steps are counted
//! with [`chrono::Months`], and the remainder is rounded against the actual
//! length of the next step, so month lengths and leap years are respected.
//!
//! Every count is signed: positive when the target is after the reference.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Datelike, Months, TimeZone, Utc};

use crate::error::{RelativeTimeError, Result};
use crate::unit::Unit;

/// Largest epoch offset accepted for numeric input (±100,000,000 days).
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Signed per-unit difference between a reference instant and a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiffReport {
    pub second: i64,
    pub minute: i64,
    pub hour: i64,
    pub day: i64,
    pub month: i64,
    pub year: i64,
}

impl DiffReport {
    #[must_use]
    pub const fn get(&self, unit: Unit) -> i64 {
        match unit {
            Unit::Second => self.second,
            Unit::Minute => self.minute,
            Unit::Hour => self.hour,
            Unit::Day => self.day,
            Unit::Month => self.month,
            Unit::Year => self.year,
        }
    }
}

/// Compute the difference from `from` to `to`.
#[must_use]
pub fn diff(from: DateTime<Utc>, to: DateTime<Utc>) -> DiffReport {
    let millisecond = to.signed_duration_since(from).num_milliseconds();
    let second = round_div(millisecond, 1000);
    let minute = round_div(second, 60);
    let hour = round_div(minute, 60);
    let day = round_div(hour, 24);
    DiffReport {
        second,
        minute,
        hour,
        day,
        month: calendar_steps(from, to, 1),
        year: calendar_steps(from, to, 12),
    }
}

/// Integer division rounding half away from zero.
fn round_div(n: i64, d: i64) -> i64 {
    let q = n / d;
    let r = n % d;
    if r.unsigned_abs() * 2 >= d.unsigned_abs() {
        q + n.signum()
    } else {
        q
    }
}

fn calendar_steps(from: DateTime<Utc>, to: DateTime<Utc>, step: u32) -> i64 {
    if to >= from {
        forward_steps(from, to, step)
    } else {
        -forward_steps(to, from, step)
    }
}

/// Rounded number of `step`-month strides from `start` to `end` (`end >= start`).
fn forward_steps(start: DateTime<Utc>, end: DateTime<Utc>, step: u32) -> i64 {
    let months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());
    let step = i64::from(step);
    let mut whole = months.max(0) / step;

    let anchor = |k: i64| {
        u32::try_from(k * step)
            .ok()
            .and_then(|m| start.checked_add_months(Months::new(m)))
    };

    match anchor(whole) {
        Some(lower) if lower > end => whole -= 1,
        Some(_) => {}
        None => return whole,
    }
    let (Some(lower), Some(upper)) = (anchor(whole), anchor(whole + 1)) else {
        return whole;
    };
    let span = upper.signed_duration_since(lower).num_milliseconds();
    let rem = end.signed_duration_since(lower).num_milliseconds();
    if span > 0 && rem * 2 >= span {
        whole + 1
    } else {
        whole
    }
}

/// Anything `format` accepts as a target or reference instant.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Instant(DateTime<Utc>),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// Fractional milliseconds since the Unix epoch; NaN and infinities are
    /// invalid.
    EpochMillisF64(f64),
    /// RFC 3339 text.
    Text(String),
    System(SystemTime),
}

impl DateInput {
    /// Resolve to a real instant or fail with `InvalidDate`.
    pub fn resolve(&self) -> Result<DateTime<Utc>> {
        match self {
            Self::Instant(dt) => Ok(*dt),
            Self::EpochMillis(ms) => from_millis(*ms),
            Self::EpochMillisF64(ms) => {
                if !ms.is_finite() || ms.abs() > MAX_EPOCH_MILLIS {
                    return Err(RelativeTimeError::InvalidDate(format!(
                        "{ms} is not a valid epoch timestamp"
                    )));
                }
                // bounded above, so the cast cannot saturate
                from_millis(ms.trunc() as i64)
            }
            Self::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| RelativeTimeError::InvalidDate(format!("\"{text}\": {e}"))),
            Self::System(time) => {
                let millis = match time.duration_since(UNIX_EPOCH) {
                    Ok(after) => i64::try_from(after.as_millis()).ok(),
                    Err(before) => i64::try_from(before.duration().as_millis())
                        .ok()
                        .map(|ms| -ms),
                };
                millis.map_or_else(
                    || {
                        Err(RelativeTimeError::InvalidDate(
                            "system time out of range".into(),
                        ))
                    },
                    from_millis,
                )
            }
        }
    }
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| RelativeTimeError::InvalidDate(format!("{ms} is out of range")))
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Instant(value.with_timezone(&Utc))
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        Self::EpochMillis(value)
    }
}

impl From<f64> for DateInput {
    fn from(value: f64) -> Self {
        Self::EpochMillisF64(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<SystemTime> for DateInput {
    fn from(value: SystemTime) -> Self {
        Self::System(value)
    }
}
