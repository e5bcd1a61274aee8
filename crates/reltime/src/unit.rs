#![forbid(unsafe_code)]

//! Calendar units and formatting styles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RelativeTimeError;

/// A calendar unit a relative time can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Unit {
    /// Ascending granularity. Escalation order for unit selection.
    pub const PRIORITY: [Self; 6] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Month,
        Self::Year,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Position in [`Unit::PRIORITY`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = RelativeTimeError;

    /// Exact unit names only. `"days"` is rejected with a suggestion of
    /// `"day"`; anything else lists the valid units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(unit) = Self::PRIORITY.into_iter().find(|u| u.as_str() == s) {
            return Ok(unit);
        }
        let suggestion = s
            .strip_suffix('s')
            .and_then(|singular| Self::PRIORITY.into_iter().find(|u| u.as_str() == singular));
        Err(RelativeTimeError::InvalidUnit {
            unit: s.to_string(),
            suggestion,
        })
    }
}

/// Whether exact-match phrases ("yesterday") may replace numeric ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// Prefer the locale's idiomatic phrase for exact offsets.
    #[default]
    BestFit,
    /// Always produce a numeric phrase ("1 day ago").
    Numeric,
}

impl Style {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BestFit => "best fit",
            Self::Numeric => "numeric",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = RelativeTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best fit" => Ok(Self::BestFit),
            "numeric" => Ok(Self::Numeric),
            other => Err(RelativeTimeError::InvalidStyle(other.to_string())),
        }
    }
}
