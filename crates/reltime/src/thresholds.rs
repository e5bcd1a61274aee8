#![forbid(unsafe_code)]

//! Escalation thresholds for unit selection.
//!
//! A threshold is an exclusive upper bound: a difference of `45` seconds
//! with a `second` threshold of `45` is *not* reported in seconds.

use serde::{Deserialize, Serialize};

use crate::error::{RelativeTimeError, Result};
use crate::unit::Unit;

/// Per-unit magnitude boundaries. `year` has none; it is the terminal unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdTable {
    pub second: u32,
    pub minute: u32,
    pub hour: u32,
    pub day: u32,
    pub month: u32,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            second: 45,
            minute: 45,
            hour: 22,
            day: 26,
            month: 11,
        }
    }
}

impl ThresholdTable {
    /// The boundary for `unit`, or `None` for `year`.
    #[must_use]
    pub const fn get(&self, unit: Unit) -> Option<u32> {
        match unit {
            Unit::Second => Some(self.second),
            Unit::Minute => Some(self.minute),
            Unit::Hour => Some(self.hour),
            Unit::Day => Some(self.day),
            Unit::Month => Some(self.month),
            Unit::Year => None,
        }
    }

    /// Return a copy with one boundary replaced.
    pub fn with(mut self, unit: Unit, value: u32) -> Result<Self> {
        if value == 0 {
            return Err(RelativeTimeError::InvalidThreshold {
                unit,
                reason: "must be a positive integer".into(),
            });
        }
        let slot = match unit {
            Unit::Second => &mut self.second,
            Unit::Minute => &mut self.minute,
            Unit::Hour => &mut self.hour,
            Unit::Day => &mut self.day,
            Unit::Month => &mut self.month,
            Unit::Year => {
                return Err(RelativeTimeError::InvalidThreshold {
                    unit,
                    reason: "year is the coarsest unit and has no threshold".into(),
                });
            }
        };
        *slot = value;
        Ok(self)
    }

    /// Check every boundary is positive.
    pub fn validate(&self) -> Result<()> {
        for unit in Unit::PRIORITY {
            if self.get(unit) == Some(0) {
                return Err(RelativeTimeError::InvalidThreshold {
                    unit,
                    reason: "must be a positive integer".into(),
                });
            }
        }
        Ok(())
    }
}
