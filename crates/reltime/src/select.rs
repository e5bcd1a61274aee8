#![forbid(unsafe_code)]

//! Unit selection: zoom out until the difference fits.

use crate::diff::DiffReport;
use crate::thresholds::ThresholdTable;
use crate::unit::Unit;

/// Pick the finest unit whose absolute difference is strictly below its
/// threshold, or [`Unit::Year`] when none qualifies.
#[must_use]
pub fn select_unit(diff: &DiffReport, thresholds: &ThresholdTable) -> Unit {
    let unit = Unit::PRIORITY
        .into_iter()
        .find(|&unit| match thresholds.get(unit) {
            Some(limit) => diff.get(unit).unsigned_abs() < u64::from(limit),
            None => true,
        })
        .unwrap_or(Unit::Year);
    tracing::debug!(
        target: "reltime.select",
        unit = %unit,
        value = diff.get(unit),
        "selected unit"
    );
    unit
}
