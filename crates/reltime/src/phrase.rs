#![forbid(unsafe_code)]

//! Exact-match relative phrases ("yesterday", "next month").
//!
//! These bypass pluralized formatting entirely and only ever match an exact
//! signed offset, never a range.

use crate::catalog::LocaleCatalog;
use crate::locale::LocaleKey;
use crate::unit::Unit;

/// The locale's literal phrase for `offset` units away, if it defines one.
#[must_use]
pub fn resolve_exact(
    catalog: &LocaleCatalog,
    locale: &LocaleKey,
    unit: Unit,
    offset: i64,
) -> Option<String> {
    catalog
        .lookup(locale)?
        .field(unit)?
        .relative
        .get(&offset)
        .cloned()
}
