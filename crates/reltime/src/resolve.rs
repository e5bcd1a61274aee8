#![forbid(unsafe_code)]

//! Locale negotiation by root-subtag prefix.
//!
//! Candidates are scanned in order; the first one that is structurally valid
//! *and* registered wins. A malformed candidate does not abort the scan.

use crate::catalog::LocaleCatalog;
use crate::error::{RelativeTimeError, Result};
use crate::locale::LocaleKey;

/// Resolve `requested` (or `default_tag` when it is empty) to a registered
/// [`LocaleKey`].
///
/// When nothing matches, a malformed candidate is reported as
/// `MalformedLocaleTag`; otherwise the failure is `UnsupportedLocale`
/// listing every attempted tag.
pub fn resolve_locale<S: AsRef<str>>(
    catalog: &LocaleCatalog,
    requested: &[S],
    default_tag: &str,
) -> Result<LocaleKey> {
    let candidates: Vec<&str> = if requested.is_empty() {
        vec![default_tag]
    } else {
        requested.iter().map(AsRef::as_ref).collect()
    };

    let mut first_malformed = None;
    for tag in &candidates {
        match LocaleKey::parse(tag) {
            Ok(key) if catalog.is_registered(&key) => {
                tracing::debug!(
                    target: "reltime.resolve",
                    tag = %tag,
                    key = %key,
                    "resolved locale"
                );
                return Ok(key);
            }
            Ok(_) => {}
            Err(err) => {
                first_malformed.get_or_insert(err);
            }
        }
    }

    tracing::debug!(
        target: "reltime.resolve",
        attempted = ?candidates,
        "no registered locale among candidates"
    );
    Err(first_malformed.unwrap_or_else(|| RelativeTimeError::UnsupportedLocale {
        attempted: candidates.iter().map(ToString::to_string).collect(),
    }))
}
