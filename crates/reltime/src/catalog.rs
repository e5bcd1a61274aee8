#![forbid(unsafe_code)]

//! Registry of locale field data.
//!
//! # Invariants
//!
//! 1. **Last write wins**: registering a key that is already present
//!    replaces the whole record; records are never merged.
//!
//! 2. **No torn reads**: field data and its plural rule are stored together
//!    and swapped in under a write lock, so a concurrent reader observes
//!    either the old record or the new one in full.
//!
//! 3. **Append/overwrite only**: there is no removal operation.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing tag or fields | Incomplete record | `InvalidLocaleData`, nothing stored |
//! | Malformed tag | Root subtag not 2-3 letters | `MalformedLocaleTag`, nothing stored |
//! | Unknown `pluralRule` name | Data names no rule family | `InvalidLocaleData`, nothing stored |
//! | Unknown key | Never registered | `lookup` returns `None` |

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use reltime_i18n::PluralRule;

use crate::error::{RelativeTimeError, Result};
use crate::locale::{LocaleData, LocaleFieldData, LocaleKey};

/// One stored locale: its field data and the plural rule it is bound to.
#[derive(Debug, Clone)]
pub struct RegisteredLocale {
    pub fields: Arc<LocaleFieldData>,
    pub plural_rule: PluralRule,
}

/// Thread-safe map from [`LocaleKey`] to field data.
#[derive(Debug, Default)]
pub struct LocaleCatalog {
    locales: RwLock<HashMap<LocaleKey, RegisteredLocale>>,
}

impl LocaleCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a locale record under its normalized key.
    ///
    /// Returns the key the record was stored under.
    pub fn register(&self, data: LocaleData) -> Result<LocaleKey> {
        let LocaleData {
            locale,
            fields,
            plural_rule,
        } = data;
        let tag = locale
            .ok_or_else(|| RelativeTimeError::InvalidLocaleData("missing locale tag".into()))?;
        let fields = fields.ok_or_else(|| {
            RelativeTimeError::InvalidLocaleData(format!("missing field data for \"{tag}\""))
        })?;
        let key = LocaleKey::parse(&tag)?;
        let plural_rule = match plural_rule {
            Some(name) => name.parse::<PluralRule>().map_err(|e| {
                RelativeTimeError::InvalidLocaleData(format!("\"{tag}\": {e}"))
            })?,
            None => PluralRule::for_locale(key.as_str()),
        };

        let entry = RegisteredLocale {
            fields: Arc::new(fields),
            plural_rule,
        };
        let replaced = self
            .locales
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), entry)
            .is_some();

        tracing::debug!(
            target: "reltime.catalog",
            tag = %tag,
            key = %key,
            plural_rule = %plural_rule,
            replaced,
            "registered locale data"
        );
        Ok(key)
    }

    /// Field data for a key, if registered.
    #[must_use]
    pub fn lookup(&self, key: &LocaleKey) -> Option<Arc<LocaleFieldData>> {
        self.entry(key).map(|entry| entry.fields)
    }

    /// Field data and plural rule for a key, read under one lock.
    #[must_use]
    pub fn entry(&self, key: &LocaleKey) -> Option<RegisteredLocale> {
        self.locales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    #[must_use]
    pub fn is_registered(&self, key: &LocaleKey) -> bool {
        self.locales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// All registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<LocaleKey> {
        let mut keys: Vec<LocaleKey> = self
            .locales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
