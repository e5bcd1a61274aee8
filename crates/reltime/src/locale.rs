#![forbid(unsafe_code)]

//! Locale keys and raw locale field data.
//!
//! Field data follows the CLDR `dateFields` shape:
//!
//! ```json
//! {
//!   "locale": "en",
//!   "fields": {
//!     "day": {
//!       "displayName": "Day",
//!       "relative": { "-1": "yesterday", "0": "today", "1": "tomorrow" },
//!       "relativeTime": {
//!         "future": { "one": "in {0} day", "other": "in {0} days" },
//!         "past": { "one": "{0} day ago", "other": "{0} days ago" }
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use reltime_i18n::PluralRule;
use serde::{Deserialize, Serialize};

use crate::error::{RelativeTimeError, Result};
use crate::unit::Unit;

/// Normalized root language subtag (`"en"` for `"en-US"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleKey(String);

impl LocaleKey {
    /// Reduce a tag to its first hyphen-delimited subtag, lower-cased.
    ///
    /// The result must be 2-3 ASCII letters.
    pub fn parse(tag: &str) -> Result<Self> {
        let root = tag.split('-').next().unwrap_or_default().to_ascii_lowercase();
        if (2..=3).contains(&root.len()) && root.bytes().all(|b| b.is_ascii_lowercase()) {
            Ok(Self(root))
        } else {
            Err(RelativeTimeError::MalformedLocaleTag(tag.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One registration record as supplied by a locale data loader.
///
/// Both members are optional on the wire so that an incomplete record can be
/// rejected with [`RelativeTimeError::InvalidLocaleData`] instead of a parse
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<LocaleFieldData>,
    /// Plural rule family name (`"czech"`). When absent the rule is inferred
    /// from the root language subtag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_rule: Option<String>,
}

impl LocaleData {
    #[must_use]
    pub fn new(locale: impl Into<String>, fields: LocaleFieldData) -> Self {
        Self {
            locale: Some(locale.into()),
            fields: Some(fields),
            plural_rule: None,
        }
    }

    /// Declare the plural rule family explicitly.
    #[must_use]
    pub fn with_plural_rule(mut self, rule: PluralRule) -> Self {
        self.plural_rule = Some(rule.as_str().to_string());
        self
    }

    /// Parse a single record from JSON.
    pub fn from_json_str(s: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Per-locale field descriptors keyed by field name.
///
/// Names other than the six [`Unit`]s (e.g. `"week"`, `"day-short"`) are
/// kept but never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleFieldData {
    fields: BTreeMap<String, FieldData>,
}

impl LocaleFieldData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the descriptor for a field name.
    pub fn insert(&mut self, name: impl Into<String>, field: FieldData) {
        self.fields.insert(name.into(), field);
    }

    /// Builder form of [`LocaleFieldData::insert`] for a unit.
    #[must_use]
    pub fn with(mut self, unit: Unit, field: FieldData) -> Self {
        self.insert(unit.as_str(), field);
        self
    }

    #[must_use]
    pub fn field(&self, unit: Unit) -> Option<&FieldData> {
        self.fields.get(unit.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Descriptor for one field (unit) of a locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Literal phrases for exact signed offsets (`-1` → "yesterday").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relative: BTreeMap<i64, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<RelativeTimePatterns>,
}

impl FieldData {
    /// Field with pluralized future/past patterns and no exact phrases.
    #[must_use]
    pub fn with_patterns(patterns: RelativeTimePatterns) -> Self {
        Self {
            relative_time: Some(patterns),
            ..Self::default()
        }
    }

    /// Add an exact-offset phrase.
    #[must_use]
    pub fn relative(mut self, offset: i64, phrase: impl Into<String>) -> Self {
        self.relative.insert(offset, phrase.into());
        self
    }
}

/// Plural-category keyed phrase templates, each with a `{0}` placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeTimePatterns {
    #[serde(default)]
    pub future: BTreeMap<String, String>,
    #[serde(default)]
    pub past: BTreeMap<String, String>,
}

impl RelativeTimePatterns {
    /// Patterns for a language with only `one`/`other` categories.
    #[must_use]
    pub fn one_other(
        future_one: &str,
        future_other: &str,
        past_one: &str,
        past_other: &str,
    ) -> Self {
        let pair = |one: &str, other: &str| {
            BTreeMap::from([
                ("one".to_string(), one.to_string()),
                ("other".to_string(), other.to_string()),
            ])
        };
        Self {
            future: pair(future_one, future_other),
            past: pair(past_one, past_other),
        }
    }
}
