#![forbid(unsafe_code)]

//! Locale-aware relative time formatting.
//!
//! Turns a pair of instants into phrases like "3 days ago" or "in 2 hours",
//! choosing the most natural calendar unit and the locale's plural and
//! directional wording. Exact-offset idioms ("yesterday", "next month") are
//! used when the locale defines them.
//!
//! # How it fits together
//!
//! | Piece | Module |
//! |-------|--------|
//! | Locale keys and raw field data | [`locale`] |
//! | Registry of field data | [`catalog`] |
//! | Locale negotiation | [`resolve`] |
//! | Unit selection over thresholds | [`select`], [`thresholds`] |
//! | Exact-match phrases | [`phrase`] |
//! | Pattern synthesis and per-formatter cache | [`synth`] |
//! | Orchestration | [`formatter`] |
//! | Elapsed-time decomposition | [`diff`] |
//! | Shared state and configuration | [`context`], [`config`] |
//!
//! Pluralization itself lives in `reltime-i18n`.

pub mod catalog;
pub mod config;
pub mod context;
pub mod data;
pub mod diff;
pub mod error;
pub mod formatter;
pub mod locale;
pub mod phrase;
pub mod resolve;
pub mod select;
pub mod synth;
pub mod thresholds;
pub mod unit;

pub use catalog::{LocaleCatalog, RegisteredLocale};
pub use config::{ConfigError, RelativeTimeConfig};
pub use context::{DEFAULT_LOCALE, RelativeTimeContext};
pub use diff::{DateInput, DiffReport};
pub use error::{RelativeTimeError, Result};
pub use formatter::{FormatterOptions, RelativeFormatter, ResolvedOptions};
pub use locale::{FieldData, LocaleData, LocaleFieldData, LocaleKey, RelativeTimePatterns};
pub use thresholds::ThresholdTable;
pub use unit::{Style, Unit};

/// Register locale data in the process-wide context.
pub fn register(data: LocaleData) -> Result<LocaleKey> {
    RelativeTimeContext::global().register(data)
}

/// The process-wide default locale tag.
#[must_use]
pub fn default_locale() -> String {
    RelativeTimeContext::global().default_locale()
}

/// Replace the process-wide default locale tag.
pub fn set_default_locale(tag: impl Into<String>) {
    RelativeTimeContext::global().set_default_locale(tag);
}

/// Snapshot of the process-wide thresholds.
#[must_use]
pub fn thresholds() -> ThresholdTable {
    RelativeTimeContext::global().thresholds()
}

/// Atomically replace the process-wide thresholds.
pub fn set_thresholds(table: ThresholdTable) -> Result<()> {
    RelativeTimeContext::global().set_thresholds(table)
}
