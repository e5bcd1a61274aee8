#![forbid(unsafe_code)]

//! Process-wide formatting state.
//!
//! [`RelativeTimeContext`] bundles everything formatters share: the locale
//! catalog, the threshold table and the default locale. Hosts populate it at
//! startup and may hot-update it afterwards.
//!
//! # Concurrency
//!
//! | State | Read | Write |
//! |-------|------|-------|
//! | Catalog | shared lock, `Arc` clone | exclusive lock, whole-record swap |
//! | Thresholds | wait-free `ArcSwap` load | atomic publish of a full table |
//! | Default locale | wait-free `ArcSwap` load | atomic publish |
//!
//! Readers of the threshold table always observe either the old table or
//! the new one in full, never a mix of both.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::catalog::LocaleCatalog;
use crate::error::Result;
use crate::locale::{LocaleData, LocaleKey};
use crate::thresholds::ThresholdTable;
use crate::unit::Unit;

/// Locale used when a formatter is constructed without requested locales.
pub const DEFAULT_LOCALE: &str = "en";

static GLOBAL: LazyLock<Arc<RelativeTimeContext>> =
    LazyLock::new(|| Arc::new(RelativeTimeContext::new()));

/// Shared catalog, thresholds and default locale.
#[derive(Debug)]
pub struct RelativeTimeContext {
    catalog: LocaleCatalog,
    thresholds: ArcSwap<ThresholdTable>,
    default_locale: ArcSwap<String>,
}

impl Default for RelativeTimeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RelativeTimeContext {
    /// Empty catalog, default thresholds, default locale `"en"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: LocaleCatalog::new(),
            thresholds: ArcSwap::from_pointee(ThresholdTable::default()),
            default_locale: ArcSwap::from_pointee(DEFAULT_LOCALE.to_string()),
        }
    }

    /// The process-wide context used by [`crate::RelativeFormatter::new`].
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    #[must_use]
    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// Register locale data. Last write wins.
    pub fn register(&self, data: LocaleData) -> Result<LocaleKey> {
        self.catalog.register(data)
    }

    /// Snapshot of the current thresholds.
    #[must_use]
    pub fn thresholds(&self) -> ThresholdTable {
        **self.thresholds.load()
    }

    /// Atomically publish a complete threshold table.
    pub fn set_thresholds(&self, table: ThresholdTable) -> Result<()> {
        table.validate()?;
        self.thresholds.store(Arc::new(table));
        tracing::debug!(target: "reltime.config", thresholds = ?table, "published thresholds");
        Ok(())
    }

    /// Change one boundary, leaving the others as they are.
    pub fn set_threshold(&self, unit: Unit, value: u32) -> Result<()> {
        let mut outcome = Ok(());
        let previous = self.thresholds.rcu(|current| match current.with(unit, value) {
            Ok(updated) => {
                outcome = Ok(());
                updated
            }
            Err(err) => {
                outcome = Err(err);
                **current
            }
        });
        outcome?;
        tracing::debug!(
            target: "reltime.config",
            unit = %unit,
            value,
            previous = ?previous.get(unit),
            thresholds = ?self.thresholds(),
            "updated threshold"
        );
        Ok(())
    }

    #[must_use]
    pub fn default_locale(&self) -> String {
        String::clone(&self.default_locale.load())
    }

    /// Set the locale tried when no locales are requested. Not validated
    /// until a formatter resolves it.
    pub fn set_default_locale(&self, tag: impl Into<String>) {
        self.default_locale.store(Arc::new(tag.into()));
    }
}
