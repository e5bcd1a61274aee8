#![forbid(unsafe_code)]

//! The public relative-time formatter.
//!
//! Control flow of [`RelativeFormatter::format`]:
//!
//! 1. resolve the target (and reference) input to real instants
//! 2. decompose the difference per unit ([`crate::diff::diff`])
//! 3. pick the unit: the pinned one, or [`select_unit`] over the current
//!    thresholds
//! 4. under [`Style::BestFit`], return the locale's exact-match phrase for
//!    the signed offset if it has one
//! 5. otherwise evaluate the unit's cached message with the magnitude and
//!    direction

use std::sync::Arc;

use chrono::Utc;
use reltime_i18n::ArgValue;

use crate::context::RelativeTimeContext;
use crate::diff::{DateInput, DiffReport, diff};
use crate::error::Result;
use crate::locale::LocaleKey;
use crate::phrase::resolve_exact;
use crate::resolve::resolve_locale;
use crate::select::select_unit;
use crate::synth::{COUNT_ARGUMENT, MessageCache, WHEN_ARGUMENT};
use crate::unit::{Style, Unit};

/// Construction options. Values are validated by the constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterOptions {
    /// Pin every `format` call to this unit (`"second"` ... `"year"`).
    pub units: Option<String>,
    /// `"best fit"` (default) or `"numeric"`.
    pub style: Option<String>,
}

impl FormatterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    #[must_use]
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Snapshot of a formatter's resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub locale: LocaleKey,
    pub units: Option<Unit>,
    pub style: Style,
}

/// Formats instants as locale-aware relative phrases.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::{TimeDelta, Utc};
/// use reltime::{FormatterOptions, RelativeFormatter, RelativeTimeContext};
///
/// let ctx = Arc::new(RelativeTimeContext::new());
/// reltime::data::register_builtin_locales(&ctx).unwrap();
///
/// let rf = RelativeFormatter::with_context(ctx, &["en-US"], FormatterOptions::new()).unwrap();
/// let now = Utc::now();
/// assert_eq!(rf.format_at(now - TimeDelta::seconds(30), now).unwrap(), "30 seconds ago");
/// assert_eq!(rf.format_at(now + TimeDelta::hours(2), now).unwrap(), "in 2 hours");
/// assert_eq!(rf.format_at(now - TimeDelta::days(1), now).unwrap(), "yesterday");
/// ```
#[derive(Debug)]
pub struct RelativeFormatter {
    context: Arc<RelativeTimeContext>,
    locale: LocaleKey,
    units: Option<Unit>,
    style: Style,
    messages: MessageCache,
}

impl RelativeFormatter {
    /// Build a formatter against the process-wide context.
    pub fn new<S: AsRef<str>>(locales: &[S], options: FormatterOptions) -> Result<Self> {
        Self::with_context(RelativeTimeContext::global(), locales, options)
    }

    /// Build a formatter against an explicit context.
    pub fn with_context<S: AsRef<str>>(
        context: Arc<RelativeTimeContext>,
        locales: &[S],
        options: FormatterOptions,
    ) -> Result<Self> {
        let locale = resolve_locale(context.catalog(), locales, &context.default_locale())?;
        let units = options.units.as_deref().map(str::parse::<Unit>).transpose()?;
        let style = options
            .style
            .as_deref()
            .map(str::parse::<Style>)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            context,
            locale,
            units,
            style,
            messages: MessageCache::new(),
        })
    }

    /// Format `target` relative to the current time.
    pub fn format(&self, target: impl Into<DateInput>) -> Result<String> {
        self.format_at(target, Utc::now())
    }

    /// Format `target` relative to `now`.
    pub fn format_at(
        &self,
        target: impl Into<DateInput>,
        now: impl Into<DateInput>,
    ) -> Result<String> {
        let target = target.into().resolve()?;
        let now = now.into().resolve()?;
        self.format_diff(&diff(now, target))
    }

    /// Format an already computed difference.
    pub fn format_diff(&self, report: &DiffReport) -> Result<String> {
        let unit = self
            .units
            .unwrap_or_else(|| select_unit(report, &self.context.thresholds()));
        let offset = report.get(unit);

        if self.style == Style::BestFit
            && let Some(phrase) = resolve_exact(self.context.catalog(), &self.locale, unit, offset)
        {
            tracing::trace!(target: "reltime.format", unit = %unit, offset, "exact phrase");
            return Ok(phrase);
        }

        let message = self
            .messages
            .get_or_build(self.context.catalog(), &self.locale, unit)?;
        let when = if offset < 0 { "past" } else { "future" };
        let text = message.evaluate(&[
            (COUNT_ARGUMENT, ArgValue::Number(offset.saturating_abs())),
            (WHEN_ARGUMENT, ArgValue::from(when)),
        ])?;
        Ok(text)
    }

    #[must_use]
    pub fn resolved_options(&self) -> ResolvedOptions {
        ResolvedOptions {
            locale: self.locale.clone(),
            units: self.units,
            style: self.style,
        }
    }

    /// Units whose message has been compiled by this formatter.
    #[must_use]
    pub fn cached_units(&self) -> Vec<Unit> {
        self.messages.cached_units()
    }
}
