#![forbid(unsafe_code)]

//! Message synthesis from raw locale field data.
//!
//! A unit's `relativeTime` data is turned into one pattern tree:
//!
//! ```text
//! select(when)
//! ├── future → plural(0) { one: "in # day", other: "in # days" }
//! └── past   → plural(0) { one: "# day ago", other: "# days ago" }
//! ```
//!
//! where each `{0}` placeholder in the locale's phrase becomes the plural
//! value marker, so the message engine formats the magnitude itself. The
//! message is bound to the plural rule stored with the locale in the
//! catalog; phrases under a category that rule never produces are kept but
//! reported with a `warn` event.
//!
//! # Invariants
//!
//! 1. **Build once**: a [`MessageCache`] compiles each unit at most once per
//!    formatter and never rebuilds or invalidates the entry, even if the
//!    locale is re-registered later.
//! 2. **Bounded**: one slot per [`Unit`]; no eviction.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use reltime_i18n::{
    CompiledMessage, MessagePattern, PluralCategory, PluralNode, PluralRule, Segment, SelectNode,
};

use crate::catalog::LocaleCatalog;
use crate::error::{RelativeTimeError, Result};
use crate::locale::{FieldData, LocaleKey};
use crate::unit::Unit;

/// Name of the direction argument (`"future"` or `"past"`).
pub const WHEN_ARGUMENT: &str = "when";
/// Name of the numeric magnitude argument.
pub const COUNT_ARGUMENT: &str = "0";
/// Placeholder used by CLDR phrase templates.
const PLACEHOLDER: &str = "{0}";

/// Build the direction- and plural-aware pattern for one unit.
pub fn build_pattern(
    locale: &LocaleKey,
    unit: Unit,
    field: &FieldData,
    rule: PluralRule,
) -> Result<MessagePattern> {
    let patterns = field
        .relative_time
        .as_ref()
        .ok_or_else(|| RelativeTimeError::MissingRelativeTime {
            locale: locale.to_string(),
            unit,
        })?;

    let select = SelectNode::new(WHEN_ARGUMENT)
        .branch("future", plural_branch(locale, unit, rule, &patterns.future))
        .branch("past", plural_branch(locale, unit, rule, &patterns.past));
    Ok(Segment::Select(select).into())
}

fn plural_branch(
    locale: &LocaleKey,
    unit: Unit,
    rule: PluralRule,
    phrases: &BTreeMap<String, String>,
) -> MessagePattern {
    let mut node = PluralNode::new(COUNT_ARGUMENT);
    for (keyword, phrase) in phrases {
        match keyword.parse::<PluralCategory>() {
            Ok(category) => {
                if category != PluralCategory::Other && !rule.produces(category) {
                    tracing::warn!(
                        target: "reltime.message",
                        locale = %locale,
                        unit = %unit,
                        category = %category,
                        plural_rule = %rule,
                        "plural category is unreachable under the bound rule"
                    );
                }
                node = node.branch(category, substitute_placeholder(phrase));
            }
            Err(err) => tracing::warn!(
                target: "reltime.message",
                locale = %locale,
                unit = %unit,
                error = %err,
                "skipping relative time phrase"
            ),
        }
    }
    Segment::Plural(node).into()
}

/// Split a phrase at every `{0}`, inserting the plural value marker.
fn substitute_placeholder(phrase: &str) -> MessagePattern {
    let mut pattern = MessagePattern::new();
    let mut pieces = phrase.split(PLACEHOLDER);
    if let Some(first) = pieces.next() {
        pattern.push_text(first);
    }
    for piece in pieces {
        pattern.push_value();
        pattern.push_text(piece);
    }
    pattern
}

/// Per-formatter cache of compiled messages, one lazily filled slot per unit.
#[derive(Debug, Default)]
pub struct MessageCache {
    slots: [OnceLock<CompiledMessage>; 6],
}

impl MessageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached message for `unit`, if it has been built.
    #[must_use]
    pub fn get(&self, unit: Unit) -> Option<&CompiledMessage> {
        self.slots[unit.index()].get()
    }

    /// Units with a compiled message, in priority order.
    #[must_use]
    pub fn cached_units(&self) -> Vec<Unit> {
        Unit::PRIORITY
            .into_iter()
            .filter(|&unit| self.get(unit).is_some())
            .collect()
    }

    /// Return the compiled message for `unit`, building it on first access.
    pub fn get_or_build(
        &self,
        catalog: &LocaleCatalog,
        locale: &LocaleKey,
        unit: Unit,
    ) -> Result<&CompiledMessage> {
        if let Some(compiled) = self.get(unit) {
            return Ok(compiled);
        }

        let missing = || RelativeTimeError::MissingRelativeTime {
            locale: locale.to_string(),
            unit,
        };
        let entry = catalog.entry(locale).ok_or_else(missing)?;
        let field = entry.fields.field(unit).ok_or_else(missing)?;
        let pattern = build_pattern(locale, unit, field, entry.plural_rule)?;
        let compiled = CompiledMessage::compile_with_rule(pattern, entry.plural_rule)?;

        tracing::debug!(
            target: "reltime.message",
            locale = %locale,
            unit = %unit,
            plural_rule = ?compiled.plural_rule(),
            "compiled relative time message"
        );

        // A racing builder may have filled the slot; both results are equal.
        Ok(self.slots[unit.index()].get_or_init(|| compiled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{LocaleData, LocaleFieldData, RelativeTimePatterns};
    use reltime_i18n::ArgValue;

    fn en_day() -> FieldData {
        FieldData::with_patterns(RelativeTimePatterns::one_other(
            "in {0} day",
            "in {0} days",
            "{0} day ago",
            "{0} days ago",
        ))
    }

    fn key(tag: &str) -> LocaleKey {
        LocaleKey::parse(tag).unwrap()
    }

    fn eval(msg: &CompiledMessage, n: i64, when: &str) -> String {
        msg.evaluate(&[
            (COUNT_ARGUMENT, ArgValue::Number(n)),
            (WHEN_ARGUMENT, ArgValue::from(when)),
        ])
        .unwrap()
    }

    #[test]
    fn placeholder_becomes_value_marker() {
        let p = substitute_placeholder("in {0} days");
        assert_eq!(
            p.segments(),
            &[
                Segment::Text("in ".into()),
                Segment::Value,
                Segment::Text(" days".into()),
            ]
        );
        assert_eq!(substitute_placeholder("{0}").segments(), &[Segment::Value]);
        assert_eq!(
            substitute_placeholder("now").segments(),
            &[Segment::Text("now".into())]
        );
    }

    #[test]
    fn pattern_branches_on_direction_then_plural() {
        let pattern = build_pattern(&key("en"), Unit::Day, &en_day(), PluralRule::English).unwrap();
        let msg = CompiledMessage::compile_with_rule(pattern, PluralRule::English).unwrap();
        assert_eq!(eval(&msg, 1, "future"), "in 1 day");
        assert_eq!(eval(&msg, 4, "future"), "in 4 days");
        assert_eq!(eval(&msg, 1, "past"), "1 day ago");
        assert_eq!(eval(&msg, 30, "past"), "30 days ago");
    }

    #[test]
    fn braces_in_locale_text_are_literal() {
        let field = FieldData::with_patterns(RelativeTimePatterns::one_other(
            "{in} {0}",
            "{in} {0}",
            "{0} {ago}",
            "{0} {ago}",
        ));
        let pattern = build_pattern(&key("en"), Unit::Day, &field, PluralRule::English).unwrap();
        let msg = CompiledMessage::compile(pattern, "en").unwrap();
        assert_eq!(eval(&msg, 2, "future"), "{in} 2");
        assert_eq!(eval(&msg, 2, "past"), "2 {ago}");
    }

    #[test]
    fn missing_relative_time_is_an_error() {
        let err = build_pattern(
            &key("en"),
            Unit::Hour,
            &FieldData::default(),
            PluralRule::English,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RelativeTimeError::MissingRelativeTime {
                locale: "en".into(),
                unit: Unit::Hour
            }
        );
    }

    #[test]
    fn unknown_category_is_skipped() {
        let mut patterns = RelativeTimePatterns::one_other("in {0}", "in {0}", "{0} ago", "{0} ago");
        patterns.past.insert("plenty".into(), "lots ago".into());
        let pattern =
            build_pattern(&key("en"), Unit::Day, &FieldData::with_patterns(patterns), PluralRule::English)
                .unwrap();
        assert!(CompiledMessage::compile(pattern, "en").is_ok());
    }

    #[test]
    fn cache_builds_once_and_survives_reregistration() {
        let catalog = LocaleCatalog::new();
        let en = catalog
            .register(LocaleData::new(
                "en",
                LocaleFieldData::new().with(Unit::Day, en_day()),
            ))
            .unwrap();
        let cache = MessageCache::new();
        assert!(cache.cached_units().is_empty());

        let first = eval(cache.get_or_build(&catalog, &en, Unit::Day).unwrap(), 3, "past");
        assert_eq!(first, "3 days ago");
        assert_eq!(cache.cached_units(), vec![Unit::Day]);

        let other = FieldData::with_patterns(RelativeTimePatterns::one_other(
            "+{0}d", "+{0}d", "-{0}d", "-{0}d",
        ));
        catalog
            .register(LocaleData::new("en", LocaleFieldData::new().with(Unit::Day, other)))
            .unwrap();
        let again = eval(cache.get_or_build(&catalog, &en, Unit::Day).unwrap(), 3, "past");
        assert_eq!(again, "3 days ago", "cached message is never rebuilt");

        let fresh = MessageCache::new();
        let rebuilt = eval(fresh.get_or_build(&catalog, &en, Unit::Day).unwrap(), 3, "past");
        assert_eq!(rebuilt, "-3d");
    }

    #[test]
    fn missing_unit_fails_without_caching() {
        let catalog = LocaleCatalog::new();
        let en = catalog
            .register(LocaleData::new("en", LocaleFieldData::new()))
            .unwrap();
        let cache = MessageCache::new();
        assert!(matches!(
            cache.get_or_build(&catalog, &en, Unit::Second),
            Err(RelativeTimeError::MissingRelativeTime { unit: Unit::Second, .. })
        ));
        assert!(cache.get(Unit::Second).is_none());
    }

    #[test]
    fn plural_rule_follows_locale() {
        let catalog = LocaleCatalog::new();
        let mut future = BTreeMap::new();
        future.insert("one".to_string(), "через {0} день".to_string());
        future.insert("few".to_string(), "через {0} дня".to_string());
        future.insert("many".to_string(), "через {0} дней".to_string());
        future.insert("other".to_string(), "через {0} дня".to_string());
        let patterns = RelativeTimePatterns {
            future: future.clone(),
            past: future,
        };
        let ru = catalog
            .register(LocaleData::new(
                "ru-RU",
                LocaleFieldData::new().with(Unit::Day, FieldData::with_patterns(patterns)),
            ))
            .unwrap();
        let cache = MessageCache::new();
        let msg = cache.get_or_build(&catalog, &ru, Unit::Day).unwrap();
        assert_eq!(eval(msg, 21, "future"), "через 21 день");
        assert_eq!(eval(msg, 3, "future"), "через 3 дня");
        assert_eq!(eval(msg, 5, "future"), "через 5 дней");
    }

    fn czech_day() -> FieldData {
        let forms = |one: &str, few: &str, other: &str| {
            BTreeMap::from([
                ("one".to_string(), one.to_string()),
                ("few".to_string(), few.to_string()),
                ("other".to_string(), other.to_string()),
            ])
        };
        FieldData::with_patterns(RelativeTimePatterns {
            future: forms("za {0} den", "za {0} dny", "za {0} dní"),
            past: forms("před {0} dnem", "před {0} dny", "před {0} dny"),
        })
    }

    #[test]
    fn declared_rule_reaches_few_branch() {
        let catalog = LocaleCatalog::new();
        let sk = catalog
            .register(
                LocaleData::new("sk", LocaleFieldData::new().with(Unit::Day, czech_day()))
                    .with_plural_rule(PluralRule::Czech),
            )
            .unwrap();
        let cache = MessageCache::new();
        let msg = cache.get_or_build(&catalog, &sk, Unit::Day).unwrap();
        assert_eq!(msg.plural_rule(), PluralRule::Czech);
        assert_eq!(eval(msg, 1, "future"), "za 1 den");
        assert_eq!(eval(msg, 3, "future"), "za 3 dny");
        assert_eq!(eval(msg, 5, "future"), "za 5 dní");
    }

    #[test]
    fn inferred_rule_for_czech_tag() {
        let catalog = LocaleCatalog::new();
        let cs = catalog
            .register(LocaleData::new(
                "cs-CZ",
                LocaleFieldData::new().with(Unit::Day, czech_day()),
            ))
            .unwrap();
        let cache = MessageCache::new();
        let msg = cache.get_or_build(&catalog, &cs, Unit::Day).unwrap();
        assert_eq!(eval(msg, 4, "future"), "za 4 dny");
    }
}
