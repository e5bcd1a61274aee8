#![forbid(unsafe_code)]

//! Bundled CLDR-derived locale data.

use crate::context::RelativeTimeContext;
use crate::error::{RelativeTimeError, Result};
use crate::locale::{LocaleData, LocaleKey};

/// `(tag, json)` for every bundled locale.
pub const BUILTIN_LOCALES: [(&str, &str); 3] = [
    ("en", include_str!("../data/en.json")),
    ("fr", include_str!("../data/fr.json")),
    ("ru", include_str!("../data/ru.json")),
];

/// Parse every bundled record.
pub fn builtin_locale_data() -> Result<Vec<LocaleData>> {
    BUILTIN_LOCALES
        .iter()
        .map(|(tag, json)| {
            LocaleData::from_json_str(json)
                .map_err(|e| RelativeTimeError::InvalidLocaleData(format!("{tag}: {e}")))
        })
        .collect()
}

/// Register every bundled locale into `context`.
pub fn register_builtin_locales(context: &RelativeTimeContext) -> Result<Vec<LocaleKey>> {
    builtin_locale_data()?
        .into_iter()
        .map(|data| context.register(data))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    #[test]
    fn bundled_data_parses_and_covers_every_unit() {
        let ctx = RelativeTimeContext::new();
        let keys = register_builtin_locales(&ctx).unwrap();
        assert_eq!(keys.len(), BUILTIN_LOCALES.len());
        for key in keys {
            let fields = ctx.catalog().lookup(&key).unwrap();
            for unit in Unit::PRIORITY {
                let field = fields
                    .field(unit)
                    .unwrap_or_else(|| panic!("{key} lacks {unit}"));
                let rt = field.relative_time.as_ref().unwrap();
                assert!(rt.future.contains_key("other"), "{key}/{unit} future");
                assert!(rt.past.contains_key("other"), "{key}/{unit} past");
            }
        }
    }

    #[test]
    fn tags_match_records() {
        for (data, (tag, _)) in builtin_locale_data().unwrap().iter().zip(BUILTIN_LOCALES) {
            assert_eq!(data.locale.as_deref(), Some(tag));
        }
    }
}
