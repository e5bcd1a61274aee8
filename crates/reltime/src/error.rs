#![forbid(unsafe_code)]

//! Error type shared by every reltime operation.
//!
//! All failures are synchronous and deterministic: retrying with the same
//! input reproduces the same error.

use reltime_i18n::MessageError;

use crate::unit::Unit;

/// Errors from registration, resolution, construction and formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelativeTimeError {
    /// A locale data record is missing its tag or its field data.
    #[error("invalid locale data: {0}")]
    InvalidLocaleData(String),

    /// A locale tag whose root subtag is not 2-3 ASCII letters.
    #[error("the locale \"{0}\" is not a structurally valid language tag")]
    MalformedLocaleTag(String),

    /// None of the requested locales has registered data.
    #[error("no locale data has been registered for: {}", attempted.join(", "))]
    UnsupportedLocale { attempted: Vec<String> },

    /// A fixed-unit option that is not one of the supported units.
    #[error("{}", invalid_unit_message(unit, *suggestion))]
    InvalidUnit {
        unit: String,
        suggestion: Option<Unit>,
    },

    /// A style option other than `best fit` or `numeric`.
    #[error("\"{0}\" is not a valid style, expected \"best fit\" or \"numeric\"")]
    InvalidStyle(String),

    /// A threshold that is zero or attached to a unit without one.
    #[error("invalid threshold for {unit}: {reason}")]
    InvalidThreshold { unit: Unit, reason: String },

    /// The value passed to `format` is not a real instant.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The locale has no `relativeTime` patterns for the unit in use.
    #[error("locale \"{locale}\" has no relative time data for {unit}")]
    MissingRelativeTime { locale: String, unit: Unit },

    /// The synthesized message failed to compile or evaluate.
    #[error(transparent)]
    Message(#[from] MessageError),
}

pub type Result<T> = std::result::Result<T, RelativeTimeError>;

fn invalid_unit_message(unit: &str, suggestion: Option<Unit>) -> String {
    match suggestion {
        Some(singular) => format!("\"{unit}\" is not a valid unit, did you mean \"{singular}\"?"),
        None => {
            let valid: Vec<String> = Unit::PRIORITY
                .iter()
                .map(|u| format!("\"{u}\""))
                .collect();
            format!(
                "\"{unit}\" is not a valid unit, must be one of: {}",
                valid.join(", ")
            )
        }
    }
}
