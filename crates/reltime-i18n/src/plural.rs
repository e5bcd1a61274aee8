#![forbid(unsafe_code)]

//! CLDR plural categories and per-locale plural rules.
//!
//! Only integer operands are supported; relative-time magnitudes are always
//! whole counts of a calendar unit.
//!
//! # Invariants
//!
//! 1. **Total**: every rule maps every `i64` (including `i64::MIN`) to a
//!    category without panicking.
//! 2. **Sign-blind**: `categorize(n) == categorize(-n)`; rules look at the
//!    absolute value only.
//! 3. **Closed range**: `categorize` only ever returns a member of
//!    [`PluralRule::categories`].

use std::fmt;
use std::str::FromStr;

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// All categories in CLDR order.
    pub const ALL: [Self; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    /// The CLDR keyword for this category (`"one"`, `"other"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a CLDR plural keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plural category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for PluralCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cat| cat.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Built-in plural rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PluralRule {
    /// one: n = 1; other.
    #[default]
    English,
    /// one: n = 0 or 1; other.
    French,
    /// one: n%10 = 1 and n%100 != 11; few: n%10 in 2..4 and n%100 not in
    /// 12..14; many: everything else.
    Russian,
    /// one: n = 1; few: n%10 in 2..4 and n%100 not in 12..14; many.
    Polish,
    /// one: n = 1; few: n in 2..4; other.
    Czech,
    /// zero, one, two, few (n%100 in 3..10), many (n%100 in 11..99), other.
    Arabic,
    /// Always other.
    CJK,
}

impl PluralRule {
    /// Pick the rule for a locale tag by its root language subtag.
    ///
    /// Unknown or malformed tags get [`PluralRule::English`].
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let root = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match root.as_str() {
            "fr" | "ff" | "kab" => Self::French,
            "ru" | "uk" | "be" => Self::Russian,
            "pl" => Self::Polish,
            "cs" => Self::Czech,
            "ar" => Self::Arabic,
            "zh" | "ja" | "ko" | "vi" | "th" | "id" | "ms" => Self::CJK,
            _ => Self::English,
        }
    }

    /// Every rule family, for lookups by name.
    pub const ALL: [Self; 7] = [
        Self::English,
        Self::French,
        Self::Russian,
        Self::Polish,
        Self::Czech,
        Self::Arabic,
        Self::CJK,
    ];

    /// Lower-case family name as written in locale data (`"czech"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::French => "french",
            Self::Russian => "russian",
            Self::Polish => "polish",
            Self::Czech => "czech",
            Self::Arabic => "arabic",
            Self::CJK => "cjk",
        }
    }

    /// The categories [`PluralRule::categorize`] can return for integers.
    #[must_use]
    pub const fn categories(self) -> &'static [PluralCategory] {
        use PluralCategory::{Few, Many, One, Other, Two, Zero};
        match self {
            Self::English | Self::French => &[One, Other],
            Self::Russian | Self::Polish => &[One, Few, Many],
            Self::Czech => &[One, Few, Other],
            Self::Arabic => &[Zero, One, Two, Few, Many, Other],
            Self::CJK => &[Other],
        }
    }

    /// Whether some integer count falls into `category`.
    #[must_use]
    pub fn produces(self, category: PluralCategory) -> bool {
        self.categories().contains(&category)
    }

    /// Categorize an integer count.
    #[must_use]
    pub fn categorize(self, count: i64) -> PluralCategory {
        let n = count.unsigned_abs();
        let mod10 = n % 10;
        let mod100 = n % 100;
        match self {
            Self::English => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::French => {
                if n <= 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::Russian => {
                if mod10 == 1 && mod100 != 11 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::Polish => {
                if n == 1 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::Czech => match n {
                1 => PluralCategory::One,
                2..=4 => PluralCategory::Few,
                _ => PluralCategory::Other,
            },
            Self::Arabic => match n {
                0 => PluralCategory::Zero,
                1 => PluralCategory::One,
                2 => PluralCategory::Two,
                _ if (3..=10).contains(&mod100) => PluralCategory::Few,
                _ if (11..=99).contains(&mod100) => PluralCategory::Many,
                _ => PluralCategory::Other,
            },
            Self::CJK => PluralCategory::Other,
        }
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`PluralRule`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plural rule: {0}")]
pub struct UnknownRule(pub String);

impl FromStr for PluralRule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}
