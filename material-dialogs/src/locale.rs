//! Locale-keyed month names for the month grid and calendar headers.
//!
//! ## Lookup rule
//!
//! 1. The language subtag of the requested tag (`ru` for `ru-RU`) is looked up
//!    in the table of hand-authored names. The built-in table only knows
//!    `ru`; callers add more with [`MonthNames::register`].
//! 2. Otherwise the names come from chrono's `%B` formatting for the tag:
//!    `en-US` is tried as `en_US`, a bare language `fr` as `fr_FR`.
//! 3. Tags chrono does not know fall back to the POSIX (English) names.

use std::collections::HashMap;

use chrono::{Datelike, Locale, NaiveDate, Weekday};

use crate::calendar::weekday_sequence;
use tracing::debug;

const RUSSIAN_MONTHS: [&str; 12] = [
    "январь",
    "февраль",
    "март",
    "апрель",
    "май",
    "июнь",
    "июль",
    "август",
    "сентябрь",
    "октябрь",
    "ноябрь",
    "декабрь",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month name tables keyed by language subtag.
#[derive(Debug, Clone)]
pub struct MonthNames {
    tables: HashMap<String, [String; 12]>,
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MonthNames {
    /// Table with the hand-authored Russian names.
    pub fn builtin() -> Self {
        let mut names = Self::empty();
        names.register("ru", RUSSIAN_MONTHS);
        names
    }

    /// Table without hand-authored names; every lookup is formatted.
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Registers hand-authored names for a language, replacing any existing
    /// table.
    pub fn register<S: Into<String>>(&mut self, language: &str, names: [S; 12]) {
        self.tables
            .insert(language_of(language), names.map(Into::into));
    }

    /// Returns whether a hand-authored table exists for the tag's language.
    pub fn has_table(&self, tag: &str) -> bool {
        self.tables.contains_key(&language_of(tag))
    }

    /// The twelve month names for `tag`, January first.
    pub fn names_for(&self, tag: &str) -> Vec<String> {
        if let Some(table) = self.tables.get(&language_of(tag)) {
            return table.to_vec();
        }
        let locale = chrono_locale(tag);
        (1..=12)
            .map(|month| format_month(month, locale))
            .collect()
    }

    /// Name of a single month (1-12) for `tag`.
    pub fn name(&self, tag: &str, month: u32) -> String {
        let index = month.clamp(1, 12) as usize - 1;
        if let Some(table) = self.tables.get(&language_of(tag)) {
            return table[index].clone();
        }
        format_month(month.clamp(1, 12), chrono_locale(tag))
    }
}

fn format_month(month: u32, locale: Locale) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc().format_localized("%B", locale).to_string())
        .unwrap_or_else(|| ENGLISH_MONTHS[(month as usize).saturating_sub(1) % 12].to_string())
}

/// Abbreviated weekday names for the day grid header, starting at
/// `first_day_of_week`.
pub fn weekday_labels(tag: &str, first_day_of_week: Weekday) -> Vec<String> {
    let locale = chrono_locale(tag);
    weekday_sequence(first_day_of_week)
        .into_iter()
        .map(|weekday| {
            // 2024-01-01 is a Monday.
            NaiveDate::from_ymd_opt(2024, 1, 1 + weekday.num_days_from_monday())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|date| date.and_utc().format_localized("%a", locale).to_string())
                .unwrap_or_else(|| weekday.to_string())
        })
        .collect()
}

/// Headline text for a selected date, such as `Fri, Mar 15`.
pub fn format_headline(date: NaiveDate, tag: &str) -> String {
    let locale = chrono_locale(tag);
    date.and_hms_opt(0, 0, 0)
        .map(|date| date.and_utc().format_localized("%a, %b %-d", locale).to_string())
        .unwrap_or_else(|| format!("{}-{:02}-{:02}", date.year(), date.month(), date.day()))
}

/// Lowercased language subtag of a BCP 47 or POSIX style tag.
pub(crate) fn language_of(tag: &str) -> String {
    tag.split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Resolves a tag to a chrono locale, falling back to POSIX.
pub fn chrono_locale(tag: &str) -> Locale {
    let normalized = tag.split(['.', '@']).next().unwrap_or_default().replace('-', "_");
    if let Ok(locale) = Locale::try_from(normalized.as_str()) {
        return locale;
    }

    let language = language_of(tag);
    let regional = format!("{language}_{}", language.to_ascii_uppercase());
    if let Ok(locale) = Locale::try_from(regional.as_str()) {
        return locale;
    }

    debug!(tag, "unknown locale tag, using POSIX month names");
    Locale::POSIX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn russian_uses_hand_authored_nominative_names() {
        let names = MonthNames::builtin();
        let months = names.names_for("ru-RU");
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "январь");
        assert_eq!(months[2], "март");
        assert_eq!(names.name("ru", 12), "декабрь");
        assert!(names.has_table("ru_RU.UTF-8"));
    }

    #[test]
    fn other_locales_are_formatted() {
        let names = MonthNames::builtin();
        let months = names.names_for("en-US");
        assert_eq!(months[0], "January");
        assert_eq!(months[11], "December");
        assert!(!names.has_table("en-US"));
    }

    #[test]
    fn unknown_tags_fall_back_to_english() {
        let names = MonthNames::empty();
        assert_eq!(names.name("xx-YY", 3), "March");
        assert_eq!(format_month(1, chrono_locale("not a locale")), "January");
    }

    #[test]
    fn weekday_labels_rotate_with_first_day() {
        let labels = weekday_labels("en-US", Weekday::Sun);
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], "Sun");
        assert_eq!(labels[1], "Mon");
        assert_eq!(
            format_headline(NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"), "en-US"),
            "Fri, Mar 15"
        );
    }

    #[test]
    fn registered_tables_take_precedence() {
        let mut names = MonthNames::empty();
        names.register(
            "de",
            [
                "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
            ],
        );
        assert_eq!(names.name("de-AT", 3), "Mär");
        assert_eq!(language_of("de-AT"), "de");
    }
}
