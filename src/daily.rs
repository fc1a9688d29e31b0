//! Generated daily messages.
//!
//! When the posts queue is empty the bot still posts: a fixed message on a
//! handful of special calendar dates, otherwise a day-of-week theme combined
//! with a random pick from the configured fallback messages.

use crate::config::ContentConfig;
use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;

/// Fixed messages keyed by (month, day).
const SPECIAL_DATES: &[(u32, u32, &str)] = &[
    (
        1,
        1,
        "🎉 Happy New Year! May this year be filled with discovery and growth! #NewYear",
    ),
    (
        2,
        14,
        "💝 Happy Valentine's Day! Remember to love what you do and do what you love. #ValentinesDay",
    ),
    (
        3,
        8,
        "🌸 Happy International Women's Day! Celebrating women in tech and beyond. #WomensDay",
    ),
    (
        4,
        22,
        "🌍 Happy Earth Day! Let's protect our beautiful planet. #EarthDay",
    ),
    (
        10,
        31,
        "🎃 Happy Halloween! May your day be spooktacular! #Halloween",
    ),
    (
        12,
        25,
        "🎄 Merry Christmas! Wishing you peace, joy, and inspiration! #Christmas",
    ),
];

/// Theme prefixes indexed by days from Monday.
const DAY_THEMES: [&str; 7] = [
    "Mindfulness Monday ✨",
    "Tech Tuesday 💻",
    "Wisdom Wednesday 📚",
    "Throwback Thursday 🔙",
    "Future Friday 🚀",
    "Science Saturday 🔬",
    "Serenity Sunday ☮️",
];

/// Generate the message for `today`.
///
/// Special dates win outright; every other day produces
/// `"<theme>: <message>"` with a random fallback message, or the configured
/// default when no fallbacks exist. The date is a parameter so tests don't
/// depend on the wall clock.
pub fn daily_message(today: NaiveDate, content: &ContentConfig) -> String {
    if let Some((_, _, message)) = SPECIAL_DATES
        .iter()
        .find(|(month, day, _)| *month == today.month() && *day == today.day())
    {
        return (*message).to_string();
    }

    let theme = DAY_THEMES[today.weekday().num_days_from_monday() as usize];
    let mut rng = rand::thread_rng();
    let message = content
        .fallback_messages
        .choose(&mut rng)
        .unwrap_or(&content.default_message);

    format!("{theme}: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn new_year_is_special() {
        let msg = daily_message(date(2026, 1, 1), &ContentConfig::default());
        assert!(msg.contains("#NewYear"));
    }

    #[test]
    fn christmas_is_special() {
        let msg = daily_message(date(2026, 12, 25), &ContentConfig::default());
        assert!(msg.contains("#Christmas"));
    }

    #[test]
    fn special_date_ignores_fallbacks() {
        let content = ContentConfig {
            fallback_messages: vec!["never used".to_string()],
            ..ContentConfig::default()
        };
        let msg = daily_message(date(2026, 10, 31), &content);
        assert!(msg.contains("#Halloween"));
        assert!(!msg.contains("never used"));
    }

    #[test]
    fn weekday_theme_prefixes_message() {
        // 2026-08-03 is a Monday
        let msg = daily_message(date(2026, 8, 3), &ContentConfig::default());
        assert!(msg.starts_with("Mindfulness Monday ✨: "), "{msg}");
    }

    #[test]
    fn sunday_gets_serenity() {
        // 2026-08-09 is a Sunday
        let msg = daily_message(date(2026, 8, 9), &ContentConfig::default());
        assert!(msg.starts_with("Serenity Sunday ☮️: "), "{msg}");
    }

    #[test]
    fn message_comes_from_fallback_list() {
        let content = ContentConfig {
            fallback_messages: vec!["only option".to_string()],
            ..ContentConfig::default()
        };
        let msg = daily_message(date(2026, 8, 4), &content);
        assert_eq!(msg, "Tech Tuesday 💻: only option");
    }

    #[test]
    fn empty_fallbacks_use_default_message() {
        let content = ContentConfig {
            fallback_messages: vec![],
            default_message: "the default".to_string(),
            ..ContentConfig::default()
        };
        let msg = daily_message(date(2026, 8, 5), &content);
        assert_eq!(msg, "Wisdom Wednesday 📚: the default");
    }

    #[test]
    fn every_weekday_has_a_theme() {
        // 2026-08-03 through 2026-08-09 cover Monday..Sunday
        for day in 3..=9 {
            let msg = daily_message(date(2026, 8, day), &ContentConfig::default());
            let theme = DAY_THEMES
                .iter()
                .find(|t| msg.starts_with(&format!("{t}: ")));
            assert!(theme.is_some(), "no theme prefix in {msg}");
        }
    }
}
