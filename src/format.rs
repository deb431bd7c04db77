//! Plain-text formatting for ages, bands and dates

use crate::locale::Locale;
use chrono::NaiveDate;

/// Whole years and months, e.g. `"28 years 7 months"`; months omitted when zero
pub fn format_age(age: f64) -> String {
    let age = age.max(0.0);
    let years = age.floor();
    let months = ((age - years) * 12.0).floor() as u32;
    let years = years as u64;

    if months > 0 {
        format!("{} years {} months", years, months)
    } else {
        format!("{} years", years)
    }
}

/// Band label such as `"60–80.88 years old"`
pub fn format_band(start: f64, end: f64) -> String {
    format!("{}–{} years old", start, end)
}

/// Date in the conventional order for a locale, e.g. `"December 28, 1996"` or `"1996年12月28日"`
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    let pattern = match locale {
        Locale::En => "%B %-d, %Y",
        Locale::Zh | Locale::ZhTw | Locale::Ja => "%Y年%-m月%-d日",
        Locale::Fr | Locale::Th => "%d/%m/%Y",
        Locale::Ru => "%d.%m.%Y",
    };
    date.format(pattern).to_string()
}
