//! Supported display locales and resolution from language tags
//!
//! Resolution order over the preferred tags: exact match first, then a
//! match on the language code alone (`zh-CN` → `zh`), then English.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported display locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "zh")]
    Zh,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "ru")]
    Ru,
    #[serde(rename = "th")]
    Th,
}

/// Every supported locale, in lookup order
pub const SUPPORTED_LOCALES: [Locale; 7] = [
    Locale::Zh,
    Locale::ZhTw,
    Locale::En,
    Locale::Ja,
    Locale::Fr,
    Locale::Ru,
    Locale::Th,
];

impl Locale {
    /// Short tag used in paths and settings
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::ZhTw => "zh-TW",
            Locale::En => "en",
            Locale::Ja => "ja",
            Locale::Fr => "fr",
            Locale::Ru => "ru",
            Locale::Th => "th",
        }
    }

    /// Full BCP 47 tag for date and number formatting
    pub fn intl_tag(&self) -> &'static str {
        match self {
            Locale::Zh => "zh-CN",
            Locale::ZhTw => "zh-TW",
            Locale::En => "en-US",
            Locale::Ja => "ja-JP",
            Locale::Fr => "fr-FR",
            Locale::Ru => "ru-RU",
            Locale::Th => "th-TH",
        }
    }

    /// Name of the locale in its own language
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Zh => "简体中文",
            Locale::ZhTw => "繁體中文",
            Locale::En => "English",
            Locale::Ja => "日本語",
            Locale::Fr => "Français",
            Locale::Ru => "Русский",
            Locale::Th => "ไทย",
        }
    }

    /// Resolve a single language tag such as `zh-CN`, `fr` or `en_US.UTF-8`
    pub fn resolve(tag: &str) -> Locale {
        Self::resolve_preferred([tag])
    }

    /// Resolve an ordered list of preferred language tags
    pub fn resolve_preferred<'a, I>(tags: I) -> Locale
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tags: Vec<String> = tags.into_iter().map(normalize_tag).collect();

        for tag in &tags {
            if let Some(locale) = SUPPORTED_LOCALES
                .iter()
                .find(|l| l.tag().eq_ignore_ascii_case(tag))
            {
                return *locale;
            }
        }

        for tag in &tags {
            let code = language_code(tag);
            if let Some(locale) = SUPPORTED_LOCALES
                .iter()
                .find(|l| language_code(l.tag()).eq_ignore_ascii_case(code))
            {
                return *locale;
            }
        }

        Locale::En
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// `en_US.UTF-8` → `en-US`
fn normalize_tag(tag: &str) -> String {
    let tag = tag.split(|c| c == '.' || c == '@').next().unwrap_or("").trim();
    tag.replace('_', "-")
}

fn language_code(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(Locale::resolve("zh-TW"), Locale::ZhTw);
        assert_eq!(Locale::resolve("ja"), Locale::Ja);
        assert_eq!(Locale::resolve("zh-tw"), Locale::ZhTw);
    }

    #[test]
    fn test_language_code_fallback() {
        assert_eq!(Locale::resolve("zh-CN"), Locale::Zh);
        assert_eq!(Locale::resolve("fr-CA"), Locale::Fr);
        assert_eq!(Locale::resolve("en-GB"), Locale::En);
    }

    #[test]
    fn test_posix_style_tags() {
        assert_eq!(Locale::resolve("ru_RU.UTF-8"), Locale::Ru);
        assert_eq!(Locale::resolve("zh_TW.UTF-8"), Locale::ZhTw);
    }

    #[test]
    fn test_unknown_falls_back_to_english() {
        assert_eq!(Locale::resolve("de-DE"), Locale::En);
        assert_eq!(Locale::resolve(""), Locale::En);
        assert_eq!(Locale::resolve("C"), Locale::En);
    }

    #[test]
    fn test_exact_match_beats_earlier_code_match() {
        // th-TH only matches by code, ja matches exactly later in the list
        assert_eq!(Locale::resolve_preferred(["th-TH", "ja"]), Locale::Ja);
        assert_eq!(Locale::resolve_preferred(["de", "th-TH", "fr-BE"]), Locale::Th);
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&Locale::ZhTw).unwrap(), "\"zh-TW\"");
        let back: Locale = serde_json::from_str("\"th\"").unwrap();
        assert_eq!(back, Locale::Th);
        assert_eq!(Locale::Zh.intl_tag(), "zh-CN");
        assert_eq!(Locale::Fr.display_name(), "Français");
    }
}
