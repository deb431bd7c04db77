//! Saved form values and display preferences
//!
//! A small JSON document holding the last entered birth date and overrides
//! plus the theme and locale. Passed explicitly to whatever renders; nothing
//! here is global.

use crate::locale::Locale;
use crate::person::{BirthInfo, Gender};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default settings file stem
pub const STORAGE_KEY: &str = "life-spent-settings";

pub const DEFAULT_BIRTH_YEAR: i32 = 1996;
pub const DEFAULT_BIRTH_MONTH: u32 = 1;
pub const DEFAULT_BIRTH_DAY: u32 = 1;

/// Errors reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Persisted user settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub birth_year: i32,
    pub birth_month: u32,
    pub birth_day: u32,
    pub gender: Gender,
    pub life_expectancy: Option<f64>,
    pub population_median_age: Option<f64>,
    pub theme: Theme,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            birth_year: DEFAULT_BIRTH_YEAR,
            birth_month: DEFAULT_BIRTH_MONTH,
            birth_day: DEFAULT_BIRTH_DAY,
            gender: Gender::Male,
            life_expectancy: None,
            population_median_age: None,
            theme: Theme::Dark,
            locale: Locale::En,
        }
    }
}

impl Settings {
    /// Default settings file path in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(format!("{}.json", STORAGE_KEY))
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load settings only if the file exists
    pub fn load_existing(path: &Path) -> Result<Option<Self>, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Stored birth date, if it names a real day
    pub fn birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.birth_year, self.birth_month, self.birth_day)
    }

    /// Calculation input built from the stored form values
    pub fn birth_info(&self) -> Option<BirthInfo> {
        Some(BirthInfo {
            birth_date: self.birth_date()?,
            gender: self.gender,
            life_expectancy: self.life_expectancy,
            population_median_age: self.population_median_age,
        })
    }

    /// Remember the given input as the form values
    pub fn remember(&mut self, info: &BirthInfo) {
        use chrono::Datelike;

        self.birth_year = info.birth_date.year();
        self.birth_month = info.birth_date.month();
        self.birth_day = info.birth_date.day();
        self.gender = info.gender;
        self.life_expectancy = info.life_expectancy;
        self.population_median_age = info.population_median_age;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}-{}.json", STORAGE_KEY, name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.birth_date(), NaiveDate::from_ymd_opt(1996, 1, 1));
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.gender, Gender::Male);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_default_path_uses_storage_key() {
        assert_eq!(Settings::default_path(), PathBuf::from("life-spent-settings.json"));
    }

    #[test]
    fn test_load_existing() {
        let path = temp_path("existing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load_existing(&path).unwrap(), None);

        let settings = Settings {
            locale: Locale::Ja,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load_existing(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save");
        let mut settings = Settings::default();
        let info = BirthInfo::new(NaiveDate::from_ymd_opt(1988, 9, 30).unwrap(), Gender::Female)
            .with_life_expectancy(84.0);
        settings.remember(&info);
        settings.theme = settings.theme.toggle();
        settings.locale = Locale::resolve("zh-CN");

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, settings);
        assert_eq!(loaded.theme, Theme::Light);
        assert_eq!(loaded.locale, Locale::Zh);
        assert_eq!(loaded.birth_info(), Some(info));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"gender":"female","theme":"light"}"#).unwrap();
        assert_eq!(settings.gender, Gender::Female);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.birth_year, DEFAULT_BIRTH_YEAR);
        assert_eq!(settings.locale, Locale::En);
    }

    #[test]
    fn test_invalid_stored_date() {
        let settings = Settings {
            birth_month: 2,
            birth_day: 30,
            ..Settings::default()
        };
        assert_eq!(settings.birth_info(), None);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        let result = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SettingsError::Json(_))));
    }
}
