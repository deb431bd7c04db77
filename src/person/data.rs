//! Person data structures used as calculation input

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender of the person, selects the default life expectancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Get the string representation used in share links and CSV files
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a gender string is neither `male` nor `female`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender: {0}")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

/// Birth and demographic input for a single calculation
///
/// Constructed fresh per request. Nothing here is validated; see
/// [`crate::validation`] for the checks a caller should run first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInfo {
    /// Calendar date of birth
    pub birth_date: NaiveDate,

    /// Gender (selects the default life expectancy)
    pub gender: Gender,

    /// Custom life expectancy in years, overrides the gender default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_expectancy: Option<f64>,

    /// Custom population median age in years, overrides the global default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_median_age: Option<f64>,
}

impl BirthInfo {
    /// Create input with no overrides
    pub fn new(birth_date: NaiveDate, gender: Gender) -> Self {
        Self {
            birth_date,
            gender,
            life_expectancy: None,
            population_median_age: None,
        }
    }

    /// Set a custom life expectancy
    pub fn with_life_expectancy(mut self, years: f64) -> Self {
        self.life_expectancy = Some(years);
        self
    }

    /// Set a custom population median age
    pub fn with_population_median_age(mut self, years: f64) -> Self {
        self.population_median_age = Some(years);
        self
    }
}
