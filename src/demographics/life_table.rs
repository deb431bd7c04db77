//! Default life expectancy and median age figures
//!
//! These are fixed reference values, not a demographic model. A person's
//! own figures always win when supplied.

use crate::person::{BirthInfo, Gender};
use std::ops::RangeInclusive;

/// Default life expectancy for men (years)
pub const DEFAULT_LIFE_EXPECTANCY_MALE: f64 = 75.37;

/// Default life expectancy for women (years)
pub const DEFAULT_LIFE_EXPECTANCY_FEMALE: f64 = 80.88;

/// Default global population median age (years)
pub const DEFAULT_POPULATION_MEDIAN_AGE: f64 = 31.1;

/// Oldest verified human age; used as the visual span once life expectancy is surpassed
pub const MAX_HUMAN_AGE: f64 = 122.0;

/// Accepted range for a custom life expectancy entered by the user
pub const LIFE_EXPECTANCY_RANGE: RangeInclusive<f64> = 50.0..=110.0;

/// Accepted range for a custom population median age entered by the user
pub const POPULATION_MEDIAN_AGE_RANGE: RangeInclusive<f64> = 15.0..=60.0;

/// Default figures used when a person does not supply their own
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemographicDefaults {
    pub life_expectancy_male: f64,
    pub life_expectancy_female: f64,
    pub population_median_age: f64,
}

impl DemographicDefaults {
    /// The standard reference figures
    pub const fn standard() -> Self {
        Self {
            life_expectancy_male: DEFAULT_LIFE_EXPECTANCY_MALE,
            life_expectancy_female: DEFAULT_LIFE_EXPECTANCY_FEMALE,
            population_median_age: DEFAULT_POPULATION_MEDIAN_AGE,
        }
    }

    /// Default life expectancy for a gender
    pub fn life_expectancy(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.life_expectancy_male,
            Gender::Female => self.life_expectancy_female,
        }
    }

    /// Life expectancy for a person: their override, else the gender default
    pub fn resolve_life_expectancy(&self, info: &BirthInfo) -> f64 {
        info.life_expectancy
            .unwrap_or_else(|| self.life_expectancy(info.gender))
    }

    /// Population median age for a person: their override, else the global default
    pub fn resolve_population_median_age(&self, info: &BirthInfo) -> f64 {
        info.population_median_age
            .unwrap_or(self.population_median_age)
    }
}

impl Default for DemographicDefaults {
    fn default() -> Self {
        Self::standard()
    }
}
