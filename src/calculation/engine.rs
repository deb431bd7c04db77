//! Calculation engine: birth input to lifespan position
//!
//! Pure and total. Inputs are not validated here, a birth date in the
//! future simply yields age zero. The evaluation instant is passed in so a
//! calculation and its impact data always agree on "now".

use super::LifeCalculation;
use crate::demographics::DemographicDefaults;
use crate::person::BirthInfo;
use chrono::{DateTime, NaiveDate, Utc};

/// Days in a year for age arithmetic
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Milliseconds in one 365.25-day year
pub const MILLIS_PER_YEAR: f64 = DAYS_PER_YEAR * 24.0 * 60.0 * 60.0 * 1000.0;

/// Engine that resolves defaults and computes a [`LifeCalculation`]
#[derive(Debug, Clone, Default)]
pub struct LifeEngine {
    defaults: DemographicDefaults,
}

impl LifeEngine {
    /// Create an engine with the given default figures
    pub fn new(defaults: DemographicDefaults) -> Self {
        Self { defaults }
    }

    /// Get the default figures this engine resolves against
    pub fn defaults(&self) -> &DemographicDefaults {
        &self.defaults
    }

    /// Compute where `info` stands at the instant `now`
    pub fn calculate(&self, info: &BirthInfo, now: DateTime<Utc>) -> LifeCalculation {
        let current_age = age_in_years(info.birth_date, now);
        let life_expectancy = self.defaults.resolve_life_expectancy(info);
        let population_median_age = self.defaults.resolve_population_median_age(info);

        let calc = LifeCalculation::at_age(
            info.birth_date,
            info.gender,
            current_age,
            life_expectancy,
            population_median_age,
        );

        log::debug!(
            "Calculated {} ({}): age={:.4} expectancy={} spent={:.2}% relative={:.2}%",
            info.birth_date,
            info.gender,
            calc.current_age,
            calc.life_expectancy,
            calc.percent_spent,
            calc.relative_age_percent,
        );

        calc
    }
}

/// Compute with the standard default figures
pub fn calculate(info: &BirthInfo, now: DateTime<Utc>) -> LifeCalculation {
    LifeEngine::default().calculate(info, now)
}

/// Elapsed years from midnight UTC on `birth_date` to `now`
///
/// Negative when the birth date lies in the future; callers clamp.
pub fn age_in_years(birth_date: NaiveDate, now: DateTime<Utc>) -> f64 {
    let born = birth_date.and_time(chrono::NaiveTime::MIN).and_utc();
    let elapsed = now.signed_duration_since(born);
    elapsed.num_milliseconds() as f64 / MILLIS_PER_YEAR
}
